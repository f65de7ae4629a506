//! Reference vectors for both text formats.

use serde::{Deserialize, Serialize};
use serde_csvxml::csv::{self, engine};
use serde_csvxml::xml::{self, engine as tags};
use serde_csvxml::{CsvOptions, Error, HeaderMode, Value, XmlOptions};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Entry {
    name: String,
    count: u32,
}

fn entries() -> Vec<Entry> {
    vec![
        Entry {
            name: "first".to_string(),
            count: 1,
        },
        Entry {
            name: "second".to_string(),
            count: 2,
        },
    ]
}

mod round_trip {
    use super::*;

    #[test]
    fn csv_with_matching_keys() {
        let options = CsvOptions::new().with_keys(["name", "count"]);
        let text = csv::to_string_with_options(&entries(), &options).unwrap();
        let back: Vec<Entry> = csv::from_str_with_options(&text, &options).unwrap();
        assert_eq!(back, entries());
    }

    #[test]
    fn xml_with_default_options() {
        let text = xml::to_string(&entries()).unwrap();
        let back: Vec<Entry> = xml::from_str(&text).unwrap();
        assert_eq!(back, entries());
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Single {
        n: Option<u8>,
    }

    #[test]
    fn csv_nil_only_rows() {
        let rows = vec![
            Single { n: Some(1) },
            Single { n: None },
            Single { n: Some(3) },
        ];
        let options = CsvOptions::new().with_keys(["n"]);
        let text = csv::to_string_with_options(&rows, &options).unwrap();
        assert_eq!(text, "n\n1\n\n3");
        assert_eq!(csv::from_str_with_options::<Vec<Single>>(&text, &options).unwrap(), rows);
        assert_eq!(csv::from_str::<Vec<Single>>(&text).unwrap(), rows);

        let rows = vec![Single { n: None }, Single { n: Some(2) }, Single { n: None }];
        let text = csv::to_string_with_options(&rows, &options).unwrap();
        assert_eq!(csv::from_str_with_options::<Vec<Single>>(&text, &options).unwrap(), rows);
    }

    #[test]
    fn csv_empty_inner_sequence() {
        let grid = vec![vec![1], vec![], vec![2]];
        let text = csv::to_string(&grid).unwrap();
        assert_eq!(text, "1\n\n2");
        assert_eq!(csv::from_str::<Vec<Vec<i32>>>(&text).unwrap(), grid);

        let grid = vec![vec![1], vec![]];
        let text = csv::to_string(&grid).unwrap();
        assert_eq!(csv::from_str::<Vec<Vec<i32>>>(&text).unwrap(), grid);
    }

    #[test]
    fn csv_nil_scalar_in_sequence() {
        let value = Value::Sequence(vec!["a".into(), Value::default(), "b".into()]);
        let options = CsvOptions::new().with_header(HeaderMode::Absent);
        let text = csv::to_string_with_options(&value, &options).unwrap();
        assert_eq!(text, "a\n\nb");
        assert_eq!(csv::from_str_with_options::<Value>(&text, &options).unwrap(), value);
    }

    #[test]
    fn csv_single_record() {
        let entry = entries().remove(0);
        let text = csv::to_string_with_keys(&entry, ["name", "count"]).unwrap();
        assert_eq!(text, "name,count\nfirst,1");
        assert_eq!(csv::from_str::<Entry>(&text).unwrap(), entry);
    }
}

mod quoting {
    use super::*;

    const AWKWARD: &str = "a,b\nc\"d";

    #[test]
    fn quoted_field_text() {
        assert_eq!(engine::quote(AWKWARD), "\"a,b\nc\"\"d\"");
        assert_eq!(engine::unquote(&engine::quote(AWKWARD)), AWKWARD);
    }

    #[test]
    fn awkward_field_survives_a_table() {
        let rows = vec![Entry {
            name: AWKWARD.to_string(),
            count: 3,
        }];
        let text = csv::to_string_with_keys(&rows, ["name", "count"]).unwrap();
        assert_eq!(text, "name,count\n\"a,b\nc\"\"d\",3");

        let back: Vec<Entry> = csv::from_str(&text).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn plain_fields_are_untouched() {
        assert_eq!(engine::quote("plain"), "plain");
        assert_eq!(engine::quote("mid\"quote"), "mid\"quote");
        assert_eq!(engine::quote("\"lead"), "\"\"\"lead\"");
    }
}

mod splitting {
    use super::*;

    #[test]
    fn field_split_falls_back_to_rows() {
        let parts = engine::split_fields("\"x\ny\",b\nc,d");
        assert_eq!(parts, vec!["\"x\ny\",b", "c,d"]);
    }

    #[test]
    fn quoted_newline_stays_in_its_field() {
        let parts = engine::split_fields("\"x\ny\",b");
        assert_eq!(parts, vec!["\"x\ny\"", "b"]);
        assert_eq!(engine::unquote(parts[0]), "x\ny");
    }

    #[test]
    fn empty_rows_and_trailing_fields() {
        assert!(engine::split_fields("").is_empty());
        assert_eq!(engine::split_fields("a,"), vec!["a", ""]);
        assert_eq!(engine::split_rows("a\n\nb\n"), vec!["a", "", "b"]);
    }
}

mod header {
    use super::*;

    #[test]
    fn header_row_is_written_and_skipped() {
        let text = csv::to_string_with_keys(&entries(), ["name", "count"]).unwrap();
        assert_eq!(engine::split_rows(&text).len(), 3);

        let back: Vec<Entry> = csv::from_str(&text).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn no_keys_means_no_header() {
        let text = csv::to_string(&vec![vec![1, 2]]).unwrap();
        assert_eq!(text, "1,2");
    }

    #[test]
    fn absent_header_keeps_every_row() {
        let options = CsvOptions::new()
            .with_keys(["name", "count"])
            .with_header(HeaderMode::Absent);
        let back: Vec<Entry> = csv::from_str_with_options("a,1\nb,2", &options).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].name, "a");
    }

    #[test]
    fn header_only_table_without_keys() {
        let text = csv::to_string_with_keys(&Vec::<Entry>::new(), ["name", "count"]).unwrap();
        assert_eq!(text, "name,count");
        assert_eq!(csv::from_str::<Vec<Entry>>(&text).unwrap(), Vec::new());

        let options = CsvOptions::new().with_header(HeaderMode::Present);
        assert_eq!(
            csv::from_str_with_options::<Vec<Entry>>(&text, &options).unwrap(),
            Vec::new()
        );
    }

    #[test]
    fn lone_data_row_of_a_grid_is_kept() {
        assert_eq!(csv::from_str::<Vec<Vec<u8>>>("1,2").unwrap(), vec![vec![1, 2]]);
    }

    #[test]
    fn empty_document_has_no_keys() {
        assert!(matches!(
            csv::from_str::<Vec<Entry>>(""),
            Err(Error::NoKeysFound { .. })
        ));
    }
}

mod nesting {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Bc {
        b: String,
        c: String,
    }

    #[test]
    fn inner_elements_are_siblings() {
        let (name, inner) = tags::key_value("<a><b>1</b><c>2</c></a>").unwrap();
        assert_eq!(name, "a");

        let spans = tags::split_elements(inner).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(tags::key_value(spans[0]).unwrap(), ("b", "1"));
        assert_eq!(tags::key_value(spans[1]).unwrap(), ("c", "2"));
    }

    #[test]
    fn rooted_record() {
        let options = XmlOptions::new().with_root("a");
        let record: Bc = xml::from_str_with_options("<a><b>1</b><c>2</c></a>", &options).unwrap();
        assert_eq!(
            record,
            Bc {
                b: "1".to_string(),
                c: "2".to_string()
            }
        );
    }

    #[test]
    fn rooted_container() {
        let options = XmlOptions::new();
        let outer = xml::Decoder::new("<a><b>1</b><c>2</c></a>", &options)
            .container()
            .unwrap();
        let inner = outer.field("a").unwrap();
        assert_eq!(inner.level(), 1);
        assert_eq!(inner.path().to_string(), "$.a");
        assert_eq!(inner.span(), "<b>1</b><c>2</c>");
    }
}

mod exhaustion {
    use super::*;

    #[test]
    fn csv_cursor() {
        let options = CsvOptions::new().with_header(HeaderMode::Absent);
        let mut rows = csv::Decoder::new("1\n2", &options).unkeyed_container().unwrap();
        assert_eq!(rows.decode::<u8>().unwrap(), 1);
        assert_eq!(rows.decode::<u8>().unwrap(), 2);
        let err = rows.decode::<u8>().unwrap_err();
        assert!(matches!(err, Error::IndexExhausted { count: 2, .. }));
    }

    #[test]
    fn xml_cursor() {
        let options = XmlOptions::new();
        let mut items = xml::Decoder::new("<item>1</item>", &options)
            .unkeyed_container()
            .unwrap();
        assert!(!items.is_at_end());
        assert_eq!(items.decode::<u8>().unwrap(), 1);
        assert!(items.is_at_end());
        assert!(matches!(
            items.decode::<u8>(),
            Err(Error::IndexExhausted { count: 1, .. })
        ));
    }

    #[test]
    fn header_only_table() {
        let options = CsvOptions::new().with_keys(["name", "count"]);
        let mut rows = csv::Decoder::new("name,count", &options)
            .unkeyed_container()
            .unwrap();
        assert!(rows.is_at_end());
        assert!(matches!(
            rows.decode::<Entry>(),
            Err(Error::IndexExhausted { .. })
        ));
    }
}

mod composition {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    struct Tagged {
        name: String,
        tags: Vec<String>,
    }

    #[derive(Serialize, Deserialize, Debug)]
    struct Outer {
        inner: Entry,
    }

    fn is_unsupported<T>(result: Result<T, Error>) -> bool {
        matches!(result, Err(Error::UnsupportedComposition { .. }))
    }

    #[test]
    fn csv_encode() {
        let tagged = Tagged {
            name: "x".to_string(),
            tags: vec!["a".to_string()],
        };
        assert!(is_unsupported(csv::to_string_with_keys(&tagged, ["name", "tags"])));

        let outer = Outer {
            inner: entries().remove(0),
        };
        assert!(is_unsupported(csv::to_string_with_keys(&outer, ["inner"])));
    }

    #[test]
    fn csv_decode() {
        let options = CsvOptions::new().with_keys(["name", "tags"]);
        assert!(is_unsupported(csv::from_str_with_options::<Tagged>(
            "name,tags\nx,a",
            &options
        )));
    }

    #[test]
    fn xml_explicit_nesting() {
        let options = XmlOptions::new();
        let record = xml::Decoder::new("<name>x</name><tags><item>a</item></tags>", &options)
            .container()
            .unwrap();
        assert!(is_unsupported(record.nested_unkeyed_container("tags")));
        assert!(is_unsupported(record.nested_container("tags")));
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Shelf {
        label: Entry,
        tags: Vec<String>,
        rows: Vec<Entry>,
    }

    #[test]
    fn xml_fields_nest() {
        let shelf = Shelf {
            label: entries().remove(0),
            tags: vec!["a".to_string(), "b".to_string()],
            rows: entries(),
        };
        let text = xml::to_string(&shelf).unwrap();
        assert!(text.starts_with(
            "<label><name>first</name><count>1</count></label><tags><item>a</item><item>b</item></tags>"
        ));
        assert_eq!(xml::from_str::<Shelf>(&text).unwrap(), shelf);

        let tagged: Tagged = xml::from_str("<name>x</name><tags><item>a</item></tags>").unwrap();
        assert_eq!(tagged.tags, vec!["a".to_string()]);
    }
}
