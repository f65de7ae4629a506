/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// `null` is the empty scalar. Every other leaf goes through
/// [`to_value`](crate::to_value), so numbers and booleans become their text.
///
/// ```rust
/// use serde_csvxml::{value, Value};
///
/// let v = value!({ "id": 1, "tags": ["a", "b"], "note": null });
/// assert_eq!(v.get("id"), Some(&Value::from("1")));
/// assert!(v.get("note").unwrap().is_nil());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Scalar(::std::string::String::new())
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::Record::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Record(record)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or_default()
    }};
}
