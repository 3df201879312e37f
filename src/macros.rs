/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Lists become maps keyed `0..n`. Object keys may be string or integer
/// literals. Anything else is converted with `Value::from`.
///
/// ```rust
/// use serde_formquery::{encode, form};
///
/// let data = form!({ "user": { "name": "ada", "langs": ["en", "fr"] }, "debug": null });
/// assert_eq!(
///     encode(&data).unwrap(),
///     "user%5Bname%5D=ada&user%5Blangs%5D%5B0%5D=en&user%5Blangs%5D%5B1%5D=fr"
/// );
/// ```
#[macro_export]
macro_rules! form {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Map($crate::FormMap::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut list = $crate::FormMap::new();
        $(
            list.push($crate::form!($elem));
        )*
        $crate::Value::Map(list)
    }};

    ({}) => {
        $crate::Value::Map($crate::FormMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::FormMap::new();
        $(
            map.insert($key, $crate::form!($value));
        )*
        $crate::Value::Map(map)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
