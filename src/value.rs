use std::collections::BTreeMap;
use std::fmt;

/// A single positional argument of a logging call.
///
/// Calls carry a flat list of arguments that is read as `key, value, key,
/// value, ...`. Only [`Arg::Str`] is accepted in key position.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    /// Description captured from a `Display` value.
    Display(String),
    /// Description captured from an error.
    Error(String),
    /// `Debug` rendering, used for anything without a better description.
    Debug(String),
}

impl Arg {
    pub fn display(value: &impl fmt::Display) -> Self {
        Arg::Display(value.to_string())
    }

    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Arg::Error(err.to_string())
    }

    pub fn debug(value: &impl fmt::Debug) -> Self {
        Arg::Debug(format!("{:?}", value))
    }

    fn as_key(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::F64(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::F64(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Arg::$variant(value as $wide)
                }
            }
        )+
    };
}

impl_from_int!(I64 as i64: i8, i16, i32, i64, isize);
impl_from_int!(U64 as u64: u8, u16, u32, u64, usize);

/// Render an argument value as text for the `args` mapping.
pub fn stringify(value: &Arg) -> String {
    match value {
        Arg::Str(s) => s.clone(),
        Arg::I64(n) => n.to_string(),
        Arg::U64(n) => n.to_string(),
        Arg::F64(f) => format!("{:.6}", f),
        Arg::Bool(b) => b.to_string(),
        Arg::Display(s) | Arg::Error(s) | Arg::Debug(s) => s.clone(),
    }
}

/// Fold a flat `key, value, ...` argument list into a mapping.
///
/// A trailing unpaired argument is dropped and a pair whose key is not a
/// string is skipped. Later duplicate keys overwrite earlier ones.
pub fn flatten_args(args: &[Arg]) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    for pair in args.chunks_exact(2) {
        let Some(key) = pair[0].as_key() else {
            continue;
        };
        data.insert(key.to_string(), stringify(&pair[1]));
    }
    data
}

/// Build an argument array from `key => value` pairs.
///
/// ```
/// use tracing_log_relay::{args, Arg};
///
/// let list = args!["user" => 42, "admin" => false];
/// assert_eq!(list[0], Arg::Str("user".into()));
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let empty: [$crate::Arg; 0] = [];
        empty
    }};
    ($($key:expr => $value:expr),+ $(,)?) => {
        [$($crate::Arg::from($key), $crate::Arg::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringify_scalars() {
        assert_eq!(stringify(&Arg::from(3.14)), "3.140000");
        assert_eq!(stringify(&Arg::from(true)), "true");
        assert_eq!(stringify(&Arg::from(42)), "42");
        assert_eq!(stringify(&Arg::from(-7i8)), "-7");
        assert_eq!(stringify(&Arg::from(u64::MAX)), "18446744073709551615");
        assert_eq!(stringify(&Arg::from("plain")), "plain");
    }

    #[test]
    fn stringify_descriptions() {
        let addr: std::net::Ipv4Addr = "10.0.0.1".parse().unwrap();
        assert_eq!(stringify(&Arg::display(&addr)), "10.0.0.1");

        let err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        assert_eq!(stringify(&Arg::error(&err)), "connection reset");

        assert_eq!(stringify(&Arg::debug(&vec![1, 2])), "[1, 2]");
    }

    #[test]
    fn even_args_keep_string_keyed_pairs() {
        let list = args!["a" => 1, "b" => "two", "a" => 3];
        let data = flatten_args(&list);

        assert_eq!(data.len(), 2);
        assert_eq!(data["a"], "3");
        assert_eq!(data["b"], "two");
    }

    #[test]
    fn odd_trailing_arg_is_dropped() {
        let list = [Arg::from("k"), Arg::from("v"), Arg::from("dangling")];
        let data = flatten_args(&list);

        assert_eq!(data.len(), 1);
        assert_eq!(data["k"], "v");
        assert!(!data.contains_key("dangling"));
    }

    #[test]
    fn non_string_key_skips_only_its_pair() {
        let list = [
            Arg::from(7),
            Arg::from("ignored"),
            Arg::from("kept"),
            Arg::from(false),
        ];
        let data = flatten_args(&list);

        assert_eq!(data.len(), 1);
        assert_eq!(data["kept"], "false");
    }

    #[test]
    fn empty_macro_yields_no_args() {
        assert!(flatten_args(&args![]).is_empty());
    }
}
