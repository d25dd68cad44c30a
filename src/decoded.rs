use indexmap::IndexMap;
use std::fmt;

/// The result of a successful decode.
///
/// Each decoder kind has a fixed target shape: primitives produce the matching
/// primitive variant, `list`/`array` produce [`Decoded::Array`],
/// `key_value_pairs` produces [`Decoded::Entries`], `dict` produces
/// [`Decoded::Object`], `maybe` produces [`Decoded::Maybe`], and the `value`
/// passthrough hands back the raw JSON as [`Decoded::Json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Decoded>),
    /// Object decoded as (key, value) pairs in property-enumeration order.
    Entries(Vec<(String, Decoded)>),
    /// Object decoded as a keyed map, one decoded value per key.
    Object(IndexMap<String, Decoded>),
    /// Present/absent container produced by the `maybe` decoder.
    Maybe(Option<Box<Decoded>>),
    /// The untouched input value, produced by the `value` decoder.
    Json(serde_json::Value),
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Null => write!(f, "null"),
            Decoded::Bool(b) => write!(f, "{b}"),
            Decoded::Int(n) => write!(f, "{n}"),
            Decoded::Float(n) => write!(f, "{n}"),
            Decoded::String(s) => write!(f, "\"{s}\""),
            Decoded::Array(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Decoded::Entries(pairs) => {
                write!(f, "[")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "(\"{k}\", {v})")?;
                }
                write!(f, "]")
            }
            Decoded::Object(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Decoded::Maybe(Some(v)) => write!(f, "Just({v})"),
            Decoded::Maybe(None) => write!(f, "Nothing"),
            Decoded::Json(v) => write!(f, "{v}"),
        }
    }
}

// From trait implementations for convenient Decoded construction

impl From<bool> for Decoded {
    fn from(b: bool) -> Self {
        Decoded::Bool(b)
    }
}

impl From<i32> for Decoded {
    fn from(n: i32) -> Self {
        Decoded::Int(i64::from(n))
    }
}

impl From<i64> for Decoded {
    fn from(n: i64) -> Self {
        Decoded::Int(n)
    }
}

impl From<f64> for Decoded {
    fn from(n: f64) -> Self {
        Decoded::Float(n)
    }
}

impl From<&str> for Decoded {
    fn from(s: &str) -> Self {
        Decoded::String(s.to_string())
    }
}

impl From<String> for Decoded {
    fn from(s: String) -> Self {
        Decoded::String(s)
    }
}

impl<T: Into<Decoded>> From<Vec<T>> for Decoded {
    fn from(items: Vec<T>) -> Self {
        Decoded::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Decoded>> From<Option<T>> for Decoded {
    fn from(opt: Option<T>) -> Self {
        Decoded::Maybe(opt.map(|v| Box::new(v.into())))
    }
}

impl Decoded {
    pub fn is_null(&self) -> bool {
        matches!(self, Decoded::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Decoded::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Decoded::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Decoded::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Decoded::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Decoded>> {
        match self {
            Decoded::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&Vec<(String, Decoded)>> {
        match self {
            Decoded::Entries(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Decoded>> {
        match self {
            Decoded::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Unwrap the present/absent container produced by `maybe`.
    /// Returns `None` when `self` is not a `Maybe` at all.
    pub fn as_maybe(&self) -> Option<Option<&Decoded>> {
        match self {
            Decoded::Maybe(opt) => Some(opt.as_deref()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Decoded::Json(v) => Some(v),
            _ => None,
        }
    }
}
