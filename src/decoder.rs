//! Decoder descriptions and their constructors.
//!
//! A [`Decoder`] is inert data: building one never touches a JSON value. The
//! evaluator in [`crate::decode`] walks the description against a concrete
//! value. Descriptions are cheap to clone and safe to share across threads;
//! the closures carried by `map_many` / `and_then` are held behind `Arc`.
//!
//! The constructor functions below are the intended way to build decoders:
//!
//! ```
//! use json_decode_rs::decoder::{field, index, int, list, string};
//!
//! // {"users": [{"name": ..}, ..]} -> name of the first user
//! let first_name = field("users", index(0, field("name", string())));
//! let ages = field("ages", list(int()));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::decoded::Decoded;

/// Combining function for `map_many`: receives one decoded value per decoder,
/// in decoder order, once every decoder has succeeded.
pub type Combine = Arc<dyn Fn(Vec<Decoded>) -> Decoded + Send + Sync>;

/// Continuation for `and_then`: picks the next decoder from the first
/// decoder's result.
pub type Continuation = Arc<dyn Fn(Decoded) -> Decoder + Send + Sync>;

/// A description of the expected shape of a JSON value and how to convert it.
///
/// One variant per decoder kind; the evaluator matches exhaustively, so an
/// unhandled kind cannot exist.
#[derive(Clone)]
pub enum Decoder {
    /// Accepts `true` / `false`.
    Bool,
    /// Accepts any integral JSON number.
    Int,
    /// Accepts any JSON number.
    Float,
    /// Accepts any JSON string.
    String,
    /// Accepts anything, handing the raw JSON value through untouched.
    Value,
    /// Accepts only literal `null`, producing the stored default.
    Null(Decoded),
    /// Decodes every element of a JSON array.
    List(Box<Decoder>),
    /// Same input shape as `List`; reported with an `an Array` label.
    Array(Box<Decoder>),
    /// Always succeeds: wraps the inner result in present/absent.
    Maybe(Box<Decoder>),
    /// Requires an object with the named field, decoding that field's value.
    Field(String, Box<Decoder>),
    /// Requires an array long enough, decoding the element at the index.
    Index(usize, Box<Decoder>),
    /// Requires an object, decoding every value into (key, value) pairs.
    KeyValuePairs(Box<Decoder>),
    /// Requires an object, decoding every value into a keyed map.
    Dict(Box<Decoder>),
    /// Tries each alternative in order; first success wins.
    OneOf(Vec<Decoder>),
    /// Applies every decoder to the same value, then combines the results.
    MapMany(Combine, Vec<Decoder>),
    /// On success of the first decoder, asks the continuation for a second
    /// decoder and applies it to the same original value.
    AndThen(Box<Decoder>, Continuation),
    /// Always fails with the message.
    Fail(String),
    /// Always succeeds with the value.
    Succeed(Decoded),
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoder::Bool => f.write_str("Bool"),
            Decoder::Int => f.write_str("Int"),
            Decoder::Float => f.write_str("Float"),
            Decoder::String => f.write_str("String"),
            Decoder::Value => f.write_str("Value"),
            Decoder::Null(default) => f.debug_tuple("Null").field(default).finish(),
            Decoder::List(inner) => f.debug_tuple("List").field(inner).finish(),
            Decoder::Array(inner) => f.debug_tuple("Array").field(inner).finish(),
            Decoder::Maybe(inner) => f.debug_tuple("Maybe").field(inner).finish(),
            Decoder::Field(name, inner) => {
                f.debug_tuple("Field").field(name).field(inner).finish()
            }
            Decoder::Index(i, inner) => f.debug_tuple("Index").field(i).field(inner).finish(),
            Decoder::KeyValuePairs(inner) => {
                f.debug_tuple("KeyValuePairs").field(inner).finish()
            }
            Decoder::Dict(inner) => f.debug_tuple("Dict").field(inner).finish(),
            Decoder::OneOf(alternatives) => {
                f.debug_tuple("OneOf").field(alternatives).finish()
            }
            Decoder::MapMany(_, decoders) => f
                .debug_tuple("MapMany")
                .field(&format_args!("<fn>"))
                .field(decoders)
                .finish(),
            Decoder::AndThen(inner, _) => f
                .debug_tuple("AndThen")
                .field(inner)
                .field(&format_args!("<fn>"))
                .finish(),
            Decoder::Fail(message) => f.debug_tuple("Fail").field(message).finish(),
            Decoder::Succeed(value) => f.debug_tuple("Succeed").field(value).finish(),
        }
    }
}

// CONSTRUCTORS

pub fn bool() -> Decoder {
    Decoder::Bool
}

pub fn int() -> Decoder {
    Decoder::Int
}

pub fn float() -> Decoder {
    Decoder::Float
}

pub fn string() -> Decoder {
    Decoder::String
}

/// The identity decoder: keeps the raw JSON value.
pub fn value() -> Decoder {
    Decoder::Value
}

/// Succeeds only on literal `null`, producing `default`.
pub fn null(default: impl Into<Decoded>) -> Decoder {
    Decoder::Null(default.into())
}

pub fn list(element: Decoder) -> Decoder {
    Decoder::List(Box::new(element))
}

pub fn array(element: Decoder) -> Decoder {
    Decoder::Array(Box::new(element))
}

/// Turns a decoder into one that never fails: an inner failure becomes the
/// absent marker instead.
pub fn maybe(inner: Decoder) -> Decoder {
    Decoder::Maybe(Box::new(inner))
}

pub fn field(name: impl Into<String>, inner: Decoder) -> Decoder {
    Decoder::Field(name.into(), Box::new(inner))
}

pub fn index(i: usize, inner: Decoder) -> Decoder {
    Decoder::Index(i, Box::new(inner))
}

/// Decodes an object into (key, value) pairs, applying `inner` to every value.
pub fn key_value_pairs(inner: Decoder) -> Decoder {
    Decoder::KeyValuePairs(Box::new(inner))
}

/// Decodes an object into a keyed map, applying `inner` to every value.
pub fn dict(inner: Decoder) -> Decoder {
    Decoder::Dict(Box::new(inner))
}

/// Tries the alternatives in order against the same value; the first success
/// wins. If every alternative fails, the error lists each branch's problem.
pub fn one_of(alternatives: Vec<Decoder>) -> Decoder {
    Decoder::OneOf(alternatives)
}

/// The n-ary core behind `map`, `map2`, `map3`, ...: applies every decoder to
/// the same value in order, short-circuiting on the first failure, then hands
/// the decoded values to `combine` in the same order.
pub fn map_many<F>(combine: F, decoders: Vec<Decoder>) -> Decoder
where
    F: Fn(Vec<Decoded>) -> Decoded + Send + Sync + 'static,
{
    Decoder::MapMany(Arc::new(combine), decoders)
}

/// Transforms the result of a decoder.
pub fn map<F>(f: F, decoder: Decoder) -> Decoder
where
    F: Fn(Decoded) -> Decoded + Send + Sync + 'static,
{
    map_many(
        move |mut args| {
            let a = args.pop().expect("map combiner called with 1 argument");
            f(a)
        },
        vec![decoder],
    )
}

/// Combines the results of two decoders run against the same value.
pub fn map2<F>(f: F, a: Decoder, b: Decoder) -> Decoder
where
    F: Fn(Decoded, Decoded) -> Decoded + Send + Sync + 'static,
{
    map_many(
        move |mut args| {
            let vb = args.pop().expect("map2 combiner called with 2 arguments");
            let va = args.pop().expect("map2 combiner called with 2 arguments");
            f(va, vb)
        },
        vec![a, b],
    )
}

/// Combines the results of three decoders run against the same value.
pub fn map3<F>(f: F, a: Decoder, b: Decoder, c: Decoder) -> Decoder
where
    F: Fn(Decoded, Decoded, Decoded) -> Decoded + Send + Sync + 'static,
{
    map_many(
        move |mut args| {
            let vc = args.pop().expect("map3 combiner called with 3 arguments");
            let vb = args.pop().expect("map3 combiner called with 3 arguments");
            let va = args.pop().expect("map3 combiner called with 3 arguments");
            f(va, vb, vc)
        },
        vec![a, b, c],
    )
}

/// Value-dependent decoding: runs `decoder`, and on success asks `next` for a
/// second decoder to run against the same original value.
pub fn and_then<F>(decoder: Decoder, next: F) -> Decoder
where
    F: Fn(Decoded) -> Decoder + Send + Sync + 'static,
{
    Decoder::AndThen(Box::new(decoder), Arc::new(next))
}

/// Ignores the input and fails with `message`.
pub fn fail(message: impl Into<String>) -> Decoder {
    Decoder::Fail(message.into())
}

/// Ignores the input and succeeds with `value`.
pub fn succeed(value: impl Into<Decoded>) -> Decoder {
    Decoder::Succeed(value.into())
}
