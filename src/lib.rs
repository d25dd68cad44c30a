//! Elm-style composable JSON decoders for Rust.
//!
//! A [`Decoder`](decoder::Decoder) is an inert description of the expected
//! shape of a JSON value: build it once from small combinators, then run it
//! against any number of already-parsed [`serde_json::Value`]s (or raw text).
//! The result is either a strongly-shaped [`Decoded`] value or a single
//! human-readable message that pinpoints exactly where validation failed
//! inside nested structure.
//!
//! ## Quick start
//!
//! ```rust
//! use json_decode_rs::{run_on_text, Decoded};
//! use json_decode_rs::decoder::{field, int, list};
//!
//! let scores = field("scores", list(int()));
//!
//! let ok = run_on_text(&scores, r#"{"scores": [95, 87, 92]}"#).unwrap();
//! assert_eq!(
//!     ok,
//!     Decoded::Array(vec![Decoded::Int(95), Decoded::Int(87), Decoded::Int(92)])
//! );
//!
//! let err = run_on_text(&scores, r#"{"scores": [95, "87"]}"#).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Expecting an Int at _.scores[1] but instead got: \"87\""
//! );
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — the decoder description type and its constructors
//! - [`decoded`] — the decoded output value type
//! - [`problem`] — structured failure records and their rendering
//! - [`error`] — the public error type

pub mod decoded;
pub mod decoder;
pub mod error;
pub mod problem;

mod decode;

pub use decoded::Decoded;
pub use decoder::Decoder;
pub use error::{Error, Result};
pub use problem::Problem;

/// Run a decoder against an already-parsed JSON value.
///
/// On failure the structured failure record is rendered into its final
/// message before crossing the boundary; callers only ever see the string.
///
/// # Examples
/// ```
/// use json_decode_rs::{run, Decoded};
/// use json_decode_rs::decoder::{field, int};
/// use serde_json::json;
///
/// let d = field("a", int());
/// assert_eq!(run(&d, &json!({"a": 5})), Ok(Decoded::Int(5)));
/// assert!(run(&d, &json!({"b": 5})).is_err());
/// ```
pub fn run(decoder: &Decoder, value: &serde_json::Value) -> Result<Decoded> {
    decode::eval(decoder, value).map_err(|problem| Error::Decode(problem.render()))
}

/// Parse raw text as JSON, then run a decoder against the parsed value.
///
/// A parse failure yields [`Error::InvalidJson`] immediately; the decoder is
/// never consulted.
///
/// # Examples
/// ```
/// use json_decode_rs::{run_on_text, Decoded};
/// use json_decode_rs::decoder::string;
///
/// let d = string();
/// assert_eq!(
///     run_on_text(&d, "\"hello\""),
///     Ok(Decoded::String("hello".to_string()))
/// );
/// assert!(
///     run_on_text(&d, "{not json")
///         .unwrap_err()
///         .to_string()
///         .starts_with("Given an invalid JSON: ")
/// );
/// ```
pub fn run_on_text(decoder: &Decoder, text: &str) -> Result<Decoded> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::InvalidJson(e.to_string()))?;
    run(decoder, &value)
}
