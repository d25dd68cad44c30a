//! Structured failure records and their rendering.
//!
//! Evaluation never produces a bare message string internally. It produces a
//! [`Problem`] chain that records the path from the decode root down to the
//! offending value; the chain is linearized into one human-readable message
//! only at the public boundary.

/// Why a decode failed.
///
/// `Index` and `Field` are path segments accumulated outermost-first while a
/// nested failure propagates back up. Every chain ends in exactly one
/// `Primitive` or `Fail` leaf; `OneOf` branches into several such chains.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Leaf mismatch: the value was not the shape the decoder expected.
    /// `actual: None` stands for an absent value and renders as `undefined`.
    Primitive {
        expected: String,
        actual: Option<serde_json::Value>,
    },
    /// The failure happened inside the array element at this index.
    Index(usize, Box<Problem>),
    /// The failure happened inside the named object field.
    Field(String, Box<Problem>),
    /// Every alternative of a multi-branch decoder failed.
    OneOf(Vec<Problem>),
    /// A `fail` decoder fired with a user-supplied message.
    Fail(String),
}

impl Problem {
    pub(crate) fn primitive(expected: impl Into<String>, actual: &serde_json::Value) -> Self {
        Problem::Primitive {
            expected: expected.into(),
            actual: Some(actual.clone()),
        }
    }

    /// Linearize the failure chain into one deterministic message.
    ///
    /// The context path starts at the root marker `_` and grows `.field` /
    /// `[index]` segments until a leaf is reached. The ` at <path>` clause is
    /// omitted while the path is still just the root marker.
    pub fn render(&self) -> String {
        let mut context = String::from("_");
        let mut problem = self;
        loop {
            match problem {
                Problem::Primitive { expected, actual } => {
                    return format!(
                        "Expecting {expected}{} but instead got: {}",
                        at_clause(&context),
                        json_repr(actual.as_ref())
                    );
                }
                Problem::Index(index, rest) => {
                    context.push_str(&format!("[{index}]"));
                    problem = rest;
                }
                Problem::Field(field, rest) => {
                    context.push('.');
                    context.push_str(field);
                    problem = rest;
                }
                Problem::OneOf(problems) => {
                    // Each branch renders independently, restarting its own
                    // path accounting from the branch point.
                    let branches: Vec<String> = problems.iter().map(Problem::render).collect();
                    return format!(
                        "I ran into the following problems{}:\n\n{}",
                        at_clause(&context),
                        branches.join("\n")
                    );
                }
                Problem::Fail(message) => {
                    return format!(
                        "I ran into a `fail` decoder{}: {message}",
                        at_clause(&context)
                    );
                }
            }
        }
    }
}

fn at_clause(context: &str) -> String {
    if context == "_" {
        String::new()
    } else {
        format!(" at {context}")
    }
}

/// Compact JSON rendering of the offending value, with the literal
/// `undefined` for an absent value.
fn json_repr(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(v) => serde_json::to_string(v).unwrap_or_default(),
        None => String::from("undefined"),
    }
}
