//! The evaluation engine: walks a decoder description against a JSON value.
//!
//! `eval` is a pure recursive function. It never mutates the description or
//! the input, and it never panics on malformed input; every mismatch comes
//! back as a structured [`Problem`] for the caller to render.

use indexmap::IndexMap;
use serde_json::Value;

use crate::decoded::Decoded;
use crate::decoder::Decoder;
use crate::problem::Problem;

/// Evaluate `decoder` against `value`, producing either the decoded value or
/// a path-preserving failure record.
pub(crate) fn eval(decoder: &Decoder, value: &Value) -> Result<Decoded, Problem> {
    match decoder {
        Decoder::Bool => match value {
            Value::Bool(b) => Ok(Decoded::Bool(*b)),
            _ => Err(Problem::primitive("a Bool", value)),
        },

        Decoder::Int => eval_int(value),

        Decoder::Float => match value {
            Value::Number(n) => n
                .as_f64()
                .map(Decoded::Float)
                .ok_or_else(|| Problem::primitive("a Float", value)),
            _ => Err(Problem::primitive("a Float", value)),
        },

        Decoder::String => match value {
            Value::String(s) => Ok(Decoded::String(s.clone())),
            _ => Err(Problem::primitive("a String", value)),
        },

        Decoder::Value => Ok(Decoded::Json(value.clone())),

        Decoder::Null(default) => match value {
            Value::Null => Ok(default.clone()),
            _ => Err(Problem::primitive("null", value)),
        },

        Decoder::List(element) => {
            let items = value
                .as_array()
                .ok_or_else(|| Problem::primitive("a List", value))?;
            eval_elements(element, items)
        }

        Decoder::Array(element) => {
            let items = value
                .as_array()
                .ok_or_else(|| Problem::primitive("an Array", value))?;
            eval_elements(element, items)
        }

        Decoder::Maybe(inner) => Ok(Decoded::Maybe(eval(inner, value).ok().map(Box::new))),

        Decoder::Field(name, inner) => match value.as_object().and_then(|obj| obj.get(name)) {
            Some(field_value) => eval(inner, field_value)
                .map_err(|problem| Problem::Field(name.clone(), Box::new(problem))),
            None => Err(Problem::primitive(
                format!("an object with a field named `{name}`"),
                value,
            )),
        },

        Decoder::Index(i, inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| Problem::primitive("an array", value))?;
            if *i >= items.len() {
                return Err(Problem::primitive(
                    format!(
                        "a longer array. Need index {i} but there are only {} entries",
                        items.len()
                    ),
                    value,
                ));
            }
            eval(inner, &items[*i]).map_err(|problem| Problem::Index(*i, Box::new(problem)))
        }

        Decoder::KeyValuePairs(inner) => {
            let obj = value
                .as_object()
                .ok_or_else(|| Problem::primitive("an object", value))?;
            let mut pairs = Vec::with_capacity(obj.len());
            for (key, field_value) in obj {
                let decoded = eval(inner, field_value)
                    .map_err(|problem| Problem::Field(key.clone(), Box::new(problem)))?;
                pairs.push((key.clone(), decoded));
            }
            Ok(Decoded::Entries(pairs))
        }

        Decoder::Dict(inner) => {
            let obj = value
                .as_object()
                .ok_or_else(|| Problem::primitive("an object", value))?;
            let mut map = IndexMap::with_capacity(obj.len());
            for (key, field_value) in obj {
                let decoded = eval(inner, field_value)
                    .map_err(|problem| Problem::Field(key.clone(), Box::new(problem)))?;
                map.insert(key.clone(), decoded);
            }
            Ok(Decoded::Object(map))
        }

        Decoder::OneOf(alternatives) => {
            let mut problems = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                match eval(alternative, value) {
                    Ok(decoded) => return Ok(decoded),
                    Err(problem) => problems.push(problem),
                }
            }
            Err(Problem::OneOf(problems))
        }

        Decoder::MapMany(combine, decoders) => {
            let mut args = Vec::with_capacity(decoders.len());
            for d in decoders {
                // First failure passes through verbatim, no path segment.
                args.push(eval(d, value)?);
            }
            Ok(combine(args))
        }

        Decoder::AndThen(inner, next) => {
            let first = eval(inner, value)?;
            // The continuation's decoder runs against the original value.
            eval(&next(first), value)
        }

        Decoder::Fail(message) => Err(Problem::Fail(message.clone())),

        Decoder::Succeed(decoded) => Ok(decoded.clone()),
    }
}

/// A JSON number counts as an Int when it is integral: either it already fits
/// `i64` exactly, or its float form is finite with no fractional part (covers
/// values written as `5.0` or `1e10`). Integral magnitudes beyond `i64` are
/// rejected.
fn eval_int(value: &Value) -> Result<Decoded, Problem> {
    let Value::Number(n) = value else {
        return Err(Problem::primitive("an Int", value));
    };

    if let Some(i) = n.as_i64() {
        return Ok(Decoded::Int(i));
    }

    if let Some(f) = n.as_f64() {
        if f.is_finite()
            && f.fract() == 0.0
            && f >= i64::MIN as f64
            && f <= i64::MAX as f64
        {
            return Ok(Decoded::Int(f as i64));
        }
    }

    Err(Problem::primitive("an Int", value))
}

/// Decode every array element in input order; the first failure aborts the
/// whole decode, tagged with the failing element's position.
fn eval_elements(element: &Decoder, items: &[Value]) -> Result<Decoded, Problem> {
    let mut decoded = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match eval(element, item) {
            Ok(v) => decoded.push(v),
            Err(problem) => return Err(Problem::Index(i, Box::new(problem))),
        }
    }
    Ok(Decoded::Array(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;
    use serde_json::json;

    #[test]
    fn test_bool() {
        assert_eq!(eval(&decoder::bool(), &json!(true)), Ok(Decoded::Bool(true)));
        assert_eq!(
            eval(&decoder::bool(), &json!(1)),
            Err(Problem::primitive("a Bool", &json!(1)))
        );
    }

    #[test]
    fn test_int_accepts_integral_numbers() {
        assert_eq!(eval(&decoder::int(), &json!(5)), Ok(Decoded::Int(5)));
        assert_eq!(eval(&decoder::int(), &json!(-5)), Ok(Decoded::Int(-5)));
        assert_eq!(eval(&decoder::int(), &json!(5.0)), Ok(Decoded::Int(5)));
        assert_eq!(
            eval(&decoder::int(), &json!(1e10)),
            Ok(Decoded::Int(10_000_000_000))
        );
    }

    #[test]
    fn test_int_rejects_fractional_and_non_numbers() {
        assert_eq!(
            eval(&decoder::int(), &json!(3.5)),
            Err(Problem::primitive("an Int", &json!(3.5)))
        );
        assert_eq!(
            eval(&decoder::int(), &json!("5")),
            Err(Problem::primitive("an Int", &json!("5")))
        );
    }

    #[test]
    fn test_float_accepts_any_number() {
        assert_eq!(eval(&decoder::float(), &json!(3.5)), Ok(Decoded::Float(3.5)));
        assert_eq!(eval(&decoder::float(), &json!(3)), Ok(Decoded::Float(3.0)));
        assert_eq!(
            eval(&decoder::float(), &json!(null)),
            Err(Problem::primitive("a Float", &json!(null)))
        );
    }

    #[test]
    fn test_string() {
        assert_eq!(
            eval(&decoder::string(), &json!("hi")),
            Ok(Decoded::String("hi".into()))
        );
        assert_eq!(
            eval(&decoder::string(), &json!(true)),
            Err(Problem::primitive("a String", &json!(true)))
        );
    }

    #[test]
    fn test_null_produces_default() {
        assert_eq!(eval(&decoder::null(0), &json!(null)), Ok(Decoded::Int(0)));
        assert_eq!(
            eval(&decoder::null(0), &json!(0)),
            Err(Problem::primitive("null", &json!(0)))
        );
    }

    #[test]
    fn test_value_passthrough() {
        let input = json!({"a": [1, null]});
        assert_eq!(
            eval(&decoder::value(), &input),
            Ok(Decoded::Json(input.clone()))
        );
    }

    #[test]
    fn test_list_preserves_input_order() {
        assert_eq!(
            eval(&decoder::list(decoder::int()), &json!([1, 2, 3])),
            Ok(Decoded::Array(vec![
                Decoded::Int(1),
                Decoded::Int(2),
                Decoded::Int(3),
            ]))
        );
    }

    #[test]
    fn test_list_reports_failing_element_position() {
        assert_eq!(
            eval(&decoder::list(decoder::int()), &json!([1, "two", 3])),
            Err(Problem::Index(
                1,
                Box::new(Problem::primitive("an Int", &json!("two")))
            ))
        );
    }

    #[test]
    fn test_list_and_array_labels_differ() {
        assert_eq!(
            eval(&decoder::list(decoder::int()), &json!(5)),
            Err(Problem::primitive("a List", &json!(5)))
        );
        assert_eq!(
            eval(&decoder::array(decoder::int()), &json!(5)),
            Err(Problem::primitive("an Array", &json!(5)))
        );
    }

    #[test]
    fn test_maybe_never_fails() {
        assert_eq!(
            eval(&decoder::maybe(decoder::int()), &json!(4)),
            Ok(Decoded::Maybe(Some(Box::new(Decoded::Int(4)))))
        );
        assert_eq!(
            eval(&decoder::maybe(decoder::int()), &json!("four")),
            Ok(Decoded::Maybe(None))
        );
    }

    #[test]
    fn test_field_decodes_and_wraps_nested_failure() {
        let d = decoder::field("a", decoder::int());
        assert_eq!(eval(&d, &json!({"a": 5})), Ok(Decoded::Int(5)));
        assert_eq!(
            eval(&d, &json!({"a": "5"})),
            Err(Problem::Field(
                "a".into(),
                Box::new(Problem::primitive("an Int", &json!("5")))
            ))
        );
    }

    #[test]
    fn test_field_shape_mismatch_is_not_wrapped() {
        let d = decoder::field("a", decoder::int());
        assert_eq!(
            eval(&d, &json!({"b": 5})),
            Err(Problem::primitive(
                "an object with a field named `a`",
                &json!({"b": 5})
            ))
        );
        assert_eq!(
            eval(&d, &json!([1, 2])),
            Err(Problem::primitive(
                "an object with a field named `a`",
                &json!([1, 2])
            ))
        );
        assert_eq!(
            eval(&d, &json!(null)),
            Err(Problem::primitive(
                "an object with a field named `a`",
                &json!(null)
            ))
        );
    }

    #[test]
    fn test_index_decodes_and_checks_length() {
        let d = decoder::index(2, decoder::string());
        assert_eq!(
            eval(&d, &json!(["x", "y", "z"])),
            Ok(Decoded::String("z".into()))
        );
        assert_eq!(
            eval(&d, &json!(["x", "y"])),
            Err(Problem::primitive(
                "a longer array. Need index 2 but there are only 2 entries",
                &json!(["x", "y"])
            ))
        );
        assert_eq!(
            eval(&d, &json!("xyz")),
            Err(Problem::primitive("an array", &json!("xyz")))
        );
    }

    #[test]
    fn test_index_wraps_nested_failure() {
        let d = decoder::index(1, decoder::int());
        assert_eq!(
            eval(&d, &json!([1, "two"])),
            Err(Problem::Index(
                1,
                Box::new(Problem::primitive("an Int", &json!("two")))
            ))
        );
    }

    #[test]
    fn test_key_value_pairs() {
        let d = decoder::key_value_pairs(decoder::int());
        assert_eq!(
            eval(&d, &json!({"a": 1, "b": 2})),
            Ok(Decoded::Entries(vec![
                ("a".into(), Decoded::Int(1)),
                ("b".into(), Decoded::Int(2)),
            ]))
        );
        assert_eq!(
            eval(&d, &json!([1, 2])),
            Err(Problem::primitive("an object", &json!([1, 2])))
        );
        assert_eq!(
            eval(&d, &json!(null)),
            Err(Problem::primitive("an object", &json!(null)))
        );
    }

    #[test]
    fn test_key_value_pairs_wraps_failing_key() {
        let d = decoder::key_value_pairs(decoder::int());
        assert_eq!(
            eval(&d, &json!({"a": 1, "b": "x"})),
            Err(Problem::Field(
                "b".into(),
                Box::new(Problem::primitive("an Int", &json!("x")))
            ))
        );
    }

    #[test]
    fn test_dict_collects_every_key() {
        let d = decoder::dict(decoder::bool());
        let decoded = eval(&d, &json!({"on": true, "off": false})).unwrap();
        let map = decoded.as_object().unwrap();
        assert_eq!(map.get("on"), Some(&Decoded::Bool(true)));
        assert_eq!(map.get("off"), Some(&Decoded::Bool(false)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_one_of_first_success_wins() {
        let d = decoder::one_of(vec![decoder::int(), decoder::string()]);
        assert_eq!(eval(&d, &json!(3)), Ok(Decoded::Int(3)));
        assert_eq!(eval(&d, &json!("s")), Ok(Decoded::String("s".into())));
    }

    #[test]
    fn test_one_of_collects_every_branch_failure() {
        let d = decoder::one_of(vec![decoder::int(), decoder::string()]);
        assert_eq!(
            eval(&d, &json!(true)),
            Err(Problem::OneOf(vec![
                Problem::primitive("an Int", &json!(true)),
                Problem::primitive("a String", &json!(true)),
            ]))
        );
    }

    #[test]
    fn test_map_many_threads_values_in_order() {
        let d = decoder::map_many(
            Decoded::Array,
            vec![
                decoder::field("x", decoder::int()),
                decoder::field("y", decoder::int()),
            ],
        );
        assert_eq!(
            eval(&d, &json!({"x": 1, "y": 2})),
            Ok(Decoded::Array(vec![Decoded::Int(1), Decoded::Int(2)]))
        );
    }

    #[test]
    fn test_map_many_first_failure_passes_through_verbatim() {
        let d = decoder::map_many(
            Decoded::Array,
            vec![
                decoder::field("x", decoder::int()),
                decoder::field("y", decoder::int()),
            ],
        );
        assert_eq!(
            eval(&d, &json!({"x": 1})),
            Err(Problem::primitive(
                "an object with a field named `y`",
                &json!({"x": 1})
            ))
        );
    }

    #[test]
    fn test_and_then_picks_decoder_from_value() {
        let d = decoder::and_then(decoder::field("version", decoder::int()), |v| {
            match v.as_i64() {
                Some(1) => decoder::field("name", decoder::string()),
                Some(2) => decoder::field("fullName", decoder::string()),
                _ => decoder::fail("unknown version"),
            }
        });
        assert_eq!(
            eval(&d, &json!({"version": 2, "fullName": "Ada Lovelace"})),
            Ok(Decoded::String("Ada Lovelace".into()))
        );
        assert_eq!(
            eval(&d, &json!({"version": 9})),
            Err(Problem::Fail("unknown version".into()))
        );
    }

    #[test]
    fn test_and_then_skips_continuation_on_failure() {
        let d = decoder::and_then(decoder::int(), |_| decoder::fail("should not run"));
        assert_eq!(
            eval(&d, &json!("nope")),
            Err(Problem::primitive("an Int", &json!("nope")))
        );
    }

    #[test]
    fn test_succeed_and_fail_ignore_input() {
        assert_eq!(eval(&decoder::succeed(7), &json!("x")), Ok(Decoded::Int(7)));
        assert_eq!(
            eval(&decoder::fail("boom"), &json!("x")),
            Err(Problem::Fail("boom".into()))
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let d = decoder::field("a", decoder::list(decoder::int()));
        let input = json!({"a": [1, 2]});
        assert_eq!(eval(&d, &input), eval(&d, &input));
    }
}
