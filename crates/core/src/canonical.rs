//! Canonical JSON encoding used as hash input.
//!
//! Object keys are written in sorted byte order at every nesting level and no
//! whitespace is emitted, so two records with the same logical content always
//! produce the same bytes no matter how their fields were declared or built.
//! Array elements keep their order.

use serde::Serialize;
use serde_json::Value;

/// Encode a record into its canonical byte form.
///
/// # Panics
///
/// Panics if the record cannot be represented as JSON (for example a map with
/// non-string keys). Such a record is a programming error, not a runtime
/// condition.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(record: &T) -> Vec<u8> {
    let value = serde_json::to_value(record)
        .unwrap_or_else(|e| panic!("record is not canonically encodable: {e}"));
    let mut out = Vec::with_capacity(128);
    write_value(&value, &mut out);
    out
}

/// Same as [`to_canonical_bytes`], returned as a string.
pub fn to_canonical_string<T: Serialize + ?Sized>(record: &T) -> String {
    // Only valid UTF-8 is ever written.
    String::from_utf8(to_canonical_bytes(record)).expect("canonical JSON is valid UTF-8")
}

fn write_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(key, out);
                out.push(b':');
                write_value(item, out);
            }
            out.push(b'}');
        }
    }
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    serde_json::to_writer(&mut *out, s).expect("writing to a Vec cannot fail");
}
