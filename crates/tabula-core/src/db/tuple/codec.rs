//! Module: tuple::codec
//! Responsibility: order-preserving field encodings for every `Encoding`.
//! Does not own: tuple layout or descriptor comparison rules.
//!
//! Invariants:
//! - Every non-null encoded field is non-empty; null is absence.
//! - Byte order of encoded fields equals the logical order of their values.

use crate::value::Value;
use tabula_primitives::{Encoding, EncodingFamily};
use thiserror::Error as ThisError;

const ESCAPE: u8 = 0x00;
const ESCAPED_ZERO: u8 = 0xFF;
const TERMINATOR: u8 = 0x00;

///
/// CodecError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("value {value} is out of range for {encoding}")]
    OutOfRange { encoding: Encoding, value: String },

    #[error("cannot encode {kind} value as {encoding}")]
    TypeMismatch {
        encoding: Encoding,
        kind: &'static str,
    },

    #[error("malformed {encoding} field: {reason}")]
    Malformed {
        encoding: Encoding,
        reason: &'static str,
    },

    #[error("invalid tuple layout: {reason}")]
    InvalidLayout { reason: &'static str },

    #[error("field {field} is not nullable")]
    NullNotAllowed { field: usize },

    #[error("expected {expected} fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },
}

/// Encode one logical value; `Ok(None)` is the null field.
pub fn encode_value(encoding: Encoding, value: &Value) -> Result<Option<Vec<u8>>, CodecError> {
    if value.is_null() {
        return Ok(None);
    }

    let mismatch = || CodecError::TypeMismatch {
        encoding,
        kind: value.kind(),
    };
    let out_of_range = || CodecError::OutOfRange {
        encoding,
        value: value.to_string(),
    };

    let encoded = match (encoding.family(), value) {
        (EncodingFamily::Signed, Value::Int(v)) => {
            encode_signed(*v, width_of(encoding)).ok_or_else(out_of_range)?
        }
        (EncodingFamily::Signed, Value::Uint(v)) => {
            let v = i64::try_from(*v).map_err(|_| out_of_range())?;
            encode_signed(v, width_of(encoding)).ok_or_else(out_of_range)?
        }
        (EncodingFamily::Unsigned, Value::Uint(v)) => {
            encode_unsigned(*v, width_of(encoding)).ok_or_else(out_of_range)?
        }
        (EncodingFamily::Unsigned, Value::Int(v)) => {
            let v = u64::try_from(*v).map_err(|_| out_of_range())?;
            encode_unsigned(v, width_of(encoding)).ok_or_else(out_of_range)?
        }
        (EncodingFamily::Float, Value::Float(v)) => encode_float(*v).to_vec(),
        (EncodingFamily::Bool, Value::Bool(v)) => vec![u8::from(*v)],
        (EncodingFamily::Text, Value::Text(v)) => encode_escaped(v.as_bytes()),
        (EncodingFamily::Bytes, Value::Bytes(v)) => encode_escaped(v),
        _ => return Err(mismatch()),
    };

    Ok(Some(encoded))
}

/// Decode one raw field back into a logical value.
pub fn decode_value(encoding: Encoding, field: Option<&[u8]>) -> Result<Value, CodecError> {
    let Some(bytes) = field else {
        return Ok(Value::Null);
    };

    if let Some(width) = encoding.fixed_width()
        && bytes.len() != width
    {
        return Err(CodecError::Malformed {
            encoding,
            reason: "unexpected field width",
        });
    }

    let value = match encoding.family() {
        EncodingFamily::Signed => Value::Int(decode_signed(bytes)),
        EncodingFamily::Unsigned => Value::Uint(read_be(bytes)),
        EncodingFamily::Float => Value::Float(decode_float(read_be(bytes))),
        EncodingFamily::Bool => match bytes[0] {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            _ => {
                return Err(CodecError::Malformed {
                    encoding,
                    reason: "bool byte must be 0 or 1",
                });
            }
        },
        EncodingFamily::Text => {
            let raw = decode_escaped(encoding, bytes)?;
            let text = String::from_utf8(raw).map_err(|_| CodecError::Malformed {
                encoding,
                reason: "invalid utf-8",
            })?;
            Value::Text(text)
        }
        EncodingFamily::Bytes => Value::Bytes(decode_escaped(encoding, bytes)?),
    };

    Ok(value)
}

/// Render one raw field for humans; undecodable bytes fall back to hex.
/// The empty string renders as `""` so it stays distinguishable from no field.
#[must_use]
pub fn format_field(encoding: Encoding, field: Option<&[u8]>) -> String {
    match decode_value(encoding, field) {
        Ok(Value::Text(text)) if text.is_empty() => "\"\"".to_string(),
        Ok(value) => value.to_string(),
        Err(_) => Value::Bytes(field.unwrap_or_default().to_vec()).to_string(),
    }
}

const fn width_of(encoding: Encoding) -> usize {
    match encoding.fixed_width() {
        Some(width) => width,
        None => 8,
    }
}

#[expect(clippy::cast_sign_loss)]
fn encode_signed(v: i64, width: usize) -> Option<Vec<u8>> {
    let bits = width * 8;
    if bits < 64 {
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if v < min || v > max {
            return None;
        }
    }

    let biased = (v as u64) ^ (1u64 << (bits - 1));

    Some(biased.to_be_bytes()[8 - width..].to_vec())
}

#[expect(clippy::cast_possible_wrap)]
fn decode_signed(bytes: &[u8]) -> i64 {
    let bits = bytes.len() * 8;
    let raw = read_be(bytes) ^ (1u64 << (bits - 1));
    let shift = 64 - bits;

    ((raw << shift) as i64) >> shift
}

fn encode_unsigned(v: u64, width: usize) -> Option<Vec<u8>> {
    let bits = width * 8;
    if bits < 64 && v >= (1u64 << bits) {
        return None;
    }

    Some(v.to_be_bytes()[8 - width..].to_vec())
}

const fn encode_float(v: f64) -> [u8; 8] {
    let bits = v.to_bits();
    let ordered = if bits >> 63 == 1 {
        !bits
    } else {
        bits | (1 << 63)
    };

    ordered.to_be_bytes()
}

const fn decode_float(raw: u64) -> f64 {
    let bits = if raw >> 63 == 1 {
        raw & !(1 << 63)
    } else {
        !raw
    };

    f64::from_bits(bits)
}

fn read_be(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

fn encode_escaped(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() + 1);
    for byte in raw {
        out.push(*byte);
        if *byte == ESCAPE {
            out.push(ESCAPED_ZERO);
        }
    }
    out.push(TERMINATOR);

    out
}

fn decode_escaped(encoding: Encoding, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let malformed = |reason| CodecError::Malformed { encoding, reason };

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte != ESCAPE {
            out.push(byte);
            i += 1;
            continue;
        }

        match bytes.get(i + 1) {
            None => return Ok(out),
            Some(&ESCAPED_ZERO) => {
                out.push(0);
                i += 2;
            }
            Some(_) => return Err(malformed("invalid escape sequence")),
        }
    }

    Err(malformed("missing terminator"))
}
