//! Text codec for setting values.
//!
//! This is the registry side of the config-file contract: the file
//! parser hands over raw value text, and this module turns it into a
//! [`SettingValue`] according to the descriptor's primitive type, or
//! back again. Encoding is the exact inverse of decoding; many-of-many
//! token sets are canonicalized to token-table order so round trips are
//! stable.

use crate::kind::{SettingKind, ValueType};
use crate::value::SettingValue;

/// Errors from decoding config text. The caller is expected to fall back
/// to the descriptor's default and keep going; none of these abort a
/// config load.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("cannot parse `{0}`")]
    InvalidFormat(String),
    #[error("`{0}` is not a recognised token")]
    InvalidEnum(String),
    #[error("expected {expected} list elements, got {got}")]
    WrongListLength { expected: usize, got: usize },
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
fn parse_int(text: &str) -> Result<i64, TextError> {
    let t = text.trim();
    let (negative, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    let parsed = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => body.parse::<i64>(),
    };
    let v = parsed.map_err(|_| TextError::InvalidFormat(text.to_string()))?;
    Ok(if negative { -v } else { v })
}

fn parse_bool(text: &str) -> Result<bool, TextError> {
    match text.trim() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TextError::InvalidFormat(other.to_string())),
    }
}

/// Case-sensitive exact token lookup. Empty table entries reserve bit
/// positions and never match.
fn lookup_token(tokens: &[&str], text: &str) -> Option<i64> {
    tokens
        .iter()
        .position(|t| !t.is_empty() && *t == text)
        .map(|i| i as i64)
}

/// Decode raw config text into a value for a descriptor with the given
/// type, token table, and element count.
pub fn decode(
    ty: &ValueType,
    tokens: &[&'static str],
    element_count: usize,
    convert: Option<fn(&str) -> Option<i64>>,
    text: &str,
) -> Result<SettingValue, TextError> {
    match ty.kind {
        SettingKind::Signed | SettingKind::Unsigned if element_count > 1 => {
            let parts: Vec<&str> = text.split(',').collect();
            if parts.len() != element_count {
                return Err(TextError::WrongListLength {
                    expected: element_count,
                    got: parts.len(),
                });
            }
            let mut values = Vec::with_capacity(parts.len());
            for part in parts {
                values.push(parse_int(part)?);
            }
            Ok(SettingValue::List(values))
        }
        SettingKind::Signed | SettingKind::Unsigned => Ok(SettingValue::Int(parse_int(text)?)),
        SettingKind::Bool => Ok(SettingValue::Bool(parse_bool(text)?)),
        SettingKind::Str => Ok(SettingValue::Str(text.to_string())),
        SettingKind::OneOfMany => {
            let token = text.trim();
            if let Some(index) = lookup_token(tokens, token) {
                return Ok(SettingValue::Int(index));
            }
            if let Some(convert) = convert {
                if let Some(v) = convert(token) {
                    return Ok(SettingValue::Int(v));
                }
            }
            Err(TextError::InvalidEnum(token.to_string()))
        }
        SettingKind::ManyOfMany => {
            let mut mask = 0i64;
            for token in text.split('|') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                let bit = lookup_token(tokens, token)
                    .ok_or_else(|| TextError::InvalidEnum(token.to_string()))?;
                mask |= 1 << bit;
            }
            Ok(SettingValue::Int(mask))
        }
    }
}

/// Encode a value as config text. The inverse of [`decode`] for every
/// value that decode can produce.
pub fn encode(ty: &ValueType, tokens: &[&'static str], value: &SettingValue) -> String {
    match value {
        SettingValue::Int(v) => match ty.kind {
            SettingKind::OneOfMany => tokens.get(*v as usize).copied().unwrap_or("").to_string(),
            SettingKind::ManyOfMany => {
                let mut parts = Vec::new();
                for (bit, token) in tokens.iter().enumerate() {
                    if !token.is_empty() && v & (1 << bit) != 0 {
                        parts.push(*token);
                    }
                }
                parts.join("|")
            }
            _ => v.to_string(),
        },
        SettingValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        SettingValue::Str(s) => s.clone(),
        SettingValue::List(vs) => vs
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Width;

    const CLIMATES: &[&str] = &["temperate", "arctic", "tropic", "toyland"];
    const DISPLAY: &[&str] = &["town_names", "station_names", "signs", "", "full_detail"];

    fn int_ty() -> ValueType {
        ValueType::unsigned(Width::B4)
    }

    #[test]
    fn decode_decimal_and_hex() {
        assert_eq!(
            decode(&int_ty(), &[], 1, None, "42").unwrap(),
            SettingValue::Int(42)
        );
        assert_eq!(
            decode(&int_ty(), &[], 1, None, "0x1F").unwrap(),
            SettingValue::Int(31)
        );
        assert_eq!(
            decode(&ValueType::signed(Width::B2), &[], 1, None, "-12").unwrap(),
            SettingValue::Int(-12)
        );
    }

    #[test]
    fn decode_garbage_is_invalid_format() {
        let err = decode(&int_ty(), &[], 1, None, "fast").unwrap_err();
        assert!(matches!(err, TextError::InvalidFormat(_)));
    }

    #[test]
    fn decode_bool_token_set() {
        for t in ["true", "on", "yes", "1"] {
            assert_eq!(
                decode(&ValueType::boolean(), &[], 1, None, t).unwrap(),
                SettingValue::Bool(true)
            );
        }
        for t in ["false", "off", "no", "0"] {
            assert_eq!(
                decode(&ValueType::boolean(), &[], 1, None, t).unwrap(),
                SettingValue::Bool(false)
            );
        }
        assert!(decode(&ValueType::boolean(), &[], 1, None, "maybe").is_err());
    }

    #[test]
    fn decode_one_of_many_exact_match() {
        let ty = ValueType::one_of(Width::B1);
        assert_eq!(
            decode(&ty, CLIMATES, 1, None, "toyland").unwrap(),
            SettingValue::Int(3)
        );
        // Case-sensitive, whole-token only.
        assert!(decode(&ty, CLIMATES, 1, None, "Toyland").is_err());
        assert!(decode(&ty, CLIMATES, 1, None, "tropical").is_err());
    }

    #[test]
    fn decode_one_of_many_last_token() {
        // Index 3 of a 4-token table decodes; an out-of-table token fails.
        let ty = ValueType::one_of(Width::B1);
        assert_eq!(
            decode(&ty, CLIMATES, 1, None, "toyland").unwrap(),
            SettingValue::Int(3)
        );
        let err = decode(&ty, CLIMATES, 1, None, "lunar").unwrap_err();
        assert!(matches!(err, TextError::InvalidEnum(_)));
    }

    #[test]
    fn decode_one_of_many_convert_fallback() {
        fn legacy(token: &str) -> Option<i64> {
            (token == "candy").then_some(3)
        }
        let ty = ValueType::one_of(Width::B1);
        assert_eq!(
            decode(&ty, CLIMATES, 1, Some(legacy), "candy").unwrap(),
            SettingValue::Int(3)
        );
        assert!(decode(&ty, CLIMATES, 1, Some(legacy), "lunar").is_err());
    }

    #[test]
    fn decode_many_of_many_ors_bits() {
        let ty = ValueType::many_of(Width::B1);
        assert_eq!(
            decode(&ty, DISPLAY, 1, None, "signs|town_names").unwrap(),
            SettingValue::Int(0b101)
        );
        assert_eq!(
            decode(&ty, DISPLAY, 1, None, "").unwrap(),
            SettingValue::Int(0)
        );
        assert!(decode(&ty, DISPLAY, 1, None, "signs|satellites").is_err());
    }

    #[test]
    fn reserved_bit_token_never_matches() {
        let ty = ValueType::many_of(Width::B1);
        // Index 3 of DISPLAY is a reserved empty entry.
        assert_eq!(
            decode(&ty, DISPLAY, 1, None, "full_detail").unwrap(),
            SettingValue::Int(0b10000)
        );
    }

    #[test]
    fn decode_list_exact_length() {
        let ty = ValueType::signed(Width::B4);
        assert_eq!(
            decode(&ty, &[], 2, None, "640,480").unwrap(),
            SettingValue::List(vec![640, 480])
        );
        let err = decode(&ty, &[], 2, None, "640").unwrap_err();
        assert!(matches!(err, TextError::WrongListLength { expected: 2, got: 1 }));
    }

    #[test]
    fn encode_many_of_many_canonical_order() {
        let ty = ValueType::many_of(Width::B1);
        // Bits set "out of order" still encode in table order.
        let text = encode(&ty, DISPLAY, &SettingValue::Int(0b101));
        assert_eq!(text, "town_names|signs");
        assert_eq!(
            decode(&ty, DISPLAY, 1, None, &text).unwrap(),
            SettingValue::Int(0b101)
        );
    }

    #[test]
    fn encode_round_trips_every_kind() {
        let omany = ValueType::one_of(Width::B1);
        for (i, _) in CLIMATES.iter().enumerate() {
            let v = SettingValue::Int(i as i64);
            let text = encode(&omany, CLIMATES, &v);
            assert_eq!(decode(&omany, CLIMATES, 1, None, &text).unwrap(), v);
        }

        let b = ValueType::boolean();
        for v in [SettingValue::Bool(true), SettingValue::Bool(false)] {
            assert_eq!(decode(&b, &[], 1, None, &encode(&b, &[], &v)).unwrap(), v);
        }

        let list = ValueType::unsigned(Width::B2);
        let v = SettingValue::List(vec![1, 22, 333]);
        assert_eq!(
            decode(&list, &[], 3, None, &encode(&list, &[], &v)).unwrap(),
            v
        );
    }
}
