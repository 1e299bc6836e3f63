//! Serde helpers for lenient JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for identifiers, counts and command tokens.
//! - Keep parsing behavior centralized so entity declarations stay readable.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//!
//! Invariants / assumptions:
//! - The server may return numeric fields as `"123"` strings or as `123` numbers
//!   (timestamps and some identifiers are sent as strings).

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<U64OrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(U64OrString::U64(v)) => Ok(Some(v)),
        Some(U64OrString::I64(v)) => Ok(Some(u64::try_from(v).map_err(D::Error::custom)?)),
        Some(U64OrString::String(s)) => Ok(Some(s.parse::<u64>().map_err(D::Error::custom)?)),
    }
}

pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(StringOrNumber::String(s)) => Ok(Some(s)),
        Some(StringOrNumber::U64(v)) => Ok(Some(v.to_string())),
        Some(StringOrNumber::I64(v)) => Ok(Some(v.to_string())),
        Some(StringOrNumber::F64(v)) => Ok(Some(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_u64_from_string_or_number_accepts_number_and_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
            value: Option<u64>,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": 3 }"#).unwrap();
        assert_eq!(parsed.value, Some(3));

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": "3" }"#).unwrap();
        assert_eq!(parsed.value, Some(3));
    }

    #[test]
    fn test_opt_u64_from_string_or_number_accepts_null_and_missing() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
            value: Option<u64>,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": null }"#).unwrap();
        assert_eq!(parsed.value, None);

        let parsed: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.value, None);
    }

    #[test]
    fn test_opt_u64_from_string_or_number_rejects_negative() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
            #[allow(dead_code)]
            value: Option<u64>,
        }

        assert!(serde_json::from_str::<Wrapper>(r#"{ "value": -4 }"#).is_err());
    }

    #[test]
    fn test_opt_string_from_number_or_string_accepts_number_and_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
            value: Option<String>,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": 3 }"#).unwrap();
        assert_eq!(parsed.value.as_deref(), Some("3"));

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": "1550000000000" }"#).unwrap();
        assert_eq!(parsed.value.as_deref(), Some("1550000000000"));
    }

    #[test]
    fn test_helpers_work_on_json_values() {
        let id = opt_u64_from_string_or_number(serde_json::json!("42")).unwrap();
        assert_eq!(id, Some(42));

        let token = opt_string_from_number_or_string(serde_json::Value::Null).unwrap();
        assert_eq!(token, None);
    }
}
