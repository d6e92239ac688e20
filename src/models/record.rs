//! Record models and request bodies for the `bookBank` table

use crate::error::{validation_error, AppError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Message returned when either field is missing or falsy
pub const FIELDS_REQUIRED: &str = "Question and answer are required.";

/// One row of the `bookBank` table.
///
/// The columns themselves are nullable; rows written through this service
/// always carry both texts, rows written by other clients may not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i32,
    pub ques: Option<String>,
    pub ans: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields of a create/update request body as the client sent them.
///
/// JSON values are read leniently: non-empty strings and non-zero numbers
/// count as present, `true` is stored as `"true"`, and `null`, `false`, `0`,
/// arrays and objects count as absent. Empty strings survive this step and
/// are rejected by validation.
#[derive(Debug, Default, Validate)]
pub struct RecordInput {
    #[validate(required(message = "Question and answer are required."))]
    #[validate(length(min = 1, message = "Question and answer are required."))]
    pub ques: Option<String>,

    #[validate(required(message = "Question and answer are required."))]
    #[validate(length(min = 1, message = "Question and answer are required."))]
    pub ans: Option<String>,
}

/// Validated question/answer pair, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub ques: String,
    pub ans: String,
}

impl RecordInput {
    /// Read the input from a raw request body.
    ///
    /// Only `application/json` bodies are parsed. Any other content type, or
    /// an empty body, is treated as `{}`; a JSON body that does not parse is
    /// rejected.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, AppError> {
        if !content_type.is_some_and(is_json) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| validation_error(format!("Invalid JSON body: {}", e)))?;

        Ok(Self {
            ques: value.get("ques").and_then(truthy_text),
            ans: value.get("ans").and_then(truthy_text),
        })
    }

    /// Check presence of both fields and hand back the pair to store
    pub fn validated(self) -> Result<NewRecord, AppError> {
        self.validate()
            .map_err(|_| validation_error(FIELDS_REQUIRED))?;

        match (self.ques, self.ans) {
            (Some(ques), Some(ans)) => Ok(NewRecord { ques, ans }),
            _ => Err(validation_error(FIELDS_REQUIRED)),
        }
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn validated(body: &str) -> Result<NewRecord, AppError> {
        RecordInput::from_body(Some("application/json"), body.as_bytes())?.validated()
    }

    #[test]
    fn test_valid_body() {
        let record = validated(r#"{"ques":"2+2?","ans":"4"}"#).unwrap();
        assert_eq!(
            record,
            NewRecord {
                ques: "2+2?".to_string(),
                ans: "4".to_string()
            }
        );
    }

    #[test]
    fn test_missing_question() {
        let err = validated(r#"{"ans":"x"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == FIELDS_REQUIRED));
    }

    #[test]
    fn test_empty_strings_rejected() {
        assert!(validated(r#"{"ques":"","ans":"x"}"#).is_err());
        assert!(validated(r#"{"ques":"q","ans":""}"#).is_err());
    }

    #[test]
    fn test_falsy_values_rejected() {
        assert!(validated(r#"{"ques":null,"ans":"x"}"#).is_err());
        assert!(validated(r#"{"ques":false,"ans":"x"}"#).is_err());
        assert!(validated(r#"{"ques":0,"ans":"x"}"#).is_err());
    }

    #[test]
    fn test_truthy_scalars_become_text() {
        let record = validated(r#"{"ques":42,"ans":true}"#).unwrap();
        assert_eq!(record.ques, "42");
        assert_eq!(record.ans, "true");
    }

    #[test]
    fn test_empty_body_is_missing_fields() {
        let err = validated("").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == FIELDS_REQUIRED));
    }

    #[test]
    fn test_non_object_body_is_missing_fields() {
        let err = validated(r#"["q","a"]"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == FIELDS_REQUIRED));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RecordInput::from_body(Some("application/json"), b"{ques:").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_json_content_type_with_parameters() {
        let body = br#"{"ques":"q","ans":"a"}"#;
        let input = RecordInput::from_body(Some("Application/JSON; charset=utf-8"), body).unwrap();
        assert!(input.validated().is_ok());
    }

    #[test]
    fn test_other_content_types_are_not_parsed() {
        let body = br#"{"ques":"q","ans":"a"}"#;
        for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
            let err = RecordInput::from_body(content_type, body)
                .unwrap()
                .validated()
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(ref msg) if msg == FIELDS_REQUIRED));
        }
    }

    #[test]
    fn test_null_columns_serialize_as_null() {
        let record = Record {
            id: 7,
            ques: None,
            ans: Some("a".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ques"], Value::Null);
        assert_eq!(json["ans"], "a");
    }
}
