//! Predict request model

use serde::Deserialize;
use validator::Validate;

use crate::{AppError, AppResult};

/// Body of `POST /predict`
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(required)]
    pub message: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    /// Email or phone number used for breach lookup
    #[serde(default)]
    pub email: Option<String>,
}

/// Validated request, ready for the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictInput {
    pub message: String,
    pub sender: String,
    pub identifier: Option<String>,
}

impl PredictRequest {
    pub fn into_input(self) -> AppResult<PredictInput> {
        self.validate().map_err(|_| AppError::MissingField("message"))?;

        let message = self.message.ok_or(AppError::MissingField("message"))?;

        Ok(PredictInput {
            message,
            sender: self.sender.unwrap_or_default(),
            identifier: self.email.filter(|e| !e.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> PredictRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_full_request() {
        let input = parse(r#"{"message": "Meeting at 5", "sender": "+910000000000", "email": "test@example.com"}"#)
            .into_input()
            .unwrap();

        assert_eq!(input.message, "Meeting at 5");
        assert_eq!(input.sender, "+910000000000");
        assert_eq!(input.identifier.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn test_optional_fields_default() {
        let input = parse(r#"{"message": "Hi"}"#).into_input().unwrap();
        assert_eq!(input.sender, "");
        assert_eq!(input.identifier, None);
    }

    #[test]
    fn test_empty_email_is_absent() {
        let input = parse(r#"{"message": "Hi", "email": ""}"#).into_input().unwrap();
        assert_eq!(input.identifier, None);
    }

    #[test]
    fn test_missing_message() {
        let err = parse(r#"{"sender": "x"}"#).into_input().unwrap_err();
        assert!(matches!(err, AppError::MissingField("message")));

        let err = parse(r#"{"message": null}"#).into_input().unwrap_err();
        assert!(matches!(err, AppError::MissingField("message")));
    }

    #[test]
    fn test_empty_message_accepted() {
        let input = parse(r#"{"message": ""}"#).into_input().unwrap();
        assert_eq!(input.message, "");
    }

    #[test]
    fn test_wrong_type_rejected_by_schema() {
        assert!(serde_json::from_str::<PredictRequest>(r#"{"message": 42}"#).is_err());
    }
}
