use serde::{Deserialize, Serialize};

/// The submitted form: a single `message` field.
///
/// The field is optional on the wire so a missing value can be rejected
/// explicitly instead of failing to deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitForm {
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitForm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Result of a submission: the original text and the generated reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub user_message: String,
    pub ai_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_keys() {
        let response = SubmitResponse {
            user_message: "hi".to_string(),
            ai_response: "hello".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"userMessage":"hi","aiResponse":"hello"}"#);
    }

    #[test]
    fn form_without_message_field_parses() {
        let form: SubmitForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.message, None);
    }

    #[test]
    fn form_with_message_field_parses() {
        let form: SubmitForm = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert_eq!(form, SubmitForm::new("hello"));
    }
}
