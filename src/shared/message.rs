/**
 * Response Envelope
 *
 * Every response body, success or failure, has the shape
 * `{"message": <payload>}`. Errors put their display string in `message`.
 */
use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every API payload
///
/// # Example
/// ```rust
/// use emporium::shared::ApiMessage;
///
/// let body = serde_json::to_value(ApiMessage::new("updated")).unwrap();
/// assert_eq!(body["message"], "updated");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiMessage<T> {
    /// The payload or error string
    pub message: T,
}

impl<T> ApiMessage<T> {
    /// Wrap a payload
    pub fn new(message: T) -> Self {
        Self { message }
    }

    /// Unwrap the payload
    pub fn into_inner(self) -> T {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(ApiMessage::new(vec![1, 2, 3])).unwrap();
        assert_eq!(value, serde_json::json!({ "message": [1, 2, 3] }));
    }

    #[test]
    fn test_envelope_deserializes() {
        let parsed: ApiMessage<String> =
            serde_json::from_str(r#"{"message":"Success"}"#).unwrap();
        assert_eq!(parsed.into_inner(), "Success");
    }
}
