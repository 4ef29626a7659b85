use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::ValidationError;

/// A JSON request body that is validated by hand.
///
/// Unlike `axum::Json`, malformed bodies are reported in the API's own
/// error format. An empty body reads as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationError::single("", e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Null));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ValidationError::single("", format!("invalid JSON: {e}")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<JsonBody, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        JsonBody::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_parses_json() {
        let JsonBody(value) = extract(r#"{"name":"Jane"}"#).await.unwrap();
        assert_eq!(value["name"], "Jane");
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        assert_eq!(extract("").await.unwrap(), JsonBody(Value::Null));
        assert_eq!(extract("  \n").await.unwrap(), JsonBody(Value::Null));
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        match extract("{not json").await {
            Err(ApiError::Validation(e)) => {
                assert_eq!(e.issues[0].path, "");
                assert!(e.issues[0].message.starts_with("invalid JSON"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
}
