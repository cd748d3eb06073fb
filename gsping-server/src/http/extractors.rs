//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use super::error::ApiError;
use crate::models::Message;

/// Lenient JSON body for `POST /send`.
///
/// An empty (or whitespace-only) body yields an empty value. Anything else
/// must be a JSON object matching [`Message`]; the Content-Type header is not
/// checked.
pub struct SendPayload(pub Message);

impl<S> FromRequest<S> for SendPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Message::default()));
        }

        let message = serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest {
            message: format!("invalid JSON body: {}", e),
        })?;

        Ok(Self(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    async fn extract(body: &'static str) -> Result<Message, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/send")
            .body(Body::from(body))
            .unwrap();
        SendPayload::from_request(req, &()).await.map(|p| p.0)
    }

    #[tokio::test]
    async fn empty_body_is_empty_value() {
        assert_eq!(extract("").await.unwrap(), Message::default());
        assert_eq!(extract(" \n").await.unwrap(), Message::default());
    }

    #[tokio::test]
    async fn decodes_value() {
        assert_eq!(
            extract(r#"{"value":"totoro"}"#).await.unwrap(),
            Message::new("totoro")
        );
    }

    #[tokio::test]
    async fn oversized_body_keeps_413() {
        // over axum's 2 MiB default body limit
        let req = Request::builder()
            .method("POST")
            .uri("/send")
            .body(Body::from(vec![b'a'; 3 * 1024 * 1024]))
            .unwrap();

        let err = SendPayload::from_request(req, &()).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let err = extract("{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }
}
