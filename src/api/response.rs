use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::models::MessageResponse;
use crate::error::AppError;

pub fn message(status: StatusCode, message: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

/// Turns a handler panic into the generic 500 reply.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    AppError::Panic(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNEXPECTED_ERROR;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn message_reply_carries_status_and_text() {
        let response = message(StatusCode::OK, "Quiz data is not available yet.").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Quiz data is not available yet." })
        );
    }

    #[tokio::test]
    async fn panic_payloads_map_to_generic_500() {
        let payloads: Vec<Box<dyn Any + Send>> = vec![
            Box::new("static message") as Box<dyn Any + Send>,
            Box::new(String::from("formatted message")) as Box<dyn Any + Send>,
            Box::new(42_u8) as Box<dyn Any + Send>,
        ];

        for payload in payloads {
            let response = panic_response(payload);
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_json(response).await, serde_json::json!({ "error": UNEXPECTED_ERROR }));
        }
    }
}
