use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use textlens_storage::error::StorageError;

pub const NO_TEXT: &str = "No text provided";
pub const STORE_WRITE_FAILED: &str = "Failed to store data in Cosmos DB";
pub const STORE_READ_FAILED: &str = "Failed to retrieve analysis history";

const PLACEHOLDER_HOST: &str = "your-function-url";

/// Unified API error type for all route handlers.
///
/// Storage failures are logged with their detail and answered with a fixed
/// message.
#[derive(Debug)]
pub enum ApiError {
    /// Neither the query string nor the body carried any text. `host` is the
    /// request's `Host` header, used to build the usage example.
    MissingText { host: Option<String> },
    StoreWrite(StorageError),
    StoreRead(StorageError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsageBody {
    error: &'static str,
    how_to_use: HowToUse,
}

#[derive(Serialize)]
struct HowToUse {
    option1: &'static str,
    option2: &'static str,
    example: String,
}

impl HowToUse {
    fn for_host(host: Option<&str>) -> Self {
        let host = host.unwrap_or(PLACEHOLDER_HOST);
        Self {
            option1: "Add ?text=YourText to the URL",
            option2: r#"Send a POST request with JSON body: {"text": "Your text here"}"#,
            example: format!("https://{host}/api/TextAnalyzer?text=Hello%20world"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingText { host } => {
                let body = UsageBody {
                    error: NO_TEXT,
                    how_to_use: HowToUse::for_host(host.as_deref()),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::StoreWrite(e) => {
                tracing::error!(
                    error = %e,
                    configuration = e.is_configuration(),
                    "Cosmos DB write failed"
                );
                internal(STORE_WRITE_FAILED)
            }
            ApiError::StoreRead(e) => {
                tracing::error!(
                    error = %e,
                    configuration = e.is_configuration(),
                    "Cosmos DB read failed"
                );
                internal(STORE_READ_FAILED)
            }
        }
    }
}

fn internal(message: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
        .into_response()
}
