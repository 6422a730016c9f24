use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;

pub const ENV_VAR_ERROR: i32 = 1;
pub const REQWEST_ERROR: i32 = 3;
pub const UPSTREAM_ERROR: i32 = 4;
pub const UNEXPECTED_ERROR: i32 = 5;
pub const INVALID_INPUT_ERROR: i32 = 101;
pub const VALIDATION_ERROR: i32 = 102;
pub const ROUTING_ERROR: i32 = 103;
pub const GEOCODING_ERROR: i32 = 104;
pub const SUPERSEDED_ERROR: i32 = 105;
pub const STOP_LIMIT_ERROR: i32 = 106;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }

    pub fn is_validation(&self) -> bool {
        self.code == VALIDATION_ERROR
    }

    pub fn is_routing(&self) -> bool {
        self.code == ROUTING_ERROR
    }

    pub fn is_superseded(&self) -> bool {
        self.code == SUPERSEDED_ERROR
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT_ERROR,
        message: "invalid input".into(),
    }
}

pub fn validation_error() -> Error {
    Error {
        code: VALIDATION_ERROR,
        message: "incomplete input: every stop needs an address".into(),
    }
}

pub fn routing_error(message: impl Into<String>) -> Error {
    Error {
        code: ROUTING_ERROR,
        message: message.into(),
    }
}

pub fn geocoding_error(message: impl Into<String>) -> Error {
    Error {
        code: GEOCODING_ERROR,
        message: message.into(),
    }
}

pub fn superseded_error() -> Error {
    Error {
        code: SUPERSEDED_ERROR,
        message: "route computation superseded".into(),
    }
}

pub fn stop_limit_error() -> Error {
    Error {
        code: STOP_LIMIT_ERROR,
        message: "stop limit reached".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: ENV_VAR_ERROR,
        message: format!("environment variable error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: REQWEST_ERROR,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: UPSTREAM_ERROR,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED_ERROR,
        message: "unexpected error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn internal_errors_hide_their_message() {
        let response = upstream_error().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], UPSTREAM_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let response = routing_error("NOT_FOUND: unknown address").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], ROUTING_ERROR);
        assert_eq!(body["error"], "NOT_FOUND: unknown address");
    }

    #[test]
    fn codes_classify_errors() {
        assert!(validation_error().is_validation());
        assert!(routing_error("x").is_routing());
        assert!(superseded_error().is_superseded());
        assert!(unexpected_error().is_internal());
        assert!(!invalid_input_error().is_internal());
        assert!(!stop_limit_error().is_internal());
    }
}
