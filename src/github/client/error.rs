//! Error type for Github Client

use reqwest::{header::InvalidHeaderValue, StatusCode};
use serde_json::Value;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    /// Github answered with a non-success status. `data` is the decoded error payload.
    #[error("Request failed: {status}")]
    Status { status: StatusCode, data: Value },
}

impl Error {
    /// The best available description of what went wrong: the response payload when Github sent
    /// one, otherwise the error message itself.
    pub fn detail(&self) -> String {
        match self {
            Error::Status { data, .. } if !data.is_null() => match data {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn detail_prefers_response_payload() {
        let error = Error::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            data: json!({ "message": "err" }),
        };
        assert_eq!(error.detail(), r#"{"message":"err"}"#);
    }

    #[test]
    fn detail_falls_back_to_message() {
        let error = Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(error.detail().starts_with("json error:"));

        let error = Error::Status {
            status: StatusCode::BAD_GATEWAY,
            data: serde_json::Value::Null,
        };
        assert_eq!(error.detail(), "Request failed: 502 Bad Gateway");
    }
}
