use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::types::ErrorResponse;

pub const MISCONFIGURED_MSG: &str = "서버 설정 오류입니다. 관리자에게 문의하세요.";
pub const GENERATION_FAILED_MSG: &str = "메시지 생성에 실패했습니다. 잠시 후 다시 시도해주세요.";
pub const INVALID_BODY_MSG: &str = "잘못된 요청입니다.";
pub const PROMPT_REQUIRED_MSG: &str = "후킹메세지로 바꾸고 싶은 내용을 입력해주세요.";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("prompt is empty")]
    EmptyPrompt,

    /// Transport failure. The URL is stripped before construction since it
    /// carries the credential.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered 2xx with a body that is not a `generateContent`
    /// response. Stored without its URL, like `Transport`.
    #[error("upstream response could not be decoded: {0}")]
    UpstreamDecode(#[source] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream returned no candidates")]
    NoCandidates,

    #[error("first candidate has no text part")]
    MissingText,

    #[error("candidate text is not a suggestions object: {0}")]
    MalformedSuggestions(#[source] serde_json::Error),
}

impl RelayError {
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }

    pub fn upstream_decode(err: reqwest::Error) -> Self {
        Self::UpstreamDecode(err.without_url())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::EmptyPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing text. Every upstream cause collapses to the same message.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => MISCONFIGURED_MSG,
            Self::InvalidBody(_) => INVALID_BODY_MSG,
            Self::EmptyPrompt => PROMPT_REQUIRED_MSG,
            Self::Transport(_)
            | Self::UpstreamDecode(_)
            | Self::UpstreamStatus { .. }
            | Self::NoCandidates
            | Self::MissingText
            | Self::MalformedSuggestions(_) => GENERATION_FAILED_MSG,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, kind = ?self, "generation request failed");
        } else {
            warn!(err = %self, "rejected generation request");
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
