//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! # 상태 코드 매핑
//!
//! | 분류 | 상태 코드 |
//! |------|-----------|
//! | 클라이언트 입력 오류 | 400 |
//! | 설정 오류 (API 키 미설정) | 500 (일반 메시지, 키 상태 비노출) |
//! | 업스트림 오류 | 업스트림 상태 코드 그대로 통과 |
//! | 전송 오류 | 500 + 오류 텍스트 |

use axum::http::StatusCode;
use axum::Json;
use proxy_data::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "error": "FRED API error",
///   "details": {"error_message": "series does not exist"}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 요약
    pub error: String,
    /// 추가 메시지 (전송 오류의 원문 텍스트 등, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 업스트림이 반환한 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    /// 메시지 포함 에러 생성.
    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
            details: None,
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: Some(details),
        }
    }
}

/// FetchError를 HTTP 응답으로 변환.
///
/// 업스트림 오류는 원래 상태 코드를 그대로 통과시키고, 설정 오류는
/// API 키 상태를 노출하지 않는 일반 메시지로 응답합니다.
pub fn fetch_error_response(err: FetchError) -> (StatusCode, Json<ApiErrorResponse>) {
    match err {
        FetchError::EmptySeriesId => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("Series id is required")),
        ),
        FetchError::EmptySeriesList => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("series array is required")),
        ),
        FetchError::MissingCredential => {
            warn!("Series request rejected: FRED API key is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("Server configuration error")),
            )
        }
        FetchError::Upstream { status, details } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(ApiErrorResponse::with_details("FRED API error", details)),
        ),
        FetchError::Transport(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::with_message(
                "Failed to fetch data from FRED",
                message,
            )),
        ),
    }
}
