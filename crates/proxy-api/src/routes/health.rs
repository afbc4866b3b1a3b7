//! 헬스 체크 endpoint.
//!
//! 서버 상태와 캐시/자격증명 상태를 확인합니다.
//! 로드밸런서나 오케스트레이션 시스템에서 사용됩니다.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 서비스 상태 ("ok")
    pub status: String,

    /// 현재 캐시 항목 수 (만료된 항목 포함)
    pub cache_size: usize,

    /// FRED API 키 설정 여부
    pub credential_configured: bool,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,
}

/// 헬스 체크.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        cache_size: state.provider.cache_size(),
        credential_configured: state.provider.credential_configured(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
    })
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}
