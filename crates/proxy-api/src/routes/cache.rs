//! 캐시 관리 endpoint.
//!
//! 캐시 전체 비우기를 제공합니다. 비운 뒤의 조회는 다시 채워질 때까지
//! 모두 miss가 됩니다.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// 캐시 비우기 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    /// 비운 후 캐시 크기 (항상 0)
    pub cache_size: usize,
}

/// 캐시 전체 비우기.
///
/// POST /cache/clear
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<ClearCacheResponse> {
    let cache_size = state.provider.clear_cache();
    info!("Cache cleared");
    Json(ClearCacheResponse { cache_size })
}

/// 캐시 라우터 생성.
pub fn cache_router() -> Router<Arc<AppState>> {
    Router::new().route("/clear", post(clear_cache))
}
