//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `GET /health` - 헬스 체크 (캐시 크기, API 키 설정 여부 포함)
//! - `GET /series/{id}` - 단건 시리즈 조회 (캐시 우선)
//! - `POST /series/batch` - 배치 시리즈 조회 (동시 fan-out)
//! - `POST /cache/clear` - 캐시 전체 비우기

pub mod cache;
pub mod health;
pub mod series;

pub use cache::{cache_router, ClearCacheResponse};
pub use health::{health_router, HealthResponse};
pub use series::{series_router, SeriesQuery};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/series", series_router())
        .nest("/cache", cache_router())
}
