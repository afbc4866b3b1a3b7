//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 Axum의 State extractor를 통해 핸들러에 주입됩니다.

use chrono::{DateTime, Utc};
use proxy_data::CachedSeriesProvider;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 캐시 기반 시리즈 제공자 (캐시 저장소 + FRED 클라이언트)
    pub provider: CachedSeriesProvider,

    /// API 버전
    pub version: String,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(provider: CachedSeriesProvider) -> Self {
        Self {
            provider,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 AppState 생성 (API 키 미설정 상태).
pub fn create_test_state() -> AppState {
    AppState::new(CachedSeriesProvider::new(None))
}

/// 주어진 제공자로 테스트용 AppState 생성.
pub fn create_test_state_with(provider: CachedSeriesProvider) -> AppState {
    AppState::new(provider)
}
