//! 데이터 계층: TTL 캐시와 FRED 업스트림 클라이언트.
//!
//! 이 crate는 다음을 제공합니다:
//! - 시리즈 응답을 위한 인메모리 TTL 캐시 저장소
//! - FRED 관측치 API 클라이언트 (API 키 주입)
//! - 캐시 우선 조회 + 동시 배치 fan-out을 수행하는 시리즈 제공자

pub mod cache;
pub mod error;
pub mod provider;

pub use error::{FetchError, Result};

// 캐시 타입 재내보내기
pub use cache::series::CachedSeriesProvider;
pub use cache::store::{cache_key, CacheEntry, SeriesCache, CACHE_TTL_SECS};

// 업스트림 클라이언트 재내보내기
pub use provider::FredClient;
