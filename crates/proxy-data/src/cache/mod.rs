//! 시리즈 응답 캐싱.
//!
//! - `store`: 인메모리 TTL 키-값 저장소
//! - `series`: 캐시 우선 조회 + 동시 배치 fan-out 제공자

pub mod series;
pub mod store;

pub use series::CachedSeriesProvider;
pub use store::{cache_key, CacheEntry, SeriesCache, CACHE_TTL_SECS};
