//! 캐시 기반 시리즈 제공자.
//!
//! FRED 클라이언트와 TTL 캐시를 통합하여 효율적인 시리즈 접근을 제공합니다.
//!
//! # 동작 흐름
//!
//! ```text
//! 요청 (series_id, start, end)
//!         │
//!         ▼
//! ┌───────────────────┐
//! │ 1. 입력/키 검증     │ ← ID 공백, API 키 미설정이면 즉시 실패
//! └─────────┬─────────┘
//!           │
//!     ┌─────┴──────┐
//!     │ 캐시 신선?  │
//!     └─────┬──────┘
//!       YES │ NO
//!           │   │
//!           │   ▼
//!           │ ┌──────────────────┐
//!           │ │ 2. FRED fetch    │
//!           │ │ 3. write-through │
//!           │ └────────┬─────────┘
//!           ▼          ▼
//!     ┌─────────────────────┐
//!     │ payload 반환         │
//!     └─────────────────────┘
//! ```
//!
//! 배치 경로는 식별자별로 위 흐름을 독립된 동시 태스크로 실행하고,
//! 각 태스크가 반환한 `(id, outcome)` 쌍을 한 번에 join하여 결과 맵을
//! 조립합니다. fan-out이 시작된 뒤의 실패는 항상 키 단위로만 표현됩니다.

use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error};

use crate::cache::store::{cache_key, SeriesCache};
use crate::error::{FetchError, Result};
use crate::provider::FredClient;

/// 배치 경로의 고정 정렬 순서.
///
/// 단건 경로와 달리 배치 멤버는 호출자가 정렬 순서를 지정할 수 없습니다.
const BATCH_SORT_ORDER: &str = "desc";

/// 식별자별 조회 결과 맵.
pub type BatchOutcomes = HashMap<String, Result<Value>>;

/// 캐시 기반 시리즈 제공자.
///
/// 캐시 저장소는 명시적으로 주입되며, 테스트에서 독립 인스턴스를
/// 여러 개 만들 수 있습니다. 클라이언트가 `None`이면 API 키 미설정
/// 상태이며, 모든 조회는 네트워크 시도 전에 설정 오류로 실패합니다.
#[derive(Debug, Clone)]
pub struct CachedSeriesProvider {
    cache: Arc<SeriesCache>,
    client: Option<FredClient>,
}

impl CachedSeriesProvider {
    /// 새로운 제공자 생성 (빈 캐시 포함).
    pub fn new(client: Option<FredClient>) -> Self {
        Self::with_cache(Arc::new(SeriesCache::new()), client)
    }

    /// 기존 캐시 저장소를 주입하여 제공자 생성.
    pub fn with_cache(cache: Arc<SeriesCache>, client: Option<FredClient>) -> Self {
        Self { cache, client }
    }

    /// API 키 설정 여부.
    pub fn credential_configured(&self) -> bool {
        self.client.is_some()
    }

    /// 현재 캐시 항목 수.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// 캐시 전체 비우기. 비운 후 크기(0)를 반환합니다.
    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }

    /// 단건 시리즈 조회 (캐시 우선, miss/만료 시 fetch + write-through).
    ///
    /// # 인자
    /// - `series_id`: FRED 시리즈 ID (예: "GDP", "CPIAUCSL")
    /// - `sort_order`: 관측치 정렬 순서 ("desc" | "asc")
    pub async fn get_series(
        &self,
        series_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        sort_order: &str,
    ) -> Result<Value> {
        if series_id.trim().is_empty() {
            return Err(FetchError::EmptySeriesId);
        }
        let client = self.client.as_ref().ok_or(FetchError::MissingCredential)?;

        let key = cache_key(series_id, start_date, end_date);

        if let Some(payload) = self.cache.get_fresh(&key, Utc::now()) {
            debug!(key = %key, "Cache hit");
            return Ok(payload);
        }

        debug!(key = %key, "Cache miss, fetching from FRED");
        let payload = client
            .fetch_observations(series_id, start_date, end_date, sort_order)
            .await?;

        self.cache.put(&key, payload.clone(), Utc::now());
        Ok(payload)
    }

    /// 배치 시리즈 조회 (식별자별 동시 fan-out).
    ///
    /// 공백만 있는 식별자는 건너뛰며 결과에 포함되지 않습니다.
    /// 중복 식별자는 한 번만 조회됩니다. 목록이 비어 있거나 API 키가
    /// 없으면 fan-out을 시작하기 전에 전체가 실패합니다. fan-out 이후의
    /// 실패는 해당 식별자의 outcome으로만 기록되며, 한 식별자의 오류가
    /// 다른 식별자의 결과에 영향을 주지 않습니다.
    pub async fn get_series_batch(
        &self,
        series: &[String],
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<BatchOutcomes> {
        if series.is_empty() {
            return Err(FetchError::EmptySeriesList);
        }
        if self.client.is_none() {
            return Err(FetchError::MissingCredential);
        }

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let mut handles = Vec::new();

        for raw in series {
            let id = raw.trim().to_string();
            if id.is_empty() || !seen.insert(id.clone()) {
                continue;
            }

            let provider = self.clone();
            let start = start_date.map(str::to_string);
            let end = end_date.map(str::to_string);
            let task_id = id.clone();

            ids.push(id);
            handles.push(tokio::spawn(async move {
                provider
                    .get_series(&task_id, start.as_deref(), end.as_deref(), BATCH_SORT_ORDER)
                    .await
            }));
        }

        debug!(count = ids.len(), "Batch fan-out started");

        let joined = join_all(handles).await;

        let mut outcomes = BatchOutcomes::with_capacity(ids.len());
        for (id, joined) in ids.into_iter().zip(joined) {
            let outcome = joined.unwrap_or_else(|e| {
                error!(series_id = %id, error = %e, "Batch task failed to join");
                Err(FetchError::Transport(format!("task join error: {}", e)))
            });
            outcomes.insert(id, outcome);
        }

        Ok(outcomes)
    }
}
