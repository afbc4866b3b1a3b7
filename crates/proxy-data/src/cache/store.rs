//! 인메모리 TTL 캐시 저장소.
//!
//! FRED 응답 payload를 합성 키로 캐싱합니다. 항목은 저장 시각과 함께
//! 기록되며, TTL(5분) 이내면 신선한 것으로 간주합니다.
//!
//! # 수명 주기
//!
//! - 항목은 키별 첫 성공 fetch 시 생성됩니다
//! - 이후 성공 fetch마다 무조건 덮어씁니다 (병합 없음)
//! - 만료된 항목은 능동적으로 제거하지 않고, 다음 성공 fetch 때
//!   덮어쓰거나 `clear()`로만 일괄 제거합니다

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// 캐시 TTL (초). 고정 상수 5분.
pub const CACHE_TTL_SECS: i64 = 300;

/// 캐시 키 생성.
///
/// 형식: `{series_id}:{start}:{end}`. 날짜가 없으면 `"none"` sentinel로
/// 정규화되므로 동일 입력은 항상 동일 키를 만듭니다.
///
/// 알려진 한계: 문자 그대로 `"none"`인 날짜 문자열은 날짜 미지정과
/// 같은 키로 충돌합니다. 기존 동작을 유지하기 위해 수정하지 않습니다.
pub fn cache_key(series_id: &str, start_date: Option<&str>, end_date: Option<&str>) -> String {
    format!(
        "{}:{}:{}",
        series_id,
        start_date.unwrap_or("none"),
        end_date.unwrap_or("none")
    )
}

/// 캐시 항목.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// 업스트림이 반환한 JSON payload (불투명 값)
    pub payload: Value,
    /// 저장 시각
    pub stored_at: DateTime<Utc>,
}

/// 시리즈 응답 캐시 저장소.
///
/// 명시적으로 생성하여 핸들러에 주입합니다 (전역 싱글톤 아님).
/// 읽기/쓰기는 동기 연산이며, 서로 다른 키에 대한 동시 쓰기에도
/// 구조가 손상되지 않습니다. 실패하지 않는 컴포넌트입니다.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl SeriesCache {
    /// 빈 캐시 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 키로 항목 조회 (부수효과 없음).
    ///
    /// 만료 여부와 무관하게 존재하는 항목을 반환합니다.
    /// 신선도 판정은 [`SeriesCache::is_fresh`]로 별도 수행합니다.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
    }

    /// 항목 신선도 판정: `now - stored_at < TTL`.
    pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.stored_at < Duration::seconds(CACHE_TTL_SECS)
    }

    /// 신선한 payload 조회 (조회 + 신선도 판정 결합).
    ///
    /// 만료된 항목은 miss로 취급하지만 제거하지는 않습니다.
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        self.get(key)
            .filter(|entry| Self::is_fresh(entry, now))
            .map(|entry| entry.payload)
    }

    /// payload 저장 (무조건 덮어쓰기).
    pub fn put(&self, key: &str, payload: Value, now: DateTime<Utc>) {
        let entry = CacheEntry {
            payload,
            stored_at: now,
        };
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
    }

    /// 모든 항목 제거. 제거 후 크기(0)를 반환합니다.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.clear();
        entries.len()
    }

    /// 현재 항목 수 (만료된 항목 포함).
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    /// 캐시가 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
