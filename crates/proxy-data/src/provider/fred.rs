//! FRED API 클라이언트.
//!
//! FRED(Federal Reserve Economic Data) 관측치 API를 호출하여
//! 경제 시계열 데이터를 수집합니다. 서버가 보관하는 API 키를
//! 요청 파라미터로 주입합니다.
//!
//! # 에러 처리
//!
//! - 비정상 HTTP 상태: 응답 본문을 JSON으로 파싱 시도하고, 실패하면
//!   원문 텍스트를 그대로 담아 [`FetchError::Upstream`]으로 반환합니다.
//!   원래 상태 코드는 보존됩니다. 재시도하지 않습니다.
//! - 전송 계층 실패(연결 오류, 타임아웃, 비정상 본문):
//!   [`FetchError::Transport`]. 역시 재시도하지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use proxy_data::provider::fred::FredClient;
//!
//! let client = FredClient::from_env()
//!     .ok_or("FRED_API_KEY가 설정되지 않았습니다")?;
//! let payload = client
//!     .fetch_observations("GDP", Some("2020-01-01"), None, "desc")
//!     .await?;
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};

/// FRED API 기본 URL.
const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org";

/// 관측치 조회 경로.
const OBSERVATIONS_PATH: &str = "/fred/series/observations";

/// FRED API 클라이언트.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    /// 새로운 FRED API 클라이언트 생성.
    ///
    /// # Arguments
    /// * `api_key` - FRED API 키
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("HTTP 클라이언트 생성 실패"),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 기본 URL 교체 (테스트에서 mock 서버를 가리킬 때 사용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 환경변수에서 API 키를 로드하여 클라이언트 생성.
    ///
    /// 환경변수 `FRED_API_KEY`에서 키를 읽습니다. 키가 없거나 비어 있으면
    /// `None`을 반환하며, 호출자는 fetch를 시도하기 전에 설정 오류로
    /// 단락(short-circuit)해야 합니다.
    pub fn from_env() -> Option<Self> {
        std::env::var("FRED_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    /// 시리즈 관측치 조회.
    ///
    /// GET `{base}/fred/series/observations`에 `series_id`, `api_key`,
    /// `file_type=json`, `sort_order` 및 선택적 `observation_start`/
    /// `observation_end` 파라미터를 전달합니다.
    pub async fn fetch_observations(
        &self,
        series_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        sort_order: &str,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, OBSERVATIONS_PATH);

        let mut params: Vec<(&str, String)> = vec![
            ("series_id", series_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("file_type", "json".to_string()),
            ("sort_order", sort_order.to_string()),
        ];
        if let Some(start) = start_date {
            params.push(("observation_start", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("observation_end", end.to_string()));
        }

        debug!(series_id, sort_order, "Requesting observations from FRED");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // 본문이 JSON이면 구조를 보존하고, 아니면 원문 텍스트로 폴백
            let details = serde_json::from_str::<Value>(&body)
                .unwrap_or_else(|_| Value::String(body));

            warn!(
                series_id,
                status = status.as_u16(),
                "FRED API returned error status"
            );
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
