//! 데이터 모듈 오류 타입.

use serde_json::Value;
use thiserror::Error;

/// 시리즈 조회 오류.
///
/// 배치 fan-out 경계를 넘어 panic으로 전파되지 않고,
/// 식별자 단위의 최종 결과로만 표현됩니다.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 시리즈 ID 누락
    #[error("Series id is required")]
    EmptySeriesId,

    /// 시리즈 목록 누락
    #[error("Series list is required")]
    EmptySeriesList,

    /// FRED API 키 미설정
    #[error("FRED API key is not configured")]
    MissingCredential,

    /// 업스트림 비정상 응답 (원래 상태 코드 보존)
    #[error("FRED API error (status {status})")]
    Upstream {
        /// 업스트림이 반환한 HTTP 상태 코드
        status: u16,
        /// JSON 파싱 시도 후의 응답 본문 (파싱 실패 시 원문 텍스트)
        details: Value,
    },

    /// 전송 계층 오류 (연결 실패, 타임아웃, 비정상 응답 본문)
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
