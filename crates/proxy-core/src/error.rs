//! 프록시 시스템의 공통 에러 타입.
//!
//! 이 모듈은 프록시 시스템 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 프록시 에러.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

impl From<std::net::AddrParseError> for ProxyError {
    fn from(err: std::net::AddrParseError) -> Self {
        ProxyError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(err: std::io::Error) -> Self {
        ProxyError::Network(err.to_string())
    }
}

/// 프록시 시스템 공통 Result 타입.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProxyError::Config("FRED_API_KEY missing".to_string());
        assert!(err.to_string().contains("FRED_API_KEY missing"));
    }

    #[test]
    fn test_addr_parse_error_conversion() {
        let parse_err = "not-an-addr".parse::<std::net::SocketAddr>().unwrap_err();
        let err: ProxyError = parse_err.into();
        assert!(matches!(err, ProxyError::Config(_)));
    }
}
