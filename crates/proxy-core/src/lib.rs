//! # Proxy Core
//!
//! FRED 프록시 서버의 공통 기반을 제공합니다.
//!
//! 이 크레이트는 프록시 시스템 전반에서 사용되는 기본 요소를 제공합니다:
//! - 공통 에러 타입
//! - 서버 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;
