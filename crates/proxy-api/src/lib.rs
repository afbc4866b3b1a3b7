//! FRED 프록시 REST API.
//!
//! Axum 기반 HTTP 서버의 라우트, 공유 상태, 에러 응답 타입을 제공합니다.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiErrorResponse;
pub use state::AppState;
