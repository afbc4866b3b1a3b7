//! FRED 프록시 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 헬스 체크, 단건/배치 시리즈 조회, 캐시 관리 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use proxy_api::routes::create_api_router;
use proxy_api::state::AppState;
use proxy_core::config::ServerConfig;
use proxy_core::logging::{init_logging, LogConfig};
use proxy_core::ProxyError;
use proxy_data::{CachedSeriesProvider, FredClient};

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://dashboard.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

#[tokio::main]
async fn main() -> Result<(), ProxyError> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    init_logging(LogConfig::from_env()).map_err(|e| ProxyError::Config(e.to_string()))?;

    info!("Starting FRED proxy server...");

    // 설정 로드
    let config = ServerConfig::from_env();
    let addr = config.socket_addr().map_err(|e| {
        error!(
            host = %config.host,
            port = config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    // FRED API 키 로드 (없어도 서버는 기동하되, 시리즈 조회는 설정 오류로 응답)
    let client = FredClient::from_env();
    if client.is_none() {
        warn!("FRED_API_KEY not set; series endpoints will return configuration errors");
    }

    // AppState 생성 (캐시 저장소는 명시적으로 생성되어 주입됨)
    let state = Arc::new(AppState::new(CachedSeriesProvider::new(client)));
    info!(
        version = %state.version,
        credential_configured = state.provider.credential_configured(),
        "Application state initialized"
    );

    // 라우터 조합 + 미들웨어
    let app = create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "FRED proxy listening");

    axum::serve(listener, app).await?;

    Ok(())
}
