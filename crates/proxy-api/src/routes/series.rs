//! 시리즈 조회 endpoint.
//!
//! FRED 시계열 데이터를 캐시 우선으로 프록시합니다.
//!
//! # 엔드포인트
//!
//! - `GET /series/{series_id}` - 단건 시리즈 조회
//! - `POST /series/batch` - 배치 시리즈 조회 (식별자별 동시 fan-out)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

use proxy_data::FetchError;

use crate::error::{fetch_error_response, ApiErrorResponse};
use crate::state::AppState;

/// 단건 시리즈 조회 쿼리 파라미터.
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// 관측 시작일 (YYYY-MM-DD, 선택적)
    pub start_date: Option<String>,
    /// 관측 종료일 (YYYY-MM-DD, 선택적)
    pub end_date: Option<String>,
    /// 정렬 순서 (기본값: "desc")
    pub sort_order: Option<String>,
}

/// 단건 시리즈 조회.
///
/// GET /series/{series_id}?start_date&end_date&sort_order
///
/// 캐시 hit이면 업스트림 호출 없이 캐시된 payload를 반환합니다.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Value>, (StatusCode, Json<ApiErrorResponse>)> {
    let sort_order = query.sort_order.as_deref().unwrap_or("desc");

    state
        .provider
        .get_series(
            &series_id,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            sort_order,
        )
        .await
        .map(Json)
        .map_err(fetch_error_response)
}

/// 배치 시리즈 조회.
///
/// POST /series/batch
///
/// 본문: `{"series": ["GDP", "CPIAUCSL"], "start_date": ..., "end_date": ...}`
///
/// `series`가 누락되었거나 배열이 아니거나 비어 있으면 요청 전체가
/// 400으로 거부됩니다. fan-out이 시작된 뒤의 실패는 식별자별 오류
/// 기술자(descriptor)로만 표현되며 전체 실패가 되지 않습니다.
pub async fn get_series_batch(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<ApiErrorResponse>)> {
    // 타입 extractor 대신 수동 검증: 누락/비배열/빈 배열을 모두 400으로 통일
    let series = match body.get("series").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse::new("series array is required")),
            ));
        }
    };

    // 문자열이 아닌 항목은 공백 취급되어 건너뜀
    let ids: Vec<String> = series
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect();

    let start_date = body.get("start_date").and_then(Value::as_str);
    let end_date = body.get("end_date").and_then(Value::as_str);

    debug!(requested = ids.len(), "Batch series request");

    let outcomes = state
        .provider
        .get_series_batch(&ids, start_date, end_date)
        .await
        .map_err(fetch_error_response)?;

    let mut result = Map::with_capacity(outcomes.len());
    for (id, outcome) in outcomes {
        let value = match outcome {
            Ok(payload) => payload,
            Err(err) => error_descriptor(&err),
        };
        result.insert(id, value);
    }

    Ok(Json(Value::Object(result)))
}

/// 식별자별 오류 기술자 생성.
///
/// 단건 경로의 오류 응답 본문과 같은 형태를 키 단위로 재사용합니다.
fn error_descriptor(err: &FetchError) -> Value {
    match err {
        FetchError::Upstream { status, details } => json!({
            "error": "FRED API error",
            "status": status,
            "details": details,
        }),
        FetchError::Transport(message) => json!({
            "error": "Failed to fetch data from FRED",
            "message": message,
        }),
        FetchError::MissingCredential => json!({
            "error": "Server configuration error",
        }),
        other => json!({
            "error": other.to_string(),
        }),
    }
}

/// 시리즈 라우터 생성.
pub fn series_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{series_id}", get(get_series))
        .route("/batch", post(get_series_batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_api_router;
    use crate::routes::health::HealthResponse;
    use crate::state::create_test_state_with;
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use mockito::Matcher;
    use proxy_data::{CachedSeriesProvider, FredClient};
    use tower::ServiceExt;

    const OBSERVATIONS_PATH: &str = "/fred/series/observations";

    fn app_for(server: &mockito::ServerGuard) -> Router {
        let client = FredClient::new("test-key").with_base_url(server.url());
        let state = Arc::new(create_test_state_with(CachedSeriesProvider::new(Some(
            client,
        ))));
        create_api_router().with_state(state)
    }

    fn app_without_credential() -> Router {
        let state = Arc::new(create_test_state_with(CachedSeriesProvider::new(None)));
        create_api_router().with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn batch_request(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/series/batch")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_series_success_and_cached_second_call() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"observations":[{"date":"2020-12-31","value":"21.5"}]}"#;
        let mock = server
            .mock("GET", OBSERVATIONS_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("series_id".into(), "GDP".into()),
                Matcher::UrlEncoded("observation_start".into(), "2020-01-01".into()),
                Matcher::UrlEncoded("observation_end".into(), "2020-12-31".into()),
            ]))
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let app = app_for(&server);
        let uri = "/series/GDP?start_date=2020-01-01&end_date=2020-12-31";

        let first = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first_body = body_json(first).await;
        assert_eq!(first_body["observations"][0]["value"], "21.5");

        // TTL 이내 두 번째 호출은 업스트림 호출 없이 동일 본문 반환
        let second = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(body_json(second).await, first_body);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_series_upstream_status_passthrough() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", OBSERVATIONS_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error_message":"series does not exist"}"#)
            .create_async()
            .await;

        let app = app_for(&server);
        let response = app.oneshot(get_request("/series/NOPE")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "FRED API error");
        assert_eq!(body["details"]["error_message"], "series does not exist");
    }

    #[tokio::test]
    async fn test_get_series_without_credential_is_500() {
        let app = app_without_credential();
        let response = app.oneshot(get_request("/series/GDP")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Server configuration error");
    }

    #[tokio::test]
    async fn test_batch_skips_blank_and_isolates_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", OBSERVATIONS_PATH)
            .match_query(Matcher::UrlEncoded("series_id".into(), "GDP".into()))
            .with_status(200)
            .with_body(r#"{"observations":[{"value":"1"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", OBSERVATIONS_PATH)
            .match_query(Matcher::UrlEncoded("series_id".into(), "CPI".into()))
            .with_status(404)
            .with_body(r#"{"error_message":"not found"}"#)
            .create_async()
            .await;

        let app = app_for(&server);
        let response = app
            .oneshot(batch_request(json!({"series": ["GDP", " ", "CPI"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let map = body.as_object().unwrap();

        // 공백 항목은 키를 만들지 않음
        assert_eq!(map.len(), 2);
        assert_eq!(map["GDP"]["observations"][0]["value"], "1");
        assert_eq!(map["CPI"]["error"], "FRED API error");
        assert_eq!(map["CPI"]["status"], 404);
    }

    #[tokio::test]
    async fn test_batch_missing_series_is_400() {
        let server = mockito::Server::new_async().await;
        let app = app_for(&server);

        // series 검증은 fan-out 이전에 수행되므로 mock이 필요 없음
        for body in [json!({}), json!({"series": []}), json!({"series": "GDP"})] {
            let response = app.clone().oneshot(batch_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_batch_without_credential_fails_whole_request() {
        let app = app_without_credential();
        let response = app
            .oneshot(batch_request(json!({"series": ["GDP"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_clear_cache_then_health_reports_zero() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", OBSERVATIONS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"observations":[]}"#)
            .expect_at_least(2)
            .create_async()
            .await;

        let app = app_for(&server);

        // 캐시에 두 키를 채움
        app.clone()
            .oneshot(get_request("/series/GDP"))
            .await
            .unwrap();
        app.clone()
            .oneshot(get_request("/series/CPI"))
            .await
            .unwrap();

        let health = body_json(
            app.clone()
                .oneshot(get_request("/health"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(health["cache_size"], 2);

        // 비우기 → health가 0을 보고
        let cleared = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/cache/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(cleared).await["cache_size"], 0);

        let health: HealthResponse = serde_json::from_slice(
            &axum::body::to_bytes(
                app.clone()
                    .oneshot(get_request("/health"))
                    .await
                    .unwrap()
                    .into_body(),
                usize::MAX,
            )
            .await
            .unwrap(),
        )
        .unwrap();
        assert_eq!(health.cache_size, 0);
        assert!(health.credential_configured);
    }
}
