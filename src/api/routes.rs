use std::sync::Arc;
use warp::Filter;

use crate::api::handlers;
use crate::api::source::RowSource;

/// 지표 차트 서버의 라우트 생성
pub fn create_routes(
    source: Arc<dyn RowSource>,
    chart_ma_window: usize,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // 헬스체크 라우트
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // 상태 필터 생성
    let source_filter = warp::any().map(move || source.clone());
    let window_filter = warp::any().map(move || chart_ma_window);

    // 차트 페이지 라우트
    let index = warp::path::end()
        .and(warp::get())
        .and(source_filter)
        .and(window_filter)
        .and_then(handlers::index_handler);

    // 모든 라우트 결합
    index.or(health)
}
