// 차트 페이지 핸들러

use serde_json::json;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{html, json as json_reply, with_status, Reply, Response};

use crate::api::chart::ChartData;
use crate::api::source::RowSource;
use crate::utils::logging;

pub const NO_DATA_MESSAGE: &str = "No data to process.";

/// 헬스체크 핸들러
pub async fn health_handler() -> Result<impl Reply, warp::Rejection> {
  Ok(json_reply(&json!({ "status": "ok" })))
}

fn no_data() -> Response {
  log::error!("{}", NO_DATA_MESSAGE);
  with_status(NO_DATA_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

/// 지표 차트 페이지 핸들러
///
/// 행을 하나도 가져오지 못하면 500 과 평문 메시지를 돌려준다.
pub async fn index_handler(
  source: Arc<dyn RowSource>,
  chart_ma_window: usize,
) -> Result<Response, warp::Rejection> {
  let rows = match source.fetch_rows().await {
    Ok(rows) => rows,
    Err(e) => {
      logging::log_error("데이터 조회", &e);
      return Ok(no_data());
    }
  };

  if rows.is_empty() {
    return Ok(no_data());
  }

  match ChartData::from_rows(&rows, chart_ma_window).render() {
    Ok(page) => Ok(with_status(html(page), StatusCode::OK).into_response()),
    Err(e) => {
      logging::log_error("차트 생성", &e);
      Ok(no_data())
    }
  }
}
