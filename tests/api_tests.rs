//! 차트 API 테스트
//!
//! warp 라우트와 파일 데이터 소스 검증

use async_trait::async_trait;
use std::sync::Arc;
use xIndicator::api::{create_routes, ChartRow, FileRowSource, RowSource};
use xIndicator::pipeline::{run_pipeline, IndicatorAggregator};
use xIndicator::IndicatorError;

struct StaticRowSource {
  rows: Vec<ChartRow>,
}

#[async_trait]
impl RowSource for StaticRowSource {
  async fn fetch_rows(&self) -> Result<Vec<ChartRow>, IndicatorError> {
    Ok(self.rows.clone())
  }
}

fn chart_rows(n: usize) -> Vec<ChartRow> {
  (0..n)
    .map(|i| ChartRow {
      date: format!("2021-01-01 00:{:02}:00", i),
      vwap: 100.0 + i as f64,
      rsi: 30.0 + i as f64,
    })
    .collect()
}

#[tokio::test]
async fn test_index_serves_chart_page() {
  let routes = create_routes(Arc::new(StaticRowSource { rows: chart_rows(6) }), 5);

  let response = warp::test::request().method("GET").path("/").reply(&routes).await;

  assert_eq!(response.status(), 200);
  assert!(response.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
  let body = String::from_utf8(response.body().to_vec()).unwrap();
  assert!(body.contains("<title>Trading Indicators</title>"));
  assert!(body.contains("var vwap = [100.0,101.0,102.0,103.0,104.0,105.0];"));
  assert!(body.contains("var ma = [102.0,103.0];"));
}

#[tokio::test]
async fn test_index_without_rows_returns_500() {
  let routes = create_routes(Arc::new(StaticRowSource { rows: vec![] }), 5);

  let response = warp::test::request().method("GET").path("/").reply(&routes).await;

  assert_eq!(response.status(), 500);
  assert_eq!(response.body().as_ref(), b"No data to process.");
}

#[tokio::test]
async fn test_health() {
  let routes = create_routes(Arc::new(StaticRowSource { rows: vec![] }), 5);

  let response = warp::test::request().method("GET").path("/health").reply(&routes).await;

  assert_eq!(response.status(), 200);
  let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
  assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_path_is_404() {
  let routes = create_routes(Arc::new(StaticRowSource { rows: vec![] }), 5);

  let response = warp::test::request().method("GET").path("/orders").reply(&routes).await;

  assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_file_source_reads_aggregator_output() {
  // 집계 출력 파일을 만들고 그대로 차트 소스로 사용
  let mut csv = String::from("Open_time,Open,High,Low,Close,Volume\n");
  for i in 0..20 {
    let close = 100.0 + ((i * 7) % 5) as f64;
    csv.push_str(&format!("{},{},{},{},{},{}\n", i * 60_000, close, close + 1.0, close - 1.0, close, 5.0));
  }
  let mut output = Vec::new();
  let summary = run_pipeline(csv.as_bytes(), &mut output, &mut IndicatorAggregator::default()).unwrap();
  assert_eq!(summary.emitted, 6);

  let path = std::env::temp_dir().join(format!("xindicator-api-test-{}.csv", std::process::id()));
  std::fs::write(&path, &output).unwrap();

  let rows = FileRowSource::new(&path).fetch_rows().await.unwrap();
  std::fs::remove_file(&path).unwrap();

  assert_eq!(rows.len(), 6);
  assert_eq!(rows[0].date, "1970-01-01 00:14:00");
  assert!(rows.iter().all(|r| (0.0..=100.0).contains(&r.rsi)));
}
