//! 지표 차트 HTTP 계층
//!
//! 데이터 소스에서 행을 읽어 Chart.js 페이지로 렌더링한다.

pub mod chart;
pub mod handlers;
pub mod routes;
pub mod source;

pub use chart::{render, ChartData};
pub use routes::create_routes;
pub use source::{ChartRow, CommandRowSource, FileRowSource, RowSource};
