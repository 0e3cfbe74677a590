//! OHLCV 지표 파이프라인 라이브러리
//!
//! OHLCV 봉을 VWAP / MA / RSI 부분 레코드로 펼치고(map), 정렬된 레코드 스트림을
//! 집계해(reduce) 지표 행을 만들며, 결과를 차트 페이지로 제공합니다.

pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod pipeline;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::IndicatorError;
pub use crate::models::market_data::OhlcvBar;
pub use crate::models::output::{OutputRow, UNKNOWN_DATE};
pub use crate::models::record::PartialRecord;
pub use crate::indicators::Indicator;
pub use crate::pipeline::aggregator::{AggregatorState, IndicatorAggregator, SampleMode};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, IndicatorError>;
