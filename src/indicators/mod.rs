/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description:
**/
pub mod moving_averages;
pub mod oscillators;
pub mod volume;
pub mod utils;
pub mod window;

pub use moving_averages::*;
pub use oscillators::*;
pub use volume::*;
pub use utils::*;
pub use window::RollingWindow;

use std::fmt::Debug;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;

  // 새로운 데이터로 지표 업데이트
  fn update(&mut self, price: f64, volume: Option<f64>) -> Result<(), crate::error::IndicatorError>;

  // 현재 지표 값 반환 (데이터가 부족하면 InsufficientHistory)
  fn calculate(&self) -> Result<f64, crate::error::IndicatorError>;

  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool;

  // 지표 상태 리셋
  fn reset(&mut self);
}
