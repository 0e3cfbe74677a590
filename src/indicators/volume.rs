/**
* filename : volume
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::IndicatorError;
use crate::utils::math::safe_div;
use super::Indicator;

/// 스트림 시작부터의 누적 VWAP (윈도우 없음)
#[derive(Debug, Default)]
pub struct VolumeWeightedAveragePrice {
  total_price_volume: f64,
  total_volume: f64,
}

impl VolumeWeightedAveragePrice {
  pub fn new() -> Self {
    VolumeWeightedAveragePrice::default()
  }

  /// 이미 곱해진 가격×거래량과 거래량을 누적
  pub fn accumulate(&mut self, price_volume: f64, volume: f64) {
    self.total_price_volume += price_volume;
    self.total_volume += volume;
  }

  pub fn total_price_volume(&self) -> f64 {
    self.total_price_volume
  }

  pub fn total_volume(&self) -> f64 {
    self.total_volume
  }

  /// 누적 거래량이 0 이하이면 0
  pub fn value(&self) -> f64 {
    if self.total_volume > 0.0 {
      safe_div(self.total_price_volume, self.total_volume, 0.0)
    } else {
      0.0
    }
  }
}

impl Indicator for VolumeWeightedAveragePrice {
  fn name(&self) -> &str {
    "VWAP"
  }

  fn update(&mut self, price: f64, volume: Option<f64>) -> Result<(), IndicatorError> {
    let volume = volume.ok_or(IndicatorError::MissingData("Volume data required for VWAP".to_string()))?;

    self.accumulate(price * volume, volume);

    Ok(())
  }

  fn calculate(&self) -> Result<f64, IndicatorError> {
    Ok(self.value())
  }

  fn is_ready(&self) -> bool {
    self.total_volume > 0.0
  }

  fn reset(&mut self) {
    self.total_price_volume = 0.0;
    self.total_volume = 0.0;
  }
}
