/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::IndicatorError;
use super::{Indicator, RollingWindow};

/// 종가 단순 이동평균
///
/// 평균은 매번 윈도우 합으로 다시 계산한다 (누적 합의 오차가 쌓이지 않음).
#[derive(Debug)]
pub struct SimpleMovingAverage {
  name: String,
  period: usize,
  values: RollingWindow,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      period,
      values: RollingWindow::new(period),
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }

  /// 평균 계산에 쓰이는 최근 종가들
  pub fn window(&self) -> Vec<f64> {
    self.values.trailing(self.period)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl Indicator for SimpleMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), IndicatorError> {
    // 새 가격 추가, 오래된 가격은 윈도우가 제거
    self.values.push(price);
    Ok(())
  }

  fn calculate(&self) -> Result<f64, IndicatorError> {
    self.values
      .trailing_mean(self.period)
      .ok_or(IndicatorError::InsufficientHistory {
        required: self.period,
        available: self.values.len(),
      })
  }

  fn is_ready(&self) -> bool {
    self.values.len() >= self.period
  }

  fn reset(&mut self) {
    self.values.clear();
  }
}
