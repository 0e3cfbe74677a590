/**
* filename : oscillators
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::IndicatorError;
use super::{Indicator, RollingWindow};

/// 평균 상승폭 / 평균 하락폭으로 계산하는 RSI
///
/// Wilder 스무딩 대신 최근 `period`개 변화량의 단순 평균을 사용한다.
/// 평균 하락폭이 0 이면 RS 를 0 으로 두므로 상승만 있는 윈도우의 RSI 는 0 이다.
#[derive(Debug)]
pub struct RelativeStrengthIndex {
  name: String,
  period: usize,
  gains: RollingWindow,
  losses: RollingWindow,
  prev_price: Option<f64>,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize) -> Self {
    RelativeStrengthIndex {
      name: format!("RSI-{}", period),
      period,
      gains: RollingWindow::new(period),
      losses: RollingWindow::new(period),
      prev_price: None,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }

  pub fn prev_price(&self) -> Option<f64> {
    self.prev_price
  }

  pub fn gains(&self) -> Vec<f64> {
    self.gains.trailing(self.period)
  }

  pub fn losses(&self) -> Vec<f64> {
    self.losses.trailing(self.period)
  }

  /// 누적된 gain/loss 쌍의 수 (두 윈도우는 항상 같은 길이)
  pub fn len(&self) -> usize {
    self.gains.len()
  }

  pub fn is_empty(&self) -> bool {
    self.gains.is_empty()
  }
}

/// 평균 상승폭/하락폭에서 RSI 계산
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
  // RS = 평균 상승폭 / 평균 하락폭, 하락폭이 0 이면 0
  let rs = if avg_loss != 0.0 { avg_gain / avg_loss } else { 0.0 };

  // RSI = 100 - (100 / (1 + RS))
  100.0 - (100.0 / (1.0 + rs))
}

impl Indicator for RelativeStrengthIndex {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), IndicatorError> {
    // 이전 가격과 비교하여 gain/loss 계산
    if let Some(prev_price) = self.prev_price {
      let change = price - prev_price;

      let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, change.abs()) };

      self.gains.push(gain);
      self.losses.push(loss);
    }

    self.prev_price = Some(price);

    Ok(())
  }

  fn calculate(&self) -> Result<f64, IndicatorError> {
    let averages = self.gains
      .trailing_mean(self.period)
      .zip(self.losses.trailing_mean(self.period));

    match averages {
      Some((avg_gain, avg_loss)) => Ok(rsi_from_averages(avg_gain, avg_loss)),
      None => Err(IndicatorError::InsufficientHistory {
        required: self.period,
        available: self.gains.len().min(self.losses.len()),
      }),
    }
  }

  fn is_ready(&self) -> bool {
    self.gains.len() >= self.period && self.losses.len() >= self.period
  }

  fn reset(&mut self) {
    self.gains.clear();
    self.losses.clear();
    self.prev_price = None;
  }
}
