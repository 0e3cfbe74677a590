/**
* filename : utils
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::IndicatorError;
use super::Indicator;

// 단일 가격 데이터를 사용하여 여러 지표 업데이트
pub fn update_indicators(
  indicators: &mut [&mut dyn Indicator],
  price: f64,
  volume: Option<f64>
) -> Result<(), IndicatorError> {
  for indicator in indicators.iter_mut() {
    indicator.update(price, volume)?;
  }

  Ok(())
}

// 지표 초기화
pub fn reset_indicators(indicators: &mut [&mut dyn Indicator]) {
  for indicator in indicators.iter_mut() {
    indicator.reset();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indicators::{RelativeStrengthIndex, SimpleMovingAverage};
  use crate::models::market_data::OhlcvBar;

  #[test]
  fn test_update_and_reset_together() {
    let mut sma = SimpleMovingAverage::new(2);
    let mut rsi = RelativeStrengthIndex::new(1);

    let bars = [
      OhlcvBar::new("1", 1.0, 1.0, 1.0, 1.0, 1.0),
      OhlcvBar::new("2", 2.0, 2.0, 2.0, 3.0, 1.0),
    ];
    for bar in &bars {
      let mut indicators: [&mut dyn Indicator; 2] = [&mut sma, &mut rsi];
      update_indicators(&mut indicators, bar.close, Some(bar.volume)).unwrap();
    }
    assert_eq!(sma.calculate().unwrap(), 2.0);
    assert_eq!(rsi.gains(), vec![2.0]);

    let mut indicators: [&mut dyn Indicator; 2] = [&mut sma, &mut rsi];
    reset_indicators(&mut indicators);
    assert!(!sma.is_ready());
    assert!(!rsi.is_ready());
  }
}
