/**
* filename : aggregator
* author : HAMA
* date: 2025. 5. 12.
* description: 태그 레코드 스트림에서 VWAP / MA / RSI 행을 만드는 집계기
**/

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::IndicatorConfig;
use crate::error::IndicatorError;
use crate::indicators::{
  update_indicators, reset_indicators, Indicator, RelativeStrengthIndex, SimpleMovingAverage,
  VolumeWeightedAveragePrice,
};
use crate::models::{OutputRow, PartialRecord, UNKNOWN_DATE};
use crate::utils::format_epoch_ms;

/// 기본 MA / RSI 윈도우
pub const DEFAULT_PERIOD: usize = 14;

/// 한 봉의 MA / RSI 샘플을 상태 업데이트로 옮기는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
  /// 봉당 한 번: MA 샘플은 대기시키고 이어지는 RSI 샘플이 한 번 반영한다
  #[default]
  PerBar,
  /// 레코드마다 반영: 봉 하나의 종가가 MA, RSI 로 두 번 들어간다
  PerRecord,
}

impl FromStr for SampleMode {
  type Err = IndicatorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "per_bar" => Ok(SampleMode::PerBar),
      "per_record" => Ok(SampleMode::PerRecord),
      _ => Err(IndicatorError::ConfigError(format!(
        "Invalid sample mode: {}. Must be 'per_bar' or 'per_record'", s
      ))),
    }
  }
}

/// 집계 상태: 누적 VWAP, 종가 윈도우, gain/loss 윈도우, 직전 종가
#[derive(Debug)]
pub struct AggregatorState {
  vwap: VolumeWeightedAveragePrice,
  ma: SimpleMovingAverage,
  rsi: RelativeStrengthIndex,
}

impl AggregatorState {
  pub fn new(period: usize) -> Self {
    AggregatorState {
      vwap: VolumeWeightedAveragePrice::new(),
      ma: SimpleMovingAverage::new(period),
      rsi: RelativeStrengthIndex::new(period),
    }
  }

  pub fn period(&self) -> usize {
    self.ma.period()
  }

  pub fn total_price_volume(&self) -> f64 {
    self.vwap.total_price_volume()
  }

  pub fn total_volume(&self) -> f64 {
    self.vwap.total_volume()
  }

  pub fn vwap(&self) -> f64 {
    self.vwap.value()
  }

  pub fn price_window(&self) -> Vec<f64> {
    self.ma.window()
  }

  pub fn gains_window(&self) -> Vec<f64> {
    self.rsi.gains()
  }

  pub fn losses_window(&self) -> Vec<f64> {
    self.rsi.losses()
  }

  pub fn previous_close(&self) -> Option<f64> {
    self.rsi.prev_price()
  }

  fn add_contribution(&mut self, price_volume: f64, volume: f64) {
    self.vwap.accumulate(price_volume, volume);
  }

  fn add_close(&mut self, close: f64) -> Result<(), IndicatorError> {
    let mut closes: [&mut dyn Indicator; 2] = [&mut self.ma, &mut self.rsi];
    update_indicators(&mut closes, close, None)
  }

  /// MA 와 RSI 가 모두 계산 가능할 때만 행을 만든다
  fn row(&self, date: String) -> Option<OutputRow> {
    let (Ok(ma), Ok(rsi)) = (self.ma.calculate(), self.rsi.calculate()) else {
      return None;
    };

    Some(OutputRow {
      date,
      vwap: self.vwap.value(),
      ma,
      rsi,
      ma_window_snapshot: self.ma.window(),
      gains_snapshot: self.rsi.gains(),
      losses_snapshot: self.rsi.losses(),
    })
  }

  fn reset(&mut self) {
    let mut all: [&mut dyn Indicator; 3] = [&mut self.vwap, &mut self.ma, &mut self.rsi];
    reset_indicators(&mut all);
  }
}

/// 단일 종목의 정렬된 레코드 스트림을 처리하는 집계기
///
/// 상태는 호출 간에 이어지며 동기화가 없으므로 스트림 하나당 인스턴스 하나를 쓴다.
#[derive(Debug)]
pub struct IndicatorAggregator {
  state: AggregatorState,
  mode: SampleMode,
  staged_close: Option<f64>,
}

impl IndicatorAggregator {
  pub fn new(period: usize, mode: SampleMode) -> Self {
    IndicatorAggregator {
      state: AggregatorState::new(period),
      mode,
      staged_close: None,
    }
  }

  pub fn from_config(config: &IndicatorConfig) -> Self {
    IndicatorAggregator::new(config.period, config.sample_mode)
  }

  pub fn state(&self) -> &AggregatorState {
    &self.state
  }

  pub fn mode(&self) -> SampleMode {
    self.mode
  }

  /// 레코드 하나를 처리
  ///
  /// 오류가 나면 상태는 바뀌지 않은 채로 남는다.
  pub fn process(&mut self, record: PartialRecord) -> Result<Option<OutputRow>, IndicatorError> {
    match record {
      PartialRecord::VwapContribution { price_volume, volume } => {
        // 다음 봉이 시작되었으므로 RSI 없이 남은 MA 를 먼저 반영
        let flushed = self.flush_staged()?;
        self.state.add_contribution(price_volume, volume);
        Ok(flushed)
      }
      PartialRecord::MaSample { close } => match self.mode {
        SampleMode::PerRecord => self.commit(close, UNKNOWN_DATE.to_string()),
        SampleMode::PerBar => {
          let flushed = self.flush_staged()?;
          self.staged_close = Some(close);
          Ok(flushed)
        }
      },
      PartialRecord::RsiSample { close, timestamp } => {
        let date = format_epoch_ms(&timestamp)?;
        self.staged_close = None;
        self.commit(close, date)
      }
    }
  }

  /// 레코드 한 줄을 파싱해 처리 (빈 줄은 무시)
  pub fn process_line(&mut self, line: &str) -> Result<Option<OutputRow>, IndicatorError> {
    if line.trim().is_empty() {
      return Ok(None);
    }

    let record: PartialRecord = line.parse()?;
    self.process(record)
  }

  /// 스트림 종료: 대기 중인 MA 샘플을 반영
  pub fn finish(&mut self) -> Option<OutputRow> {
    match self.flush_staged() {
      Ok(row) => row,
      Err(e) => {
        log::warn!("대기 중인 MA 샘플 반영 실패: {}", e);
        None
      }
    }
  }

  /// 새로 생성한 것과 같은 상태로 되돌림
  pub fn reset(&mut self) {
    self.state.reset();
    self.staged_close = None;
  }

  fn flush_staged(&mut self) -> Result<Option<OutputRow>, IndicatorError> {
    match self.staged_close.take() {
      Some(close) => self.commit(close, UNKNOWN_DATE.to_string()),
      None => Ok(None),
    }
  }

  fn commit(&mut self, close: f64, date: String) -> Result<Option<OutputRow>, IndicatorError> {
    self.state.add_close(close)?;
    let row = self.state.row(date);
    if let Some(row) = &row {
      log::trace!("행 생성: {} ma={} rsi={}", row.date, row.ma, row.rsi);
    }
    Ok(row)
  }
}

impl Default for IndicatorAggregator {
  fn default() -> Self {
    IndicatorAggregator::new(DEFAULT_PERIOD, SampleMode::default())
  }
}
