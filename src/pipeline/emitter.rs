/**
* filename : emitter
* author : HAMA
* date: 2025. 5. 12.
* description: OHLCV 봉을 VWAP / MA / RSI 부분 레코드로 펼침
**/

use crate::error::IndicatorError;
use crate::models::market_data::OhlcvBar;
use crate::models::record::{parse_number, PartialRecord};

/// 헤더 행에만 나타나는 컬럼 이름
pub const HEADER_TOKEN: &str = "Open_time";

/// 봉 한 행에 필요한 최소 컬럼 수 (Open_time, Open, High, Low, Close, Volume)
pub const BAR_FIELDS: usize = 6;

/// 컬럼 목록에서 봉 파싱 (헤더면 None)
pub fn parse_bar_fields<S: AsRef<str>>(fields: &[S]) -> Result<Option<OhlcvBar>, IndicatorError> {
  if fields.iter().any(|f| f.as_ref().contains(HEADER_TOKEN)) {
    return Ok(None);
  }

  if fields.len() < BAR_FIELDS {
    return Err(IndicatorError::MissingData(format!(
      "bar has {} fields, expected at least {}", fields.len(), BAR_FIELDS
    )));
  }

  Ok(Some(OhlcvBar {
    open_time: fields[0].as_ref().trim().to_string(),
    open: parse_number(fields[1].as_ref(), "open")?,
    high: parse_number(fields[2].as_ref(), "high")?,
    low: parse_number(fields[3].as_ref(), "low")?,
    close: parse_number(fields[4].as_ref(), "close")?,
    volume: parse_number(fields[5].as_ref(), "volume")?,
  }))
}

/// 쉼표로 구분된 한 줄에서 봉 파싱
pub fn parse_bar(line: &str) -> Result<Option<OhlcvBar>, IndicatorError> {
  let fields: Vec<&str> = line.trim().split(',').collect();
  parse_bar_fields(&fields)
}

/// 봉 하나를 VWAP, MA, RSI 순서의 레코드 3개로 변환
pub fn emit(bar: &OhlcvBar) -> Vec<PartialRecord> {
  vec![
    PartialRecord::VwapContribution {
      price_volume: bar.price_volume(),
      volume: bar.volume,
    },
    PartialRecord::MaSample { close: bar.close },
    PartialRecord::RsiSample {
      close: bar.close,
      timestamp: bar.open_time.clone(),
    },
  ]
}

/// 한 줄을 레코드로 변환 (헤더이거나 잘못된 행이면 빈 목록)
pub fn emit_line(line: &str) -> Vec<PartialRecord> {
  match parse_bar(line) {
    Ok(Some(bar)) => emit(&bar),
    Ok(None) => Vec::new(),
    Err(e) => {
      log::debug!("봉 건너뜀: {:?} - {}", line, e);
      Vec::new()
    }
  }
}
