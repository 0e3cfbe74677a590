/**
* filename : record
* author : HAMA
* date: 2025. 5. 12.
* description: emitter 와 aggregator 사이를 흐르는 태그 레코드
**/

use std::fmt;
use std::str::FromStr;

use crate::error::IndicatorError;
use crate::utils::format_float;

pub const VWAP_TAG: &str = "VWAP";
pub const MA_TAG: &str = "MA";
pub const RSI_TAG: &str = "RSI";

/// 봉 하나에서 나오는 부분 레코드
///
/// 한 봉 안에서의 순서는 항상 VWAP, MA, RSI 이다.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialRecord {
  VwapContribution { price_volume: f64, volume: f64 },
  MaSample { close: f64 },
  RsiSample { close: f64, timestamp: String },
}

impl PartialRecord {
  pub fn tag(&self) -> &'static str {
    match self {
      PartialRecord::VwapContribution { .. } => VWAP_TAG,
      PartialRecord::MaSample { .. } => MA_TAG,
      PartialRecord::RsiSample { .. } => RSI_TAG,
    }
  }

  /// 종가를 담은 샘플이면 그 값
  pub fn close(&self) -> Option<f64> {
    match self {
      PartialRecord::VwapContribution { .. } => None,
      PartialRecord::MaSample { close } | PartialRecord::RsiSample { close, .. } => Some(*close),
    }
  }
}

/// 유한한 실수만 허용하는 필드 파서
pub fn parse_number(field: &str, name: &str) -> Result<f64, IndicatorError> {
  let value = field
    .trim()
    .parse::<f64>()
    .map_err(|_| IndicatorError::ParseError(format!("{} is not a number: {:?}", name, field)))?;

  if !value.is_finite() {
    return Err(IndicatorError::ParseError(format!("{} is not finite: {:?}", name, field)));
  }

  Ok(value)
}

impl FromStr for PartialRecord {
  type Err = IndicatorError;

  /// 탭 구분 한 줄을 파싱 (`VWAP\t<pv>\t<vol>`, `MA\t<close>`, `RSI\t<close>\t<epoch_ms>`)
  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < 2 {
      return Err(IndicatorError::MissingData(format!("record has no value field: {:?}", line)));
    }

    match parts[0] {
      VWAP_TAG => {
        let price_volume = parse_number(parts[1], "price_volume")?;
        // 거래량 필드가 없으면 0 으로 누적
        let volume = match parts.get(2) {
          Some(raw) => parse_number(raw, "volume")?,
          None => 0.0,
        };
        Ok(PartialRecord::VwapContribution { price_volume, volume })
      }
      MA_TAG => Ok(PartialRecord::MaSample { close: parse_number(parts[1], "close")? }),
      RSI_TAG => {
        let close = parse_number(parts[1], "close")?;
        let timestamp = parts
          .get(2)
          .map(|s| s.trim().to_string())
          .ok_or_else(|| IndicatorError::MissingData(format!("RSI record has no timestamp: {:?}", line)))?;
        Ok(PartialRecord::RsiSample { close, timestamp })
      }
      other => Err(IndicatorError::UnknownTag(other.to_string())),
    }
  }
}

impl fmt::Display for PartialRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PartialRecord::VwapContribution { price_volume, volume } => {
        write!(f, "{}\t{}\t{}", VWAP_TAG, format_float(*price_volume), format_float(*volume))
      }
      PartialRecord::MaSample { close } => write!(f, "{}\t{}", MA_TAG, format_float(*close)),
      PartialRecord::RsiSample { close, timestamp } => {
        write!(f, "{}\t{}\t{}", RSI_TAG, format_float(*close), timestamp)
      }
    }
  }
}
