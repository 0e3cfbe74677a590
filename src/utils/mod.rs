//! 시간 / 숫자 포맷 유틸리티
//!
//! 타임스탬프 변환과 출력용 실수 포맷 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, Utc};

use crate::error::IndicatorError;

/// 출력 행의 날짜 포맷 (UTC)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> Result<DateTime<Utc>, IndicatorError> {
  DateTime::from_timestamp_millis(timestamp_ms)
    .ok_or_else(|| IndicatorError::ParseError(format!("timestamp out of range: {}", timestamp_ms)))
}

/// 밀리초 epoch 문자열을 파싱
pub fn parse_timestamp_ms(raw: &str) -> Result<i64, IndicatorError> {
  raw.trim()
    .parse::<i64>()
    .map_err(|_| IndicatorError::ParseError(format!("invalid epoch milliseconds: {:?}", raw)))
}

/// 밀리초 epoch 문자열을 `YYYY-MM-DD HH:MM:SS` 문자열로 변환
pub fn format_epoch_ms(raw: &str) -> Result<String, IndicatorError> {
  let dt = timestamp_to_datetime(parse_timestamp_ms(raw)?)?;
  Ok(dt.format(DATE_FORMAT).to_string())
}

/// 실수를 최단 왕복 표현으로 포맷
///
/// 정수 값도 항상 소수부(`14.0`)를 가지며, 지수 표기는 부호와 두 자리 이상의
/// 지수(`1e-05`, `1.5e+16`)를 사용한다.
pub fn format_float(value: f64) -> String {
  let repr = format!("{:?}", value);
  match repr.split_once('e') {
    Some((mantissa, exponent)) => {
      let (sign, digits) = match exponent.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', exponent),
      };
      format!("{}e{}{:0>2}", mantissa, sign, digits)
    }
    None => repr,
  }
}

/// 실수 목록을 쉼표로 연결
pub fn join_floats<'a, I>(values: I) -> String
where
  I: IntoIterator<Item = &'a f64>,
{
  values.into_iter().map(|v| format_float(*v)).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_epoch_ms() {
    assert_eq!(format_epoch_ms("0").unwrap(), "1970-01-01 00:00:00");
    assert_eq!(format_epoch_ms("1609459200000").unwrap(), "2021-01-01 00:00:00");
    // 밀리초는 잘라낸다
    assert_eq!(format_epoch_ms("1609459201999").unwrap(), "2021-01-01 00:00:01");
  }

  #[test]
  fn test_format_epoch_ms_rejects_garbage() {
    assert!(matches!(format_epoch_ms("unknown_date"), Err(IndicatorError::ParseError(_))));
    assert!(format_epoch_ms("1.5e12").is_err());
    assert!(format_epoch_ms(&i64::MAX.to_string()).is_err());
  }

  #[test]
  fn test_format_float() {
    assert_eq!(format_float(14.0), "14.0");
    assert_eq!(format_float(0.0), "0.0");
    assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_float(-2.5), "-2.5");
    assert_eq!(format_float(0.00001), "1e-05");
    assert_eq!(format_float(1e16), "1e+16");
    assert_eq!(format_float(1.5e16), "1.5e+16");
    assert_eq!(format_float(1.5e-120), "1.5e-120");
  }

  #[test]
  fn test_join_floats() {
    assert_eq!(join_floats(&[1.0, 2.5]), "1.0,2.5");
    let empty: [f64; 0] = [];
    assert_eq!(join_floats(&empty), "");
  }
}
