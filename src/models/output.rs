use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{format_float, join_floats};

/// MA 샘플처럼 시각이 없는 트리거에 쓰이는 날짜 값
pub const UNKNOWN_DATE: &str = "unknown_date";

/// 집계 결과 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub date: String,
    pub vwap: f64,
    pub ma: f64,
    pub rsi: f64,
    pub ma_window_snapshot: Vec<f64>,
    pub gains_snapshot: Vec<f64>,
    pub losses_snapshot: Vec<f64>,
}

impl OutputRow {
    /// `date,vwap,ma,rsi,<ma_window...>,<gains...>,<losses...>`
    pub fn to_csv_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.date,
            format_float(self.vwap),
            format_float(self.ma),
            format_float(self.rsi),
            join_floats(&self.ma_window_snapshot),
            join_floats(&self.gains_snapshot),
            join_floats(&self.losses_snapshot),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_line_section_order() {
        let row = OutputRow {
            date: "2021-01-01 00:00:00".to_string(),
            vwap: 10.5,
            ma: 11.0,
            rsi: 50.0,
            ma_window_snapshot: vec![10.0, 12.0],
            gains_snapshot: vec![2.0, 0.0],
            losses_snapshot: vec![0.0, 1.0],
        };
        assert_eq!(
            row.to_csv_line(),
            "2021-01-01 00:00:00,10.5,11.0,50.0,10.0,12.0,2.0,0.0,0.0,1.0"
        );
    }
}
