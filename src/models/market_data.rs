use serde::{Deserialize, Serialize};

/// 한 거래 구간의 OHLCV 봉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// 원본 그대로의 시작 시각 (밀리초 epoch 문자열)
    pub open_time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    pub fn new(
        open_time: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        OhlcvBar {
            open_time: open_time.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// VWAP 누적에 쓰이는 typical price × volume
    pub fn price_volume(&self) -> f64 {
        self.typical_price() * self.volume
    }
}
