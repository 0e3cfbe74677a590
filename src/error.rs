/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown record tag: {0}")]
    UnknownTag(String),

    #[error("Insufficient history: need {required}, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data source error: {0}")]
    DataSourceError(String),

    #[error("Data not found: {0}")]
    DataNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl IndicatorError {
    /// 레코드 단위로 건너뛰고 스트림을 계속 진행해도 되는 오류인지
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            IndicatorError::ParseError(_)
                | IndicatorError::UnknownTag(_)
                | IndicatorError::MissingData(_)
        )
    }
}
