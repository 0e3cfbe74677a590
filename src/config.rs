/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::IndicatorError;
use crate::pipeline::aggregator::SampleMode;

/// 설정 파일 경로를 덮어쓰는 환경변수
pub const CONFIG_PATH_ENV: &str = "XINDICATOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub indicators: IndicatorConfig,
    pub data_source: DataSourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// MA / RSI 윈도우 크기
    pub period: usize,
    pub sample_mode: SampleMode,
    /// 차트 전용 VWAP 이동평균 윈도우
    pub chart_ma_window: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    Command,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub kind: DataSourceKind,
    pub command: String,
    pub args: Vec<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load() -> Result<Self, IndicatorError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load configuration from an explicit path, falling back to defaults when it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self, IndicatorError> {
        let mut cfg = if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| IndicatorError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| IndicatorError::ConfigError(format!("Failed to read config file: {}", e)))?;

            serde_json::from_str::<Config>(&contents)
                .map_err(|e| IndicatorError::ConfigError(format!("Failed to parse config file: {}", e)))?
        } else {
            Config::default()
        };

        // environment overrides
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) -> Result<(), IndicatorError> {
        use std::env;
        if let Ok(v) = env::var("SERVER_HOST") { if !v.is_empty() { self.server.host = v; } }
        if let Ok(v) = env::var("SERVER_PORT") {
            self.server.port = v.parse()
                .map_err(|_| IndicatorError::ConfigError(format!("SERVER_PORT is not a port: {}", v)))?;
        }
        if let Ok(v) = env::var("INDICATOR_PERIOD") {
            self.indicators.period = v.parse()
                .map_err(|_| IndicatorError::ConfigError(format!("INDICATOR_PERIOD is not a number: {}", v)))?;
        }
        if let Ok(v) = env::var("CHART_MA_WINDOW") {
            self.indicators.chart_ma_window = v.parse()
                .map_err(|_| IndicatorError::ConfigError(format!("CHART_MA_WINDOW is not a number: {}", v)))?;
        }
        if let Ok(v) = env::var("SAMPLE_MODE") {
            self.indicators.sample_mode = v.parse()?;
        }
        if let Ok(v) = env::var("DATA_SOURCE_KIND") {
            self.data_source.kind = match v.to_lowercase().as_str() {
                "command" => DataSourceKind::Command,
                "file" => DataSourceKind::File,
                _ => return Err(IndicatorError::ConfigError(format!("Unknown DATA_SOURCE_KIND: {}", v))),
            };
        }
        if let Ok(v) = env::var("DATA_SOURCE_PATH") { if !v.is_empty() { self.data_source.path = Some(v); } }
        if let Ok(v) = env::var("DATA_SOURCE_COMMAND") { if !v.is_empty() { self.data_source.command = v; } }
        if let Ok(v) = env::var("LOG_LEVEL") { if !v.is_empty() { self.logging.level = v; } }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.indicators.period == 0 {
            return Err(IndicatorError::InvalidParameter("indicators.period must be at least 1".to_string()));
        }
        if self.indicators.chart_ma_window == 0 {
            return Err(IndicatorError::InvalidParameter("indicators.chart_ma_window must be at least 1".to_string()));
        }
        if self.data_source.kind == DataSourceKind::File && self.data_source.path.is_none() {
            return Err(IndicatorError::ConfigError("data_source.path is required for the file source".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            indicators: IndicatorConfig {
                period: 14,
                sample_mode: SampleMode::PerBar,
                chart_ma_window: 5,
            },
            data_source: DataSourceConfig {
                kind: DataSourceKind::Command,
                command: "hive".to_string(),
                args: vec!["-e".to_string(), "SELECT * FROM trading_data".to_string()],
                path: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
