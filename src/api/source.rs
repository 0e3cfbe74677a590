/**
* filename : source
* author : HAMA
* date: 2025. 5. 13.
* description: 차트용 행을 가져오는 데이터 소스
**/

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::process::Command;

use crate::config::{DataSourceConfig, DataSourceKind};
use crate::error::IndicatorError;
use crate::models::record::parse_number;
use crate::utils::logging;

/// 차트 한 점 (집계 출력의 date, vwap, rsi 컬럼)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
  pub date: String,
  pub vwap: f64,
  pub rsi: f64,
}

impl ChartRow {
  /// `date,vwap,ma,rsi,...` 레이아웃의 한 행을 파싱
  pub fn parse(line: &str, delimiter: char) -> Result<Self, IndicatorError> {
    let fields: Vec<&str> = line.trim().split(delimiter).collect();
    if fields.len() < 4 {
      return Err(IndicatorError::MissingData(format!(
        "row has {} columns, expected at least 4", fields.len()
      )));
    }

    Ok(ChartRow {
      date: fields[0].trim().to_string(),
      vwap: parse_number(fields[1], "vwap")?,
      rsi: parse_number(fields[3], "rsi")?,
    })
  }
}

/// 원시 출력 텍스트를 행으로 변환 (파싱 실패 행은 경고 후 건너뜀)
pub fn parse_rows(raw: &str, delimiter: char, source: &str) -> Vec<ChartRow> {
  let mut rows = Vec::new();
  let mut skipped = 0;

  for line in raw.lines().filter(|l| !l.trim().is_empty()) {
    match ChartRow::parse(line, delimiter) {
      Ok(row) => rows.push(row),
      Err(e) => {
        skipped += 1;
        log::warn!("행 건너뜀 ({}): {:?} - {}", source, line, e);
      }
    }
  }

  logging::log_rows_fetched(source, rows.len(), skipped);
  rows
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowSource: Send + Sync {
  async fn fetch_rows(&self) -> Result<Vec<ChartRow>, IndicatorError>;
}

/// 외부 명령 (기본: `hive -e "SELECT * FROM trading_data"`) 의 탭 구분 출력
#[derive(Debug, Clone)]
pub struct CommandRowSource {
  program: String,
  args: Vec<String>,
}

impl CommandRowSource {
  pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
    CommandRowSource {
      program: program.into(),
      args,
    }
  }
}

#[async_trait]
impl RowSource for CommandRowSource {
  async fn fetch_rows(&self) -> Result<Vec<ChartRow>, IndicatorError> {
    let output = Command::new(&self.program)
      .args(&self.args)
      .output()
      .await
      .map_err(|e| IndicatorError::DataSourceError(format!("failed to run {}: {}", self.program, e)))?;

    if !output.status.success() {
      return Err(IndicatorError::DataSourceError(format!(
        "{} exited with {}: {}",
        self.program,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
      )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_rows(&stdout, '\t', &self.program))
  }
}

/// 집계 출력 파일 (쉼표 구분)
#[derive(Debug, Clone)]
pub struct FileRowSource {
  path: PathBuf,
}

impl FileRowSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    FileRowSource { path: path.into() }
  }
}

#[async_trait]
impl RowSource for FileRowSource {
  async fn fetch_rows(&self) -> Result<Vec<ChartRow>, IndicatorError> {
    let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
      std::io::ErrorKind::NotFound => IndicatorError::DataNotFound(self.path.display().to_string()),
      _ => IndicatorError::DataSourceError(format!("failed to read {}: {}", self.path.display(), e)),
    })?;

    Ok(parse_rows(&raw, ',', &self.path.display().to_string()))
  }
}

/// 설정에 맞는 데이터 소스 생성
pub fn from_config(config: &DataSourceConfig) -> Result<Arc<dyn RowSource>, IndicatorError> {
  match config.kind {
    DataSourceKind::Command => Ok(Arc::new(CommandRowSource::new(config.command.clone(), config.args.clone()))),
    DataSourceKind::File => {
      let path = config
        .path
        .clone()
        .ok_or_else(|| IndicatorError::ConfigError("data_source.path is required for the file source".to_string()))?;
      Ok(Arc::new(FileRowSource::new(path)))
    }
  }
}
