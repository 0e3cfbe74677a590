//! 로깅 유틸리티
//!
//! 로그 초기화 및 파이프라인 단계별 로그 함수 제공

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::fs::OpenOptions;

use crate::error::IndicatorError;

/// 로그 레벨 문자열 파싱 (알 수 없는 값은 info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// RUST_LOG 가 설정되어 있으면 그 값을, 아니면 설정 파일의 레벨을 사용한다.
/// 단계 출력이 stdout 으로 나가므로 로그는 파일 또는 stderr 로만 보낸다.
pub fn init(default_level: &str, file_path: Option<&str>) -> Result<(), IndicatorError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    let target = match file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Target::Pipe(Box::new(file))
        }
        None => Target::Stderr,
    };

    builder
        .filter_level(parse_level(&log_level))
        .target(target)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| IndicatorError::ConfigError(format!("Logger already initialized: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 파이프라인 단계 시작 로그
pub fn log_stage_start(stage: &str) {
    log::info!("단계 시작: {}", stage);
}

/// 파이프라인 단계 종료 로그
pub fn log_stage_summary(stage: &str, read: u64, emitted: u64, skipped: u64) {
    log::info!(
        "단계 종료: {} - 입력: {} - 출력: {} - 건너뜀: {}",
        stage, read, emitted, skipped
    );
}

/// 건너뛴 레코드 로그
pub fn log_record_skipped(line_no: u64, line: &str, error: &IndicatorError) {
    log::debug!("레코드 건너뜀 (line {}): {:?} - {}", line_no, line, error);
}

/// 행 소스 조회 로그
pub fn log_rows_fetched(source: &str, fetched: usize, skipped: usize) {
    log::info!("데이터 조회 완료: {} - 행: {} - 건너뜀: {}", source, fetched, skipped);
}

/// 오류 로그
pub fn log_error(context: &str, error: &IndicatorError) {
    log::error!("오류 발생 - {}: {}", context, error);
}
