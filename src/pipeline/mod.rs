//! 파이프라인 단계 실행
//!
//! map (CSV 봉 → 레코드), reduce (레코드 → 지표 행), run (두 단계를 한 프로세스에서)

pub mod aggregator;
pub mod emitter;

pub use aggregator::{AggregatorState, IndicatorAggregator, SampleMode};
pub use emitter::{emit, emit_line, parse_bar};

use std::io::{BufRead, BufWriter, Read, Write};

use crate::error::IndicatorError;
use crate::models::market_data::OhlcvBar;
use crate::models::output::OutputRow;
use crate::utils::logging;

/// 단계 실행 결과 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub read: u64,
    pub emitted: u64,
    pub skipped: u64,
}

/// CSV 입력의 봉마다 `on_bar` 호출
///
/// 헤더는 세지 않고, 잘못된 행은 건너뛰며 센다. IO 오류만 전체 실패로 처리한다.
fn for_each_bar<R, F>(input: R, summary: &mut StageSummary, mut on_bar: F) -> Result<(), IndicatorError>
where
    R: Read,
    F: FnMut(OhlcvBar, &mut StageSummary) -> Result<(), IndicatorError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    for (idx, result) in reader.records().enumerate() {
        let line_no = idx as u64 + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                summary.read += 1;
                summary.skipped += 1;
                logging::log_record_skipped(line_no, "<unreadable>", &e.into());
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        match emitter::parse_bar_fields(&fields) {
            Ok(Some(bar)) => {
                summary.read += 1;
                on_bar(bar, summary)?;
            }
            Ok(None) => {}
            Err(e) => {
                summary.read += 1;
                summary.skipped += 1;
                logging::log_record_skipped(line_no, &fields.join(","), &e);
            }
        }
    }

    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &OutputRow, summary: &mut StageSummary) -> Result<(), IndicatorError> {
    writeln!(out, "{}", row)?;
    summary.emitted += 1;
    Ok(())
}

/// map 단계: CSV 봉을 탭 구분 레코드 줄로 출력
pub fn run_map<R: Read, W: Write>(input: R, output: W) -> Result<StageSummary, IndicatorError> {
    logging::log_stage_start("map");
    let mut out = BufWriter::new(output);
    let mut summary = StageSummary::default();

    for_each_bar(input, &mut summary, |bar, summary| {
        for record in emitter::emit(&bar) {
            writeln!(out, "{}", record)?;
            summary.emitted += 1;
        }
        Ok(())
    })?;

    out.flush()?;
    logging::log_stage_summary("map", summary.read, summary.emitted, summary.skipped);
    Ok(summary)
}

/// reduce 단계: 레코드 줄을 집계해 지표 행을 출력
pub fn run_reduce<R: BufRead, W: Write>(
    input: R,
    output: W,
    aggregator: &mut IndicatorAggregator,
) -> Result<StageSummary, IndicatorError> {
    logging::log_stage_start("reduce");
    let mut out = BufWriter::new(output);
    let mut summary = StageSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.read += 1;

        match aggregator.process_line(&line) {
            Ok(Some(row)) => write_row(&mut out, &row, &mut summary)?,
            Ok(None) => {}
            Err(e) if e.is_skippable() => {
                summary.skipped += 1;
                logging::log_record_skipped(idx as u64 + 1, &line, &e);
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(row) = aggregator.finish() {
        write_row(&mut out, &row, &mut summary)?;
    }

    out.flush()?;
    logging::log_stage_summary("reduce", summary.read, summary.emitted, summary.skipped);
    Ok(summary)
}

/// map 과 reduce 를 텍스트 변환 없이 한 번에 실행
pub fn run_pipeline<R: Read, W: Write>(
    input: R,
    output: W,
    aggregator: &mut IndicatorAggregator,
) -> Result<StageSummary, IndicatorError> {
    logging::log_stage_start("run");
    let mut out = BufWriter::new(output);
    let mut summary = StageSummary::default();

    for_each_bar(input, &mut summary, |bar, summary| {
        for record in emitter::emit(&bar) {
            match aggregator.process(record) {
                Ok(Some(row)) => write_row(&mut out, &row, summary)?,
                Ok(None) => {}
                Err(e) if e.is_skippable() => {
                    summary.skipped += 1;
                    log::debug!("레코드 건너뜀 ({}): {}", bar.open_time, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    })?;

    if let Some(row) = aggregator.finish() {
        write_row(&mut out, &row, &mut summary)?;
    }

    out.flush()?;
    logging::log_stage_summary("run", summary.read, summary.emitted, summary.skipped);
    Ok(summary)
}
