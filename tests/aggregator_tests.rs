//! 집계기 테스트
//!
//! 윈도우, gain/loss, 워밍업, VWAP 누적, RSI 범위, 재실행 결정성 검증

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use xIndicator::{IndicatorAggregator, OutputRow, PartialRecord, SampleMode, UNKNOWN_DATE};

const CLOSES: [f64; 14] = [10.0, 11.0, 10.0, 12.0, 13.0, 12.0, 14.0, 15.0, 14.0, 16.0, 17.0, 16.0, 18.0, 19.0];

fn bar(close: f64, volume: f64, ts: i64) -> Vec<PartialRecord> {
  vec![
    PartialRecord::VwapContribution { price_volume: close * volume, volume },
    PartialRecord::MaSample { close },
    PartialRecord::RsiSample { close, timestamp: ts.to_string() },
  ]
}

fn random_closes(seed: u64, n: usize) -> Vec<f64> {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut price = 100.0;
  (0..n)
    .map(|_| {
      price += rng.gen_range(-5.0..5.0);
      price
    })
    .collect()
}

fn feed(agg: &mut IndicatorAggregator, closes: &[f64]) -> Vec<OutputRow> {
  let mut rows = Vec::new();
  for (i, close) in closes.iter().enumerate() {
    for record in bar(*close, 1.0 + i as f64, 1_609_459_200_000 + i as i64 * 60_000) {
      if let Some(row) = agg.process(record).unwrap() {
        rows.push(row);
      }
    }
  }
  rows.extend(agg.finish());
  rows
}

#[rstest]
#[case(SampleMode::PerBar)]
#[case(SampleMode::PerRecord)]
fn test_price_window_holds_most_recent_closes(#[case] mode: SampleMode) {
  let mut agg = IndicatorAggregator::new(14, mode);
  let closes = random_closes(7, 60);
  let mut seen = Vec::new();

  for (i, close) in closes.iter().enumerate() {
    for record in bar(*close, 1.0, i as i64) {
      if let Some(c) = record.close() {
        seen.push(c);
      }
      agg.process(record).unwrap();
      if mode == SampleMode::PerBar && seen.len() % 2 == 1 {
        // MA 샘플은 RSI 샘플이 올 때 반영된다
        continue;
      }

      let window = agg.state().price_window();
      assert!(window.len() <= 14);
      let applied: Vec<f64> = match mode {
        SampleMode::PerBar => seen.iter().skip(1).step_by(2).copied().collect(),
        SampleMode::PerRecord => seen.clone(),
      };
      let start = applied.len().saturating_sub(14);
      assert_eq!(window, applied[start..].to_vec());
      assert_eq!(agg.state().gains_window().len(), agg.state().losses_window().len());
    }
  }
}

#[test]
fn test_gain_loss_complementarity() {
  let mut agg = IndicatorAggregator::new(14, SampleMode::PerBar);
  let closes = random_closes(11, 40);
  let mut prev: Option<f64> = None;

  for (i, close) in closes.iter().enumerate() {
    for record in bar(*close, 1.0, i as i64) {
      agg.process(record).unwrap();
    }
    if let Some(prev) = prev {
      let change = close - prev;
      let gain = *agg.state().gains_window().last().unwrap();
      let loss = *agg.state().losses_window().last().unwrap();
      if change != 0.0 {
        assert!((gain == 0.0) != (loss == 0.0));
        assert_eq!(gain + loss, change.abs());
      }
    }
    prev = Some(*close);
  }
}

#[rstest]
#[case(SampleMode::PerBar, 13)]
#[case(SampleMode::PerRecord, 6)]
fn test_no_output_before_warm_up(#[case] mode: SampleMode, #[case] bars: usize) {
  let mut agg = IndicatorAggregator::new(14, mode);
  let rows = feed(&mut agg, &CLOSES[..bars]);
  assert!(rows.is_empty());
}

#[test]
fn test_vwap_totals_are_monotonic() {
  let mut agg = IndicatorAggregator::default();
  let mut rng = StdRng::seed_from_u64(3);
  let (mut last_pv, mut last_vol) = (0.0, 0.0);

  for _ in 0..200 {
    let volume = rng.gen_range(0.0..50.0);
    let price = rng.gen_range(1.0..200.0);
    agg.process(PartialRecord::VwapContribution { price_volume: price * volume, volume }).unwrap();

    assert!(agg.state().total_volume() >= last_vol);
    assert!(agg.state().total_price_volume() >= last_pv);
    last_vol = agg.state().total_volume();
    last_pv = agg.state().total_price_volume();
  }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(42)]
fn test_rsi_stays_in_bounds(#[case] seed: u64) {
  for mode in [SampleMode::PerBar, SampleMode::PerRecord] {
    let mut agg = IndicatorAggregator::new(14, mode);
    let rows = feed(&mut agg, &random_closes(seed, 120));
    assert!(!rows.is_empty());
    for row in rows {
      assert!((0.0..=100.0).contains(&row.rsi), "rsi out of range: {}", row.rsi);
    }
  }
}

#[test]
fn test_example_closes() {
  let mut agg = IndicatorAggregator::new(14, SampleMode::PerBar);
  let rows = feed(&mut agg, &CLOSES);

  // 14개 종가 = 변화량 13개, RSI 는 아직 정의되지 않음
  assert!(rows.is_empty());
  assert_eq!(agg.state().price_window(), CLOSES.to_vec());
  assert_eq!(agg.state().gains_window().len(), 13);
  assert_eq!(agg.state().losses_window().len(), 13);
  let ma: f64 = CLOSES.iter().sum::<f64>() / 14.0;

  let mut row = None;
  for record in bar(20.0, 1.0, 1_609_459_200_000 + 14 * 60_000) {
    row = agg.process(record).unwrap().or(row);
  }
  let row = row.expect("15th bar completes the RSI window");

  assert_eq!(row.date, "2021-01-01 00:14:00");
  assert_eq!(row.ma_window_snapshot.len(), 14);
  assert_eq!(row.ma_window_snapshot[0], 11.0);
  assert!((row.ma - (ma - 10.0 / 14.0 + 20.0 / 14.0)).abs() < 1e-9);
  assert!(row.rsi > 0.0 && row.rsi < 100.0);
  // 상승폭 합 14, 하락폭 합 4
  let expected_rsi = 100.0 - 100.0 / (1.0 + 14.0 / 4.0);
  assert!((row.rsi - expected_rsi).abs() < 1e-9);
}

#[test]
fn test_vwap_in_row_uses_running_totals() {
  let mut agg = IndicatorAggregator::new(2, SampleMode::PerBar);
  let rows = feed(&mut agg, &[10.0, 12.0, 11.0]);
  assert_eq!(rows.len(), 1);
  // 거래량 1, 2, 3
  let expected = (10.0 * 1.0 + 12.0 * 2.0 + 11.0 * 3.0) / 6.0;
  assert!((rows[0].vwap - expected).abs() < 1e-12);
  assert_eq!(rows[0].gains_snapshot, vec![2.0, 0.0]);
  assert_eq!(rows[0].losses_snapshot, vec![0.0, 1.0]);
}

#[test]
fn test_per_record_ma_trigger_uses_unknown_date() {
  let mut agg = IndicatorAggregator::new(2, SampleMode::PerRecord);
  let rows = feed(&mut agg, &[10.0, 12.0, 11.0]);
  assert!(rows.iter().any(|r| r.date == UNKNOWN_DATE));
  assert!(rows.iter().any(|r| r.date == "2021-01-01 00:02:00"));
}

#[test]
fn test_replay_is_byte_identical() {
  let closes = random_closes(99, 80);
  let render = |rows: Vec<OutputRow>| rows.iter().map(|r| r.to_csv_line()).collect::<Vec<_>>().join("\n");

  let first = render(feed(&mut IndicatorAggregator::default(), &closes));
  let second = render(feed(&mut IndicatorAggregator::default(), &closes));
  assert!(!first.is_empty());
  assert_eq!(first, second);

  // reset 후 재실행도 동일
  let mut agg = IndicatorAggregator::default();
  feed(&mut agg, &closes);
  agg.reset();
  assert_eq!(render(feed(&mut agg, &closes)), first);
}

#[rstest]
#[case("MA\tnot-a-number")]
#[case("RSI\t12.0\tnot-a-timestamp")]
#[case("VWAP\t1.0\tx")]
#[case("RSI\tinf\t1000")]
fn test_malformed_record_leaves_state_unchanged(#[case] line: &str) {
  let mut agg = IndicatorAggregator::new(14, SampleMode::PerRecord);
  feed(&mut agg, &CLOSES[..5]);

  let before = (
    agg.state().price_window(),
    agg.state().gains_window(),
    agg.state().losses_window(),
    agg.state().previous_close(),
    agg.state().total_volume(),
    agg.state().total_price_volume(),
  );

  assert!(agg.process_line(line).is_err());

  let after = (
    agg.state().price_window(),
    agg.state().gains_window(),
    agg.state().losses_window(),
    agg.state().previous_close(),
    agg.state().total_volume(),
    agg.state().total_price_volume(),
  );
  assert_eq!(before, after);
}
