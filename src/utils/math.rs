//! 수학 관련 유틸리티
//!
//! 평균, 이동평균 등 지표 계산에 쓰이는 함수 제공

/// 평균 계산
///
/// 누적 합을 개수로 나눈다. 증분 평균과 달리 같은 입력에 대해 항상 같은 비트를 낸다.
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 단순 이동평균 시리즈
///
/// 가득 찬 윈도우마다 하나의 값을 내므로 결과 길이는 `len - window + 1`이다.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
  if window == 0 || values.len() < window {
    return Vec::new();
  }

  values.windows(window).filter_map(average).collect()
}

/// 0 나눗셈 시 기본값을 돌려주는 나눗셈
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
  if denominator == 0.0 {
    fallback
  } else {
    numerator / denominator
  }
}
