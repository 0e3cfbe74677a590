/**
* filename : window
* author : HAMA
* date: 2025. 5. 12.
* description: 고정 길이 FIFO 윈도우
**/

use std::collections::VecDeque;

/// 최근 `capacity`개 값만 유지하는 윈도우
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
  capacity: usize,
  values: VecDeque<f64>,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    RollingWindow {
      capacity,
      values: VecDeque::with_capacity(capacity + 1),
    }
  }

  /// 값을 추가하고, 길이가 capacity 를 넘으면 가장 오래된 값을 돌려준다
  pub fn push(&mut self, value: f64) -> Option<f64> {
    self.values.push_back(value);
    if self.values.len() > self.capacity {
      self.values.pop_front()
    } else {
      None
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.values.len() >= self.capacity
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn latest(&self) -> Option<f64> {
    self.values.back().copied()
  }

  /// 끝에서 `n`개의 평균 (값이 부족하면 None)
  pub fn trailing_mean(&self, n: usize) -> Option<f64> {
    if n == 0 || self.values.len() < n {
      return None;
    }

    let sum: f64 = self.values.iter().skip(self.values.len() - n).sum();
    Some(sum / n as f64)
  }

  /// 끝에서 `n`개 값 복사본 (오래된 것부터)
  pub fn trailing(&self, n: usize) -> Vec<f64> {
    let skip = self.values.len().saturating_sub(n);
    self.values.iter().skip(skip).copied().collect()
  }

  pub fn snapshot(&self) -> Vec<f64> {
    self.values.iter().copied().collect()
  }

  pub fn clear(&mut self) {
    self.values.clear();
  }
}
