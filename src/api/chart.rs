/**
* filename : chart
* author : HAMA
* date: 2025. 5. 13.
* description: Chart.js 지표 차트 HTML
**/

use crate::api::source::ChartRow;
use crate::error::IndicatorError;
use crate::utils::math::moving_average;

/// 차트에 그릴 시리즈 묶음
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
  pub dates: Vec<String>,
  pub vwap: Vec<f64>,
  pub rsi: Vec<f64>,
  /// VWAP 의 단순 이동평균 (집계기의 종가 MA 와는 별개)
  pub ma: Vec<f64>,
}

impl ChartData {
  pub fn from_rows(rows: &[ChartRow], ma_window: usize) -> Self {
    let dates = rows.iter().map(|r| r.date.clone()).collect();
    let vwap: Vec<f64> = rows.iter().map(|r| r.vwap).collect();
    let rsi = rows.iter().map(|r| r.rsi).collect();
    let ma = moving_average(&vwap, ma_window);

    ChartData { dates, vwap, rsi, ma }
  }

  pub fn render(&self) -> Result<String, IndicatorError> {
    render(&self.dates, &self.vwap, &self.rsi, &self.ma)
  }
}

/// 세 개의 선 차트 (VWAP, RSI, Moving Average) 를 담은 HTML 문서
///
/// MA 차트의 x 축은 마지막 `ma.len()`개 날짜이다.
pub fn render(dates: &[String], vwap: &[f64], rsi: &[f64], ma: &[f64]) -> Result<String, IndicatorError> {
  let ma_offset = dates.len().saturating_sub(ma.len());

  let dates_json = serde_json::to_string(dates)?;
  let vwap_json = serde_json::to_string(vwap)?;
  let rsi_json = serde_json::to_string(rsi)?;
  let ma_json = serde_json::to_string(ma)?;

  Ok(format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trading Indicators</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>

    <h1>Trading Indicators</h1>

    <canvas id="vwapChart" width="400" height="200"></canvas>
    <canvas id="rsiChart" width="400" height="200"></canvas>
    <canvas id="maChart" width="400" height="200"></canvas>

    <script>
        var dates = {dates};
        var vwap = {vwap};
        var rsi = {rsi};
        var ma = {ma};

        function lineChart(id, label, labels, data, color) {{
            var ctx = document.getElementById(id).getContext('2d');
            return new Chart(ctx, {{
                type: 'line',
                data: {{
                    labels: labels,
                    datasets: [{{
                        label: label,
                        data: data,
                        borderColor: color,
                        fill: false
                    }}]
                }},
                options: {{
                    scales: {{
                        y: {{
                            beginAtZero: true
                        }}
                    }}
                }}
            }});
        }}

        var vwapChart = lineChart('vwapChart', 'VWAP', dates, vwap, 'rgba(75, 192, 192, 1)');
        var rsiChart = lineChart('rsiChart', 'RSI', dates, rsi, 'rgba(153, 102, 255, 1)');
        var maChart = lineChart('maChart', 'Moving Average', dates.slice({ma_offset}), ma, 'rgba(255, 159, 64, 1)');
    </script>

</body>
</html>
"#,
    dates = dates_json,
    vwap = vwap_json,
    rsi = rsi_json,
    ma = ma_json,
    ma_offset = ma_offset,
  ))
}
