//! Log-normal 評分曲線：以 PODR 與中位數兩個控制點決定形狀。

/// Abramowitz & Stegun 7.1.26 多項式近似，最大誤差約 1.5e-7
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let t = 1.0 / (1.0 + P * x);
    let y = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    sign * (1.0 - y * (-x * x).exp())
}

/// 回傳 value 在 log-normal 分布上的互補百分位，0..1，中位數恰為 0.5
pub fn compute_log_normal_score(podr: f64, median: f64, value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }

    let location = median.ln();
    let log_ratio = (podr / median).ln();
    let shape = (1.0 - 3.0 * log_ratio - ((log_ratio - 3.0) * (log_ratio - 3.0) - 8.0).sqrt())
        .sqrt()
        / 2.0;

    let standardized = (value.ln() - location) / (std::f64::consts::SQRT_2 * shape);
    ((1.0 - erf(standardized)) / 2.0).clamp(0.0, 1.0)
}

/// 以給定粒度四捨五入後格式化毫秒數
pub fn format_milliseconds(ms: f64, granularity: f64) -> String {
    let g = if granularity > 0.0 { granularity } else { 1.0 };
    let rounded = (ms / g).round() * g;
    if g < 1.0 {
        format!("{:.1} ms", rounded)
    } else {
        format!("{:.0} ms", rounded)
    }
}
