/// Return on investment in percent, or `None` when `investment` is zero.
pub fn calculate(investment: f64, profit: f64) -> Option<f64> {
    if investment == 0f64 {
        return None;
    }
    Some((profit - investment) / investment * 100f64)
}
