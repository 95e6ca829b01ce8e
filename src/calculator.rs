//! Static return calculator shown beside a project's details.

use serde::Serialize;

use crate::config::CalculatorConfig;

/// Projected returns for one amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnEstimate {
    pub amount: u64,
    pub annual: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct ReturnCalculator {
    annual_rate: f64,
    years: u32,
    minimum: u64,
    step: u64,
}

impl ReturnCalculator {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            annual_rate: config.annual_rate,
            years: config.years,
            minimum: config.minimum,
            step: config.step.max(1),
        }
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn minimum(&self) -> u64 {
        self.minimum
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn estimate(&self, amount: u64) -> ReturnEstimate {
        let annual = amount as f64 * self.annual_rate;
        ReturnEstimate {
            amount,
            annual,
            total: annual * f64::from(self.years),
        }
    }

    /// One step up from `amount`
    pub fn increment(&self, amount: u64) -> u64 {
        amount.saturating_add(self.step)
    }

    /// One step down from `amount`; never goes below zero. The minimum is
    /// a hint for the input control and does not clamp here.
    pub fn decrement(&self, amount: u64) -> u64 {
        amount.saturating_sub(self.step)
    }
}

impl Default for ReturnCalculator {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

/// Format a MAD amount with thousands separators, keeping up to two
/// decimals when the value is fractional ("1,350", "12,345.5").
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && cents > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        let decimals = format!("{fraction:02}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// `format_amount` followed by the currency
pub fn format_mad(value: f64) -> String {
    format!("{} MAD", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_projection() {
        let calc = ReturnCalculator::default();
        let projection = calc.estimate(5_000);
        assert!((projection.annual - 450.0).abs() < 1e-9);
        assert!((projection.total - 1_350.0).abs() < 1e-9);
    }

    #[test]
    fn test_configured_rate_and_horizon() {
        let calc = ReturnCalculator::new(&CalculatorConfig {
            annual_rate: 0.1,
            years: 5,
            ..CalculatorConfig::default()
        });
        let projection = calc.estimate(20_000);
        assert!((projection.annual - 2_000.0).abs() < 1e-9);
        assert!((projection.total - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_is_not_clamped_to_minimum() {
        let calc = ReturnCalculator::default();
        assert_eq!(calc.increment(5_000), 6_000);
        assert_eq!(calc.decrement(5_000), 4_000);
        assert_eq!(calc.decrement(500), 0);
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(450.0), "450");
        assert_eq!(format_amount(1_350.0), "1,350");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(12_345.5), "12,345.5");
        assert_eq!(format_amount(90.09), "90.09");
        assert_eq!(format_mad(135_000.0), "135,000 MAD");
    }
}
