//! Salary extraction from free text.

use common::CompensationInterval;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)";
const MIN_INTERVAL: &str = r"(?:\s*(?:/\s*|per\s+)(?:year|yr|month|mo|week|wk|day|hour|hr)\b)?";
const INTERVAL: &str = r"(?:(?:per|a|an)\s+|/\s*)(?P<interval>year|yr|month|mo|week|wk|day|hour|hr)\b";

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)(?P<cur>[$€£₹])?\s*(?P<min>{AMOUNT})\s*(?P<mink>k\b)?{MIN_INTERVAL}\s*(?:-|–|—|to)\s*[$€£₹]?\s*(?P<max>{AMOUNT})\s*(?P<maxk>k\b)?(?:\s*(?P<code>USD|EUR|GBP|INR|CAD|AUD)\b)?(?:\s*{INTERVAL})?"
    );
    Regex::new(&pattern).expect("salary range pattern compiles")
});

static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)(?P<cur>[$€£₹])?\s*(?P<min>{AMOUNT})\s*(?P<mink>k\b)?(?:\s*(?P<code>USD|EUR|GBP|INR|CAD|AUD)\b)?(?:\s*{INTERVAL})?"
    );
    Regex::new(&pattern).expect("single salary pattern compiles")
});

/// Salary figures pulled out of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub interval: Option<CompensationInterval>,
    pub currency: Option<String>,
}

/// Finds the first plausible salary in `text`.
///
/// Ranges ("$50,000 - $70,000 a year", "60k-80k") win over single figures
/// ("$45/hr", "60000 USD"), which are reported with `min == max`. Bare
/// numbers only count when they carry a currency, a `k` suffix or an
/// interval, or when they are at least 1000.
pub fn extract_salary_range(text: &str) -> Option<SalaryRange> {
    for cap in RANGE_RE.captures_iter(text) {
        let min = amount(&cap, "min", "mink")?;
        let max = amount(&cap, "max", "maxk")?;
        if min > max || !is_marked(&cap, min) {
            continue;
        }
        return Some(build(&cap, min, max));
    }

    for cap in SINGLE_RE.captures_iter(text) {
        let value = amount(&cap, "min", "mink")?;
        let has_currency = cap.name("cur").is_some() || cap.name("code").is_some();
        if has_currency && (value >= 1000.0 || cap.name("interval").is_some()) {
            return Some(build(&cap, value, value));
        }
    }
    None
}

fn amount(cap: &Captures<'_>, name: &str, suffix: &str) -> Option<f64> {
    let digits: String = cap
        .name(name)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value: f64 = digits.parse().ok()?;
    Some(if cap.name(suffix).is_some() { value * 1000.0 } else { value })
}

fn is_marked(cap: &Captures<'_>, min: f64) -> bool {
    cap.name("cur").is_some()
        || cap.name("code").is_some()
        || cap.name("mink").is_some()
        || cap.name("maxk").is_some()
        || cap.name("interval").is_some()
        || min >= 1000.0
}

fn build(cap: &Captures<'_>, min: f64, max: f64) -> SalaryRange {
    let currency = cap
        .name("code")
        .map(|m| m.as_str().to_ascii_uppercase())
        .or_else(|| cap.name("cur").and_then(|m| symbol_currency(m.as_str())).map(String::from));
    let interval = cap
        .name("interval")
        .and_then(|m| CompensationInterval::from_label(m.as_str()))
        .or_else(|| infer_interval(max));

    SalaryRange {
        min,
        max,
        interval,
        currency,
    }
}

fn symbol_currency(symbol: &str) -> Option<&'static str> {
    match symbol {
        "$" => Some("USD"),
        "€" => Some("EUR"),
        "£" => Some("GBP"),
        "₹" => Some("INR"),
        _ => None,
    }
}

// Small figures are hourly rates, large ones annual pay; anything in
// between is left open.
fn infer_interval(max: f64) -> Option<CompensationInterval> {
    if max < 1000.0 {
        Some(CompensationInterval::Hourly)
    } else if max >= 10_000.0 {
        Some(CompensationInterval::Yearly)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_salary_with_dollar_sign() {
        let salary = extract_salary_range("$50,000 - $70,000").unwrap();
        assert_eq!(salary.min, 50000.0);
        assert_eq!(salary.max, 70000.0);
        assert_eq!(salary.currency.as_deref(), Some("USD"));
        assert_eq!(salary.interval, Some(CompensationInterval::Yearly));
    }

    #[test]
    fn test_extract_salary_without_dollar_sign() {
        let salary = extract_salary_range("Salary: 60000 USD").unwrap();
        assert_eq!((salary.min, salary.max), (60000.0, 60000.0));
        assert_eq!(salary.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_extract_salary_no_salary() {
        assert_eq!(extract_salary_range("Competitive salary"), None);
    }

    #[test]
    fn test_extract_salary_with_k_notation() {
        let salary = extract_salary_range("Pay: 60k-80k GBP").unwrap();
        assert_eq!((salary.min, salary.max), (60000.0, 80000.0));
        assert_eq!(salary.currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_extract_salary_with_interval() {
        let salary = extract_salary_range("$120,000/year").unwrap();
        assert_eq!(salary.min, 120000.0);
        assert_eq!(salary.interval, Some(CompensationInterval::Yearly));

        let salary = extract_salary_range("Up to $45/hr").unwrap();
        assert_eq!(salary.max, 45.0);
        assert_eq!(salary.interval, Some(CompensationInterval::Hourly));

        let salary = extract_salary_range("₹8,00,000 - ₹12,00,000 a year").unwrap();
        assert_eq!(salary.currency.as_deref(), Some("INR"));
        assert_eq!(salary.interval, Some(CompensationInterval::Yearly));
    }

    #[test]
    fn test_extract_salary_with_interval_on_both_bounds() {
        let salary = extract_salary_range("$100,000.00/yr - $150,000.00/yr").unwrap();
        assert_eq!((salary.min, salary.max), (100000.0, 150000.0));
        assert_eq!(salary.interval, Some(CompensationInterval::Yearly));
    }

    #[test]
    fn test_experience_ranges_are_ignored() {
        assert_eq!(extract_salary_range("Requires 2-3 years of Rust"), None);
    }
}
