//! Bounded duration parsing for `/delay`.
//!
//! Accepts either a unit-suffixed expression (`1.5s`, `300ms`, `1m30s`, `-2h`)
//! or a bare float interpreted as seconds and truncated to whole milliseconds.
//! Values outside the configured bounds are rejected, never clamped.

use std::time::Duration;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Why a duration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("duration {value:?} longer than {max:?}")]
    TooLong { value: Duration, max: Duration },

    #[error("duration {0:?} shorter than the minimum")]
    TooShort(String),
}

/// A duration known to lie within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedDuration(Duration);

impl BoundedDuration {
    pub fn parse(input: &str, min: Duration, max: Duration) -> Result<Self, DurationError> {
        let nanos = parse_nanos(input).ok_or_else(|| DurationError::Invalid(input.to_string()))?;

        if nanos < min.as_nanos() as i128 {
            return Err(DurationError::TooShort(input.to_string()));
        }
        // `nanos` is non-negative here and bounded by i64::MAX.
        let value = Duration::from_nanos(nanos as u64);
        if value > max {
            return Err(DurationError::TooLong { value, max });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> Duration {
        self.0
    }
}

/// Signed nanoseconds, unit expression first, bare seconds second.
fn parse_nanos(input: &str) -> Option<i128> {
    parse_expression(input).or_else(|| parse_seconds(input))
}

fn parse_seconds(input: &str) -> Option<i128> {
    let seconds: f64 = input.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).trunc();
    if millis.abs() > (i64::MAX as i128 / NANOS_PER_MILLI) as f64 {
        return None;
    }
    Some(millis as i128 * NANOS_PER_MILLI)
}

fn unit_nanos(unit: &str) -> Option<i128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => NANOS_PER_MILLI,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    })
}

/// `[-+]?(<digits>[.<digits>]<unit>)+` or a bare `0`.
fn parse_expression(input: &str) -> Option<i128> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = unit_nanos(unit)?;

        let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut value = whole.checked_mul(scale)?;
        let mut place = scale;
        for digit in fraction.bytes() {
            place /= 10;
            if place == 0 {
                break;
            }
            value += i128::from(digit - b'0') * place;
        }

        total = total.checked_add(value)?;
        if total > i128::from(i64::MAX) {
            return None;
        }
        rest = tail;
    }

    Some(if negative { -total } else { total })
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Duration = Duration::from_secs(60);

    fn parse(input: &str) -> Result<Duration, DurationError> {
        BoundedDuration::parse(input, Duration::ZERO, MAX).map(BoundedDuration::get)
    }

    #[test]
    fn test_unit_expressions() {
        assert_eq!(parse("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse("300ms"), Ok(Duration::from_millis(300)));
        assert_eq!(parse("250us"), Ok(Duration::from_micros(250)));
        assert_eq!(parse("250µs"), Ok(Duration::from_micros(250)));
        assert_eq!(parse("10ns"), Ok(Duration::from_nanos(10)));
        assert_eq!(parse("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse("0m30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse("+2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_bare_seconds() {
        assert_eq!(parse("5"), Ok(Duration::from_secs(5)));
        assert_eq!(parse("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse("60"), Ok(MAX));
        // Truncated to whole milliseconds.
        assert_eq!(parse("0.0019"), Ok(Duration::from_millis(1)));
    }

    #[test]
    fn test_bounds_are_rejected_not_clamped() {
        assert!(matches!(parse("61"), Err(DurationError::TooLong { .. })));
        assert!(matches!(parse("61s"), Err(DurationError::TooLong { .. })));
        assert!(matches!(parse("1h"), Err(DurationError::TooLong { .. })));
        assert!(matches!(parse("-1s"), Err(DurationError::TooShort(_))));
        assert!(matches!(parse("-3"), Err(DurationError::TooShort(_))));
    }

    #[test]
    fn test_garbage_is_invalid() {
        for input in ["", "abc", "1x", "s", "1.s.", "NaN", "inf", "-", "1e400"] {
            assert!(
                matches!(parse(input), Err(DurationError::Invalid(_))),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_huge_expression_is_invalid() {
        assert!(matches!(
            parse("99999999999999999999999999999h"),
            Err(DurationError::Invalid(_))
        ));
    }
}
