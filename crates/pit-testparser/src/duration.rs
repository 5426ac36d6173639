// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Duration text handling
//!
//! The test runner prints elapsed time as decimal seconds (`0.108s`) and the
//! result model renders durations the way the runner's own tooling does
//! (`108ms`, `1.374s`, `2m3.5s`). Both directions work on exact decimals so a
//! reported `0.07s` is exactly 70ms.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

// Fraction digits beyond this cannot affect a nanosecond count for any unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a decimal seconds token such as `0.108` or `12`
///
/// Returns `None` unless the token is `digits[.digits]` (either side may be
/// empty, not both) and fits in a [`Duration`].
#[must_use]
pub fn parse_seconds(token: &str) -> Option<Duration> {
    decimal_nanos(token, NANOS_PER_SEC).and_then(from_nanos)
}

/// Parse a duration rendered by [`format`], e.g. `1h2m3.5s` or `850µs`
#[must_use]
pub fn parse(text: &str) -> Option<Duration> {
    if text == "0" {
        return Some(Duration::ZERO);
    }
    if text.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MIN,
            "h" => NANOS_PER_HOUR,
            _ => return None,
        };
        total = total.checked_add(decimal_nanos(number, scale)?)?;
        rest = tail;
    }

    from_nanos(total)
}

/// Render a duration in the runner's human format
///
/// Sub-second values use the largest fitting unit (`850ns`, `1.5µs`, `108ms`);
/// longer ones are broken into hours, minutes and fractional seconds.
#[must_use]
pub fn format(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fraction(nanos, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fraction(nanos, 6));
    }

    let seconds = fraction(nanos % NANOS_PER_MIN, 9);
    let total_minutes = nanos / NANOS_PER_MIN;
    if total_minutes == 0 {
        return format!("{seconds}s");
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{hours}h{minutes}m{seconds}s")
    }
}

/// `value / 10^precision` as a decimal with trailing zeros removed
fn fraction(value: u128, precision: u32) -> String {
    let scale = 10u128.pow(precision);
    let whole = value / scale;
    let remainder = value % scale;
    if remainder == 0 {
        return whole.to_string();
    }

    let digits = format!("{remainder:0width$}", width = precision as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Exact `number * scale` for a `digits[.digits]` decimal, truncated to whole nanoseconds
fn decimal_nanos(number: &str, scale: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole_nanos = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?.checked_mul(scale)?
    };

    let frac = &frac[..frac.len().min(MAX_FRACTION_DIGITS)];
    let frac_nanos = if frac.is_empty() {
        0
    } else {
        let digits = frac.parse::<u128>().ok()?;
        digits.checked_mul(scale)? / 10u128.pow(frac.len() as u32)
    };

    whole_nanos.checked_add(frac_nanos)
}

fn from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Some(Duration::new(secs, subsec))
}

/// Serde adapter: `#[serde(with = "crate::duration")]`
pub(crate) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(*duration))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {text:?}")))
}
