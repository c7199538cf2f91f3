// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration strings for per-file analysis budgets.
//!
//! Accepts `"500ms"`, `"5s"`, `"1.5s"` and `"1m"`.

use std::time::Duration;

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Milliseconds first: "ms" also ends in "s".
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_millis(n));
    }

    if let Some(secs) = s.strip_suffix('s') {
        let n: f64 = secs
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        if !n.is_finite() || n < 0.0 {
            return Err(format!("invalid duration: {s}"));
        }
        return Ok(Duration::from_secs_f64(n));
    }

    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_secs(n.saturating_mul(60)));
    }

    Err(format!(
        "invalid duration format: {s} (use 500ms, 5s, or 1m)"
    ))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
