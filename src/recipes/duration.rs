// src/recipes/duration.rs
//! Cook-time parsing
//!
//! Normalizes human-entered durations like "30m" or "2h" into whole seconds
//! so they can be stored and range-compared.

use regex::Regex;
use std::sync::OnceLock;

use crate::common::ApiError;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

/// Parse a compact duration string (`<int><unit>`, unit one of s/m/h/d)
/// into seconds.
///
/// The grammar is strict: no whitespace, no decimals, no compound values
/// like "1h30m".
pub fn parse_duration_seconds(text: &str) -> Result<i64, ApiError> {
    let re = DURATION_RE
        .get_or_init(|| Regex::new(r"^(\d+)([smhd])$").expect("duration pattern compiles"));

    let captures = re
        .captures(text)
        .ok_or_else(|| ApiError::BadRequest("Invalid time format".to_string()))?;

    let value: i64 = captures[1]
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid time format".to_string()))?;

    let multiplier = match &captures[2] {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => return Err(ApiError::BadRequest("Invalid time format".to_string())),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| ApiError::BadRequest("Invalid time format".to_string()))
}
