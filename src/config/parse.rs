use std::time::Duration;

use crate::error::ValidationError;

/// Accepted suffixes and their size in milliseconds. A bare number is seconds.
const UNIT_MILLIS: [(&str, u64); 5] = [
    ("ms", 1),
    ("s", 1_000),
    ("", 1_000),
    ("m", 60_000),
    ("h", 3_600_000),
];

/// Parse `500ms`, `5s`, `2m`, `1h`, or a bare number of seconds. Zero is
/// rejected: neither a cooldown nor a request timeout may be instant.
pub(crate) fn parse_duration_value(value: &str) -> Result<Duration, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let split = value
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    if digits.is_empty() {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }

    let scale = UNIT_MILLIS
        .iter()
        .find_map(|(suffix, millis)| (*suffix == unit).then_some(*millis))
        .ok_or_else(|| ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        })?;
    let amount: u64 = digits
        .parse()
        .map_err(|source| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source,
        })?;
    let millis = amount
        .checked_mul(scale)
        .ok_or(ValidationError::DurationOverflow)?;

    match Duration::from_millis(millis) {
        duration if duration.is_zero() => Err(ValidationError::DurationZero),
        duration => Ok(duration),
    }
}
