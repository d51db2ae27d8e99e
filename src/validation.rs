//! Field-level input checks shared by the entity services.

use rust_decimal::Decimal;

use crate::error::AppError;

/// Largest value a `NUMERIC(12, 2)` money column holds.
pub const MONEY_MAX: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Upper bound for client-supplied and appended display order indices.
pub const ORDER_INDEX_MAX: i32 = 1_000_000;

/// Money as stored and serialized: always two decimal places.
pub fn money(mut value: Decimal) -> Decimal {
    value.rescale(2);
    value
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub mod timestamp {
    use serde::{de, Deserialize, Deserializer};
    use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

    pub fn parse(s: &str) -> Result<OffsetDateTime, String> {
        let s = s.trim();
        if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(ts);
        }
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(|d| d.midnight().assume_utc())
            .map_err(|_| format!("invalid timestamp {s:?}, expected RFC 3339 or YYYY-MM-DD"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<OffsetDateTime>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| parse(&raw))
                .transpose()
                .map_err(de::Error::custom)
        }
    }
}

/// Trimmed, non-empty, NUL-free, at most `max` characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, AppError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::validation(field, format!("{field} is required")));
    }
    if v.contains('\0') {
        return Err(AppError::validation(
            field,
            format!("{field} must not contain NUL characters"),
        ));
    }
    if v.chars().count() > max {
        return Err(AppError::validation(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(v.to_string())
}

/// Like [`required_text`] for an optional value; blank becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max).map(Some),
    }
}

/// Money amount: `0..=MONEY_MAX`, rounded to cents.
pub fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::validation(field, format!("{field} must not be negative")));
    }
    let value = value.round_dp(2);
    if value > MONEY_MAX {
        return Err(AppError::validation(
            field,
            format!("{field} must be at most {MONEY_MAX}"),
        ));
    }
    Ok(value)
}

pub fn order_index(field: &'static str, value: Option<i32>) -> Result<Option<i32>, AppError> {
    match value {
        Some(v) if !(0..=ORDER_INDEX_MAX).contains(&v) => Err(AppError::validation(
            field,
            format!("{field} must be between 0 and {ORDER_INDEX_MAX}"),
        )),
        _ => Ok(value),
    }
}

/// Both bounds present and out of order is the only failure.
pub fn ordered<T: PartialOrd>(
    field: &'static str,
    start: Option<T>,
    end: Option<T>,
    message: &str,
) -> Result<(), AppError> {
    match (start, end) {
        (Some(s), Some(e)) if s > e => Err(AppError::validation(field, message)),
        _ => Ok(()),
    }
}
