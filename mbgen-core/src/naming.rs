//! Conversions between delimited schema identifiers and code identifiers.
//!
//! Schema identifiers are `snake_case` (or `SCREAMING_CASE`); emitted code uses
//! `lowerCamel` for members and `UpperCamel` for types. The conversion is
//! lossy: `to_delimited_lower(to_lower_camel(x))` is not guaranteed to return
//! `x`, e.g. `"ExposureTime"` becomes `"exposureTime"` and then
//! `"exposure_time"`, and `"user__name"` collapses to `"userName"`.

const DELIMITER: char = '_';

/// Convert a schema identifier to `lowerCamel` (e.g., "user_name" -> "userName").
///
/// Identifiers without a delimiter are assumed to be case-formatted already and
/// only get their first character lowered ("ExposureTime" -> "exposureTime").
pub fn to_lower_camel(identifier: &str) -> String {
    if !identifier.contains(DELIMITER) {
        return first_lower(identifier);
    }

    let lowered = identifier.to_lowercase();
    let mut parts = lowered.split(DELIMITER);
    let mut result = parts.next().unwrap_or_default().to_string();
    for part in parts.filter(|p| !p.is_empty()) {
        result.push_str(&first_upper(part));
    }
    result
}

/// Convert a schema identifier to `UpperCamel` (e.g., "USER_ID" -> "UserId").
pub fn to_upper_camel(identifier: &str) -> String {
    if !identifier.contains(DELIMITER) {
        return first_upper(identifier);
    }

    identifier
        .to_lowercase()
        .split(DELIMITER)
        .filter(|p| !p.is_empty())
        .map(first_upper)
        .collect()
}

/// Convert a camel-cased identifier back to `snake_case` (e.g., "userName" -> "user_name").
pub fn to_delimited_lower(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push(DELIMITER);
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Uppercase the first character, leaving the rest untouched.
pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character, leaving the rest untouched.
pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
