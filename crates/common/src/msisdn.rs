//! Phone number (MSISDN) checks and normalization to E.164.
//!
//! National numbers default to the North American numbering plan.

/// Country code applied to national-format numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "1";

const SEPARATORS: [char; 5] = [' ', '-', '(', ')', '.'];
const MIN_INTERNATIONAL_DIGITS: usize = 8;
const MAX_INTERNATIONAL_DIGITS: usize = 15;
const NATIONAL_DIGITS: usize = 10;

/// Returns true when `raw` can be normalized to an international number.
pub fn is_valid(raw: &str) -> bool {
    to_international(raw).is_some()
}

/// Normalizes `raw` to `+<country><subscriber>` form.
///
/// Accepts an optional leading `+` or `00` international prefix and the
/// separators ` -().`. Returns `None` for anything that is not a plausible
/// phone number.
pub fn to_international(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (explicit_plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !SEPARATORS.contains(&c) {
            return None;
        }
    }

    if explicit_plus {
        return international(&digits);
    }
    if let Some(stripped) = digits.strip_prefix("00") {
        return international(stripped);
    }

    match digits.len() {
        NATIONAL_DIGITS if is_nanp_subscriber(&digits) => {
            Some(format!("+{DEFAULT_COUNTRY_CODE}{digits}"))
        }
        11 if digits.starts_with(DEFAULT_COUNTRY_CODE) && is_nanp_subscriber(&digits[1..]) => {
            Some(format!("+{digits}"))
        }
        _ => None,
    }
}

fn international(digits: &str) -> Option<String> {
    let plausible_length =
        (MIN_INTERNATIONAL_DIGITS..=MAX_INTERNATIONAL_DIGITS).contains(&digits.len());
    if !plausible_length || digits.starts_with('0') {
        return None;
    }
    if digits.starts_with(DEFAULT_COUNTRY_CODE) && digits.len() == NATIONAL_DIGITS + 1 {
        return is_nanp_subscriber(&digits[1..]).then(|| format!("+{digits}"));
    }
    Some(format!("+{digits}"))
}

// Area codes and exchanges never start with 0 or 1.
fn is_nanp_subscriber(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes.len() == NATIONAL_DIGITS && bytes[0] >= b'2' && bytes[3] >= b'2'
}
