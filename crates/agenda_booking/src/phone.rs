// --- File: crates/agenda_booking/src/phone.rs ---
//! Phone numbers are stored as bare digits; grouping is only for display.

/// Longest number accepted, country code included.
pub const MAX_PHONE_DIGITS: usize = 12;

// Country code, area, exchange, line
const GROUPS: [usize; 4] = [2, 3, 3, 4];

/// Strips everything but ASCII digits and caps the result at [`MAX_PHONE_DIGITS`].
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Renders `+CC AAA BBB CCCC` progressively as digits are typed.
///
/// Partial input yields a partial rendering with no trailing separator:
/// `55123` becomes `+55 123`.
pub fn format_for_display(input: &str) -> String {
    let digits = normalize_digits(input);
    let mut rest = digits.as_str();
    let mut formatted = String::with_capacity(digits.len() + GROUPS.len());

    for (index, size) in GROUPS.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at((*size).min(rest.len()));
        formatted.push(if index == 0 { '+' } else { ' ' });
        formatted.push_str(group);
        rest = tail;
    }

    formatted
}
