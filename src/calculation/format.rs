//! ISK display formatting.
//!
//! Presentation only: grouping never changes the stored integer amounts.

use crate::models::Isk;

/// Formats an amount with comma thousands separators.
///
/// # Examples
///
/// ```
/// use loot_split::calculation::format_isk;
///
/// assert_eq!(format_isk(1_234_567), "1,234,567");
/// assert_eq!(format_isk(999), "999");
/// assert_eq!(format_isk(-1_000), "-1,000");
/// ```
pub fn format_isk(amount: Isk) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        formatted.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

/// Formats an amount with separators and the " ISK" suffix.
pub fn format_isk_with_unit(amount: Isk) -> String {
    format!("{} ISK", format_isk(amount))
}
