use crate::models::Fraction;

/// Build the `-` underline printed beneath a section title.
///
/// The underline has one dash per character of `title`.
///
/// # Examples
///
/// ```
/// use hxc_core::formatting::underline;
///
/// assert_eq!(underline("NC"), "--");
/// assert_eq!(underline(""), "");
/// ```
pub fn underline(title: &str) -> String {
    "-".repeat(title.chars().count())
}

/// Format a value as a whole integer, rounding down.
///
/// # Examples
///
/// ```
/// use hxc_core::formatting::format_integer;
/// use hxc_core::models::Fraction;
///
/// assert_eq!(format_integer(&Fraction::from(12)), "12");
/// assert_eq!(format_integer(&Fraction::new(15, 2).unwrap()), "7");
/// ```
pub fn format_integer(value: &Fraction) -> String {
    value.floor().to_string()
}

/// Format a ratio as a whole percentage with a trailing `%`.
///
/// The scaled value is truncated toward zero, never rounded.
///
/// # Examples
///
/// ```
/// use hxc_core::formatting::format_percentage;
/// use hxc_core::models::Fraction;
///
/// assert_eq!(format_percentage(&Fraction::new(1, 2).unwrap()), "50%");
/// assert_eq!(format_percentage(&Fraction::new(2, 3).unwrap()), "66%");
/// assert_eq!(format_percentage(&Fraction::from(1)), "100%");
/// ```
pub fn format_percentage(value: &Fraction) -> String {
    format!("{}%", value.percent())
}

/// Format a ratio as `numerator/denominator` in lowest terms.
///
/// # Examples
///
/// ```
/// use hxc_core::formatting::format_fraction;
/// use hxc_core::models::Fraction;
///
/// assert_eq!(format_fraction(&Fraction::new(2, 4).unwrap()), "1/2");
/// assert_eq!(format_fraction(&Fraction::from(3)), "3/1");
/// ```
pub fn format_fraction(value: &Fraction) -> String {
    value.to_string()
}

/// Format one `key : value` table line (without the newline).
pub fn format_entry(key: &str, value: &str) -> String {
    format!("{} : {}", key, value)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
