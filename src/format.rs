//! Formatting helpers shared verbatim by both drawing targets.
//!
//! Currency strings use the Indian digit grouping convention (the tax model
//! is CGST/SGST/IGST): the last three integer digits form one group, every
//! group before it has two digits. The PDF composer substitutes the ASCII
//! abbreviation for the rupee glyph only when its Unicode fallback font is
//! unavailable; the grouping and decimals never change.

use chrono::NaiveDate;

/// The currency glyph emitted by [`format_currency`].
pub const CURRENCY_GLYPH: char = '\u{20B9}'; // ₹
/// Three-character ASCII abbreviation substituted when the glyph cannot be
/// rendered.
pub const CURRENCY_ASCII: &str = "INR";

/// Format a monetary amount: glyph + Indian-grouped integer part + exactly
/// two decimals. `1234567.5` → `"₹12,34,567.50"`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let rupees = cents / 100;
    let paise = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{CURRENCY_GLYPH}{}.{paise:02}", group_indian(rupees))
}

/// Indian digit grouping: `1234567` → `"12,34,567"`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_grouped = head
        .as_bytes()
        .rchunks(2)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join(",");
    format!("{head_grouped},{tail}")
}

/// Replace the currency glyph with its ASCII abbreviation, for the PDF
/// composer's degraded path.
pub fn ascii_currency(s: &str) -> String {
    s.replace(CURRENCY_GLYPH, &format!("{CURRENCY_ASCII} "))
}

/// Format an ISO date (`YYYY-MM-DD`, optionally with a trailing time part)
/// as `DD Mon YYYY`. Anything unparseable is echoed unchanged — the issue
/// date is display-only and must never abort a render.
pub fn format_date(iso: &str) -> String {
    let date_part = if iso.len() > 10 { &iso[..10] } else { iso };
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Format a quantity: whole numbers without decimals, otherwise two places.
pub fn format_quantity(qty: f64) -> String {
    if (qty - qty.round()).abs() < 1e-9 {
        format!("{}", qty.round() as i64)
    } else {
        format!("{qty:.2}")
    }
}

/// Format a tax percentage for a totals-row label: `9.0` → `"9%"`,
/// `2.5` → `"2.5%"`.
pub fn format_percent(pct: f64) -> String {
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{}%", pct.round() as i64)
    } else {
        format!("{pct}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_zero() {
        assert_eq!(format_currency(0.0), "₹0.00");
    }

    #[test]
    fn currency_indian_grouping() {
        assert_eq!(format_currency(1234567.5), "₹12,34,567.50");
        assert_eq!(format_currency(100.0), "₹100.00");
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(100000.0), "₹1,00,000.00");
    }

    #[test]
    fn currency_rounds_to_two_decimals() {
        assert_eq!(format_currency(9.005), "₹9.01");
        assert_eq!(format_currency(117.999), "₹118.00");
    }

    #[test]
    fn currency_negative() {
        assert_eq!(format_currency(-1500.25), "-₹1,500.25");
        // A negative that rounds to zero drops the sign.
        assert_eq!(format_currency(-0.0001), "₹0.00");
    }

    #[test]
    fn ascii_substitution() {
        assert_eq!(ascii_currency("₹1,234.00"), "INR 1,234.00");
        assert_eq!(ascii_currency("no glyph"), "no glyph");
    }

    #[test]
    fn date_formats_two_digit_day() {
        assert_eq!(format_date("2026-01-05"), "05 Jan 2026");
        assert_eq!(format_date("2025-12-31"), "31 Dec 2025");
    }

    #[test]
    fn date_accepts_datetime_suffix() {
        assert_eq!(format_date("2026-03-09T14:30:00Z"), "09 Mar 2026");
    }

    #[test]
    fn date_is_idempotent() {
        let once = format_date("2026-08-29");
        let twice = format_date(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "29 Aug 2026");
    }

    #[test]
    fn date_echoes_garbage() {
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn quantity_trims_whole_numbers() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.50");
    }

    #[test]
    fn percent_labels() {
        assert_eq!(format_percent(9.0), "9%");
        assert_eq!(format_percent(2.5), "2.5%");
    }
}
