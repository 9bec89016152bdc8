/// Abbreviate a monetary amount into a short word form ("301 million").
///
/// Trailing digits are truncated, not rounded, so the output never overstates
/// a budget figure. Billions keep one decimal place since whole billions are
/// too coarse for city budgets.
pub fn to_abbreviated_word(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    if len > 9 {
        format!("{}.{} billion", &digits[..len - 9], &digits[len - 9..len - 8])
    } else if len > 6 {
        format!("{} million", &digits[..len - 6])
    } else if len > 3 {
        format!("{} thousand", &digits[..len - 3])
    } else {
        digits
    }
}

/// Format an integer with comma thousands separators
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate a string to fit within max_width, adding ellipsis if needed
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.len() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        format!("{}...", &s[..max_width - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_stay_plain() {
        assert_eq!(to_abbreviated_word(0), "0");
        assert_eq!(to_abbreviated_word(500), "500");
        assert_eq!(to_abbreviated_word(999), "999");
    }

    #[test]
    fn thousands_truncate_last_three_digits() {
        assert_eq!(to_abbreviated_word(1000), "1 thousand");
        assert_eq!(to_abbreviated_word(105000), "105 thousand");
        assert_eq!(to_abbreviated_word(999999), "999 thousand");
    }

    #[test]
    fn millions_truncate_last_six_digits() {
        assert_eq!(to_abbreviated_word(18558125), "18 million");
        assert_eq!(to_abbreviated_word(301809379), "301 million");
        assert_eq!(to_abbreviated_word(999999999), "999 million");
    }

    #[test]
    fn billions_keep_one_decimal_place() {
        assert_eq!(to_abbreviated_word(1234567890), "1.2 billion");
        assert_eq!(to_abbreviated_word(1000000000), "1.0 billion");
        // Truncation: 1.29 billion reads as 1.2, never 1.3
        assert_eq!(to_abbreviated_word(1299999999), "1.2 billion");
        assert_eq!(to_abbreviated_word(123456789012), "123.4 billion");
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(500), "500");
        assert_eq!(group_thousands(1437), "1,437");
        assert_eq!(group_thousands(301809379), "301,809,379");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }
}
