//! Price input sanitation and display grouping (`1234567` -> `1 234 567`).

/// Keeps only ASCII digits from user input.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Parses a price bound typed by the user. Anything without digits clears
/// the bound; values beyond `u64` saturate.
pub fn parse_price_input(input: &str) -> Option<u64> {
    let digits = digits_only(input);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

pub fn group_digits(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Re-formats whatever the user typed so far, keeping the caret-friendly
/// grouping while they type.
pub fn format_price_input(input: &str) -> String {
    parse_price_input(input).map(group_digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1 000")]
    #[case(95000, "95 000")]
    #[case(1234567, "1 234 567")]
    fn groups_by_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(group_digits(value), expected);
    }

    #[rstest]
    #[case("120 000 ₽", Some(120000))]
    #[case("от 5", Some(5))]
    #[case("", None)]
    #[case("руб.", None)]
    #[case("99999999999999999999999", Some(u64::MAX))]
    fn parses_typed_prices(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_price_input(input), expected);
    }

    #[test]
    fn reformats_partial_input() {
        assert_eq!(format_price_input("12000a"), "12 000");
        assert_eq!(format_price_input("abc"), "");
    }
}
