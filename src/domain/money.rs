use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 12.50 = 1250 cents.
pub type Cents = i64;

/// Format cents as a string with exactly two decimals.
/// Example: 1750 -> "17.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Sum amounts, returning `None` if the result does not fit in `Cents`.
pub fn checked_sum<I>(amounts: I) -> Option<Cents>
where
    I: IntoIterator<Item = Cents>,
{
    amounts.into_iter().try_fold(0, Cents::checked_add)
}

/// Parse a decimal string into cents.
/// Example: "12.50" -> 1250, "12.5" -> 1250, "12" -> 1200, ".5" -> 50
///
/// Digits past the second decimal place are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCentsError::Empty);
    }

    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (units_str, decimal_str) = match unsigned.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (unsigned, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::TooLarge)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // "5" after the point means 50 cents
        1 => i64::from(decimal_str.as_bytes()[0] - b'0') * 10,
        _ => {
            let digits = &decimal_str.as_bytes()[..2];
            i64::from(digits[0] - b'0') * 10 + i64::from(digits[1] - b'0')
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::TooLarge)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    Empty,
    InvalidFormat,
    TooLarge,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::Empty => write!(f, "no amount given"),
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooLarge => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1775), "17.75");
        assert_eq!(format_cents(550), "5.50");
        assert_eq!(format_cents(300), "3.00");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-2000), "-20.00");
        assert_eq!(format_cents(-5), "-0.05");
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([]), Some(0));
        assert_eq!(checked_sum([1000, 550, 225]), Some(1775));
        assert_eq!(checked_sum([Cents::MAX, 1]), None);
        assert_eq!(checked_sum([Cents::MAX, 1, -1]), None);
        assert_eq!(checked_sum([Cents::MIN, -1]), None);
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("12.50"), Ok(1250));
        assert_eq!(parse_cents("20"), Ok(2000));
        assert_eq!(parse_cents("7.5"), Ok(750));
        assert_eq!(parse_cents("2.25"), Ok(225));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("3."), Ok(300));
        assert_eq!(parse_cents(" 4.10 "), Ok(410));
        assert_eq!(parse_cents("+1"), Ok(100));
        assert_eq!(parse_cents("-3.00"), Ok(-300));
        assert_eq!(parse_cents("9.999"), Ok(999)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert_eq!(parse_cents(""), Err(ParseCentsError::Empty));
        assert_eq!(parse_cents("   "), Err(ParseCentsError::Empty));
        assert_eq!(parse_cents("abc"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.2.3"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.-5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("."), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("--1"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::TooLarge)
        );
    }
}
