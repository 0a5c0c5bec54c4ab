//! Token amounts and decimal unit scaling
//!
//! Amounts are always held in the smallest unit. With [`DECIMALS`] = 18,
//! one whole token is `10^18` base units, so `1_000_000` whole tokens is
//! roughly `2^80`, far inside `u128`.

use thiserror::Error;

/// Amount of tokens in base units
pub type Amount = u128;

/// Display decimals of every ledger
pub const DECIMALS: u8 = 18;

/// Errors produced when converting between display and base units
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid character in amount: {0:?}")]
    InvalidDigit(char),
    #[error("Too many fractional digits: {found} (max {max})")]
    TooPrecise { found: usize, max: u8 },
    #[error("Amount overflows 128 bits")]
    Overflow,
}

/// `10^decimals`, if it fits
fn scale(decimals: u8) -> Option<Amount> {
    10u128.checked_pow(u32::from(decimals))
}

fn parse_digits(digits: &str) -> Result<Amount, UnitsError> {
    digits.chars().try_fold(0u128, |acc, c| {
        let digit = c.to_digit(10).ok_or(UnitsError::InvalidDigit(c))?;
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(Amount::from(digit)))
            .ok_or(UnitsError::Overflow)
    })
}

/// `whole * 10^decimals`, checked
pub fn to_base_units(whole: Amount, decimals: u8) -> Result<Amount, UnitsError> {
    scale(decimals)
        .and_then(|s| whole.checked_mul(s))
        .ok_or(UnitsError::Overflow)
}

/// Parse a decimal string such as `"100"` or `"1.5"` into base units.
pub fn parse_units(text: &str, decimals: u8) -> Result<Amount, UnitsError> {
    let text = text.trim();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitsError::Empty);
    }
    if frac_part.len() > usize::from(decimals) {
        return Err(UnitsError::TooPrecise {
            found: frac_part.len(),
            max: decimals,
        });
    }

    let whole = to_base_units(parse_digits(int_part)?, decimals)?;

    // frac_part.len() <= decimals, so the remaining scale is at most the full one
    let frac_scale = scale(decimals - frac_part.len() as u8).ok_or(UnitsError::Overflow)?;
    let frac = parse_digits(frac_part)?
        .checked_mul(frac_scale)
        .ok_or(UnitsError::Overflow)?;

    whole.checked_add(frac).ok_or(UnitsError::Overflow)
}

/// Render base units as a decimal string, trimming trailing fractional zeros.
pub fn format_units(amount: Amount, decimals: u8) -> String {
    let (whole, frac) = match scale(decimals) {
        Some(s) => (amount / s, amount % s),
        None => (0, amount),
    };

    let frac = format!("{:0width$}", frac, width = usize::from(decimals));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: Amount = 1_000_000_000_000_000_000;

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units(1, DECIMALS), Ok(ONE));
        assert_eq!(to_base_units(1_000_000, DECIMALS), Ok(1_000_000 * ONE));
        assert_eq!(to_base_units(0, DECIMALS), Ok(0));
        assert_eq!(to_base_units(u128::MAX, DECIMALS), Err(UnitsError::Overflow));
        assert_eq!(to_base_units(1, 39), Err(UnitsError::Overflow));
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("100", DECIMALS), Ok(100 * ONE));
        assert_eq!(parse_units("1.5", DECIMALS), Ok(ONE + ONE / 2));
        assert_eq!(parse_units(".25", DECIMALS), Ok(ONE / 4));
        assert_eq!(parse_units("7.", DECIMALS), Ok(7 * ONE));
        assert_eq!(parse_units("0.000000000000000001", DECIMALS), Ok(1));
        assert_eq!(parse_units("42", 0), Ok(42));
    }

    #[test]
    fn test_parse_units_rejects_bad_input() {
        assert_eq!(parse_units("", DECIMALS), Err(UnitsError::Empty));
        assert_eq!(parse_units(".", DECIMALS), Err(UnitsError::Empty));
        assert_eq!(parse_units("1a", DECIMALS), Err(UnitsError::InvalidDigit('a')));
        assert_eq!(parse_units("-1", DECIMALS), Err(UnitsError::InvalidDigit('-')));
        assert_eq!(parse_units("1.2.3", DECIMALS), Err(UnitsError::InvalidDigit('.')));
        assert_eq!(
            parse_units("0.1234", 2),
            Err(UnitsError::TooPrecise { found: 4, max: 2 })
        );
        assert_eq!(
            parse_units("1000000000000000000000", DECIMALS),
            Err(UnitsError::Overflow)
        );
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(999_900 * ONE, DECIMALS), "999900");
        assert_eq!(format_units(ONE / 2, DECIMALS), "0.5");
        assert_eq!(format_units(1, DECIMALS), "0.000000000000000001");
        assert_eq!(format_units(0, DECIMALS), "0");
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn test_format_parses_back() {
        for text in ["1000000", "0.5", "123.456"] {
            let amount = parse_units(text, DECIMALS).unwrap();
            assert_eq!(format_units(amount, DECIMALS), text);
        }
    }
}
