//! Bounded-integer parsing of user input.
//!
//! [`InputParser`] turns a raw line into a validated number. Every failure is a
//! validation error, so the caller can stay on the current state and show the
//! message.

use crate::core::error::{LauncherError, Result};

/// Bounds accepted for any number typed by the user
pub const INPUT_MIN: i64 = i32::MIN as i64;
pub const INPUT_MAX: i64 = i32::MAX as i64;

/// Centralized parsing for numeric user input
pub struct InputParser;

impl InputParser {
    /// Parse a trimmed line as a 32-bit signed integer
    ///
    /// # Examples
    /// ```
    /// use toby_launcher::core::input_parser::InputParser;
    ///
    /// assert_eq!(InputParser::parse_int(" 42 ")?, 42);
    /// assert!(InputParser::parse_int("forty-two").is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_int(input: &str) -> Result<i64> {
        let input = input.trim();
        let num: i64 = match input.parse() {
            Ok(num) => num,
            // Digits that overflow i64 are still a number, just an unacceptable one
            Err(_) if Self::looks_numeric(input) => return Err(LauncherError::OutOfBounds),
            Err(_) => return Err(LauncherError::NotAnInteger),
        };
        if !(INPUT_MIN..=INPUT_MAX).contains(&num) {
            return Err(LauncherError::OutOfBounds);
        }
        Ok(num)
    }

    /// Check that `num` lies within `min..=max`
    pub fn check_range(num: i64, min: i64, max: i64) -> Result<()> {
        if !(INPUT_MIN..=INPUT_MAX).contains(&num) {
            return Err(LauncherError::OutOfBounds);
        }
        if num < min {
            return Err(LauncherError::BelowMinimum { min });
        }
        if num > max {
            return Err(LauncherError::AboveMaximum { max });
        }
        Ok(())
    }

    /// Parse an integer and check it against `min..=max`
    pub fn parse_int_in_range(input: &str, min: i64, max: i64) -> Result<i64> {
        let num = Self::parse_int(input)?;
        Self::check_range(num, min, max)?;
        Ok(num)
    }

    /// Like [`InputParser::parse_int_in_range`], but empty input selects `default`
    pub fn parse_optional_int_in_range(input: &str, default: i64, min: i64, max: i64) -> Result<i64> {
        if input.trim().is_empty() {
            Self::check_range(default, min, max)?;
            return Ok(default);
        }
        Self::parse_int_in_range(input, min, max)
    }

    fn looks_numeric(input: &str) -> bool {
        let digits = input.strip_prefix(&['-', '+'][..]).unwrap_or(input);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() -> Result<()> {
        assert_eq!(InputParser::parse_int("7")?, 7);
        assert_eq!(InputParser::parse_int("  -3 ")?, -3);
        assert_eq!(InputParser::parse_int("+12")?, 12);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_text() {
        let err = InputParser::parse_int("abc").unwrap_err();
        assert!(matches!(err, LauncherError::NotAnInteger));
        assert!(err.is_validation());
        assert!(matches!(InputParser::parse_int(""), Err(LauncherError::NotAnInteger)));
        assert!(matches!(InputParser::parse_int("1.5"), Err(LauncherError::NotAnInteger)));
    }

    #[test]
    fn test_parse_rejects_out_of_bounds() {
        assert!(matches!(
            InputParser::parse_int("2147483648"),
            Err(LauncherError::OutOfBounds)
        ));
        assert!(matches!(
            InputParser::parse_int("99999999999999999999999"),
            Err(LauncherError::OutOfBounds)
        ));
        assert_eq!(InputParser::parse_int("-2147483648").unwrap(), -2147483648);
    }

    #[test]
    fn test_parse_in_range() {
        assert_eq!(InputParser::parse_int_in_range("500", 0, 1000).unwrap(), 500);
        assert!(matches!(
            InputParser::parse_int_in_range("-1", 0, 1000),
            Err(LauncherError::BelowMinimum { min: 0 })
        ));
        assert!(matches!(
            InputParser::parse_int_in_range("1001", 0, 1000),
            Err(LauncherError::AboveMaximum { max: 1000 })
        ));
    }

    #[test]
    fn test_parse_optional_uses_default() {
        assert_eq!(InputParser::parse_optional_int_in_range("", 5, 0, 10).unwrap(), 5);
        assert_eq!(InputParser::parse_optional_int_in_range("8", 5, 0, 10).unwrap(), 8);
        assert!(InputParser::parse_optional_int_in_range("", 50, 0, 10).is_err());
    }
}
