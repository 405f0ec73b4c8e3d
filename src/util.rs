use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::OptionErr;

/// Token grammars checked before numeric conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericGrammar {
    /// `[+-]digits`
    Integer,
    /// `[+-]digits[.digits][(e|E)[+-]digits]`, the mantissa may start or end with the point.
    Float,
}

impl NumericGrammar {
    pub fn matches(self, token: &str) -> bool {
        let bytes = token.as_bytes();
        let body = match bytes.first() {
            Some(b'+') | Some(b'-') => &bytes[1..],
            _ => bytes,
        };

        let mut digits = 0;
        let mut found_decimal = false;
        for (i, &b) in body.iter().enumerate() {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' if self == NumericGrammar::Float && !found_decimal => found_decimal = true,
                b'e' | b'E' if self == NumericGrammar::Float && digits > 0 => {
                    return Self::is_exponent(&body[i + 1..]);
                }
                _ => return false,
            }
        }
        digits > 0
    }

    fn is_exponent(bytes: &[u8]) -> bool {
        let digits = match bytes.first() {
            Some(b'+') | Some(b'-') => &bytes[1..],
            _ => bytes,
        };
        !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
    }
}

pub struct OptionValidator;

impl OptionValidator {
    fn is_valid_short(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '?' || c == '@'
    }

    pub fn validate_short(short: char) -> Result<(), OptionErr> {
        if Self::is_valid_short(short) {
            Ok(())
        } else {
            Err(OptionErr::InvalidShortName(short))
        }
    }

    pub fn validate_long(long: &str) -> Result<(), OptionErr> {
        if long.is_empty()
            || long.starts_with('-')
            || long.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(OptionErr::InvalidLongName(long.to_owned()));
        }
        Ok(())
    }
}

/// Opens `path` for reading and closes it straight away.
pub fn check_readable(path: &Path) -> io::Result<()> {
    File::open(path).map(drop)
}
