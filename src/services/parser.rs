use crate::error::{BatesError, Result};
use crate::types::{BatesPage, BatesRange};
use regex::Regex;
use tracing::debug;

/// Anchored bates-range pattern: a prefix of uppercase letters, start
/// digits, at least one non-alphanumeric separator character, an optional
/// repeat of the prefix, and end digits. Both wire forms match:
/// "COB0002421-COB0003964" and "OCA 563-894".
const RANGE_PATTERN: &str =
    r"^([A-Z]+)[^A-Za-z0-9]*([0-9]+)[^A-Za-z0-9]+([A-Z]*)[^A-Za-z0-9]*([0-9]+)$";

pub struct RangeParser {
    pattern: Regex,
}

impl RangeParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(RANGE_PATTERN).unwrap(),
        }
    }

    /// Decodes a filename stem or user string into a validated range.
    ///
    /// Validation order: pattern match, prefix agreement, then the width
    /// rule. Width is declared only when the start digits carry a leading
    /// zero, in which case both digit runs must have the same length. An
    /// end-only leading zero neither errors nor declares a width.
    pub fn parse_range(&self, name: &str) -> Result<BatesRange> {
        let captures = self.pattern.captures(name.trim()).ok_or_else(|| {
            debug!("'{}' does not match the bates range pattern", name);
            BatesError::Format {
                input: name.to_string(),
            }
        })?;

        let prefix = captures.get(1).unwrap().as_str();
        let start_digits = captures.get(2).unwrap().as_str();
        let end_prefix = captures.get(3).unwrap().as_str();
        let end_digits = captures.get(4).unwrap().as_str();

        if !end_prefix.is_empty() && end_prefix != prefix {
            return Err(BatesError::PrefixMismatch {
                expected: prefix.to_string(),
                found: end_prefix.to_string(),
            });
        }

        let width = if start_digits.starts_with('0') {
            if start_digits.len() != end_digits.len() {
                return Err(BatesError::WidthMismatch {
                    start: start_digits.to_string(),
                    end: end_digits.to_string(),
                });
            }
            Some(start_digits.len())
        } else {
            None
        };

        let start_number: u64 = start_digits.parse().map_err(|_| BatesError::Format {
            input: name.to_string(),
        })?;
        let end_number: u64 = end_digits.parse().map_err(|_| BatesError::Format {
            input: name.to_string(),
        })?;

        // A range never runs backwards.
        if start_number > end_number {
            return Err(BatesError::Format {
                input: name.to_string(),
            });
        }

        Ok(BatesRange {
            start: BatesPage::new(prefix, start_number, width),
            end: BatesPage::new(prefix, end_number, width),
        })
    }
}

impl Default for RangeParser {
    fn default() -> Self {
        Self::new()
    }
}
