use crate::error::{BatesError, Result};
use crate::types::BatesPage;
use tracing::debug;

/// Bounded history of the last two bates positions the user referenced,
/// plus the highest valid number in the document that produced the most
/// recent entry.
///
/// One ring lives per open source document: construct it on open, drop or
/// `reset` it on close. It is single-writer state; callers that share it
/// across tasks must serialize access themselves.
#[derive(Debug, Default, Clone)]
pub struct ReferenceRing {
    entries: Vec<BatesPage>,
    max_number: u64,
}

const RING_CAPACITY: usize = 2;

impl ReferenceRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a copy event. The oldest entry is evicted beyond capacity.
    pub fn push(&mut self, page: BatesPage) {
        self.entries.push(page);
        if self.entries.len() > RING_CAPACITY {
            self.entries.remove(0);
        }
    }

    /// Records the last valid number in the copied-from document. Persists
    /// until the next copy event updates it.
    pub fn set_max_number(&mut self, n: u64) {
        self.max_number = n;
    }

    pub fn max_number(&self) -> u64 {
        self.max_number
    }

    pub fn entries(&self) -> &[BatesPage] {
        &self.entries
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.max_number = 0;
    }

    /// The two held positions as (smaller, larger) by number. Both must
    /// exist and share a prefix.
    pub fn ordered_pair(&self) -> Result<(BatesPage, BatesPage)> {
        if self.entries.len() < RING_CAPACITY {
            return Err(BatesError::InsufficientHistory {
                len: self.entries.len(),
            });
        }

        let a = &self.entries[0];
        let b = &self.entries[1];
        if a.prefix != b.prefix {
            return Err(BatesError::PrefixMismatch {
                expected: a.prefix.clone(),
                found: b.prefix.clone(),
            });
        }

        if a.number <= b.number {
            Ok((a.clone(), b.clone()))
        } else {
            Ok((b.clone(), a.clone()))
        }
    }

    /// Text for a paste event: a single short-form page when both entries
    /// print identically, otherwise "<a> - <b>".
    pub fn paste_text(&self) -> Result<String> {
        let (a, b) = self.ordered_pair()?;
        let (a_text, b_text) = (a.format(true), b.format(true));
        if a_text == b_text {
            Ok(a_text)
        } else {
            Ok(format!("{} - {}", a_text, b_text))
        }
    }

    /// Walks the ring forward: the page after the larger entry becomes
    /// both entries, so the next paste starts from consecutive positions.
    /// Returns `None` without mutating once the document's last valid
    /// number is reached.
    pub fn advance(&mut self) -> Result<Option<BatesPage>> {
        let (_, larger) = self.ordered_pair()?;
        let candidate = larger.increment(1);

        if candidate.number > self.max_number {
            debug!(
                "not advancing past {} (max {})",
                candidate.number, self.max_number
            );
            return Ok(None);
        }

        self.push(candidate.clone());
        self.push(candidate.clone());
        Ok(Some(candidate))
    }
}
