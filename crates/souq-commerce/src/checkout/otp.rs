//! OTP entry state machine.
//!
//! Tracks the five digit cells, focus movement (which inverts under
//! right-to-left layout), and the auto-submit guard: submission arms
//! exactly once when every cell is filled and re-arms only after an edit.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Number of digits in an OTP code.
pub const OTP_LENGTH: usize = 5;

/// Layout direction, which controls which neighbouring cell focus moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputDirection {
    /// Left-to-right: focus advances toward higher indices.
    #[default]
    Ltr,
    /// Right-to-left: focus advances toward lower indices.
    Rtl,
}

/// The OTP entry form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    cells: [Option<u8>; OTP_LENGTH],
    direction: InputDirection,
    is_submitting: bool,
    has_error: bool,
    auto_fired: bool,
}

impl OtpEntry {
    /// Create an empty entry form.
    pub fn new(direction: InputDirection) -> Self {
        Self {
            cells: [None; OTP_LENGTH],
            direction,
            is_submitting: false,
            has_error: false,
            auto_fired: false,
        }
    }

    /// Enter a digit into a cell, returning the index focus should move to.
    ///
    /// Any edit clears the error state and re-arms auto-submit.
    pub fn enter_digit(&mut self, index: usize, ch: char) -> Result<Option<usize>, CommerceError> {
        if index >= OTP_LENGTH {
            return Err(CommerceError::OtpIndexOutOfRange(index));
        }
        let digit = ch
            .to_digit(10)
            .ok_or(CommerceError::InvalidOtpInput(ch))? as u8;

        self.cells[index] = Some(digit);
        self.has_error = false;
        self.auto_fired = false;

        Ok(match self.direction {
            InputDirection::Ltr => (index + 1 < OTP_LENGTH).then(|| index + 1),
            InputDirection::Rtl => index.checked_sub(1),
        })
    }

    /// Clear a cell (backspace), returning the index focus should move to
    /// when the cell was already empty.
    pub fn clear_digit(&mut self, index: usize) -> Result<Option<usize>, CommerceError> {
        if index >= OTP_LENGTH {
            return Err(CommerceError::OtpIndexOutOfRange(index));
        }
        self.has_error = false;
        self.auto_fired = false;

        if self.cells[index].take().is_some() {
            return Ok(None);
        }
        // Empty cell: move against the input direction and clear there too.
        let neighbour = match self.direction {
            InputDirection::Ltr => index.checked_sub(1),
            InputDirection::Rtl => (index + 1 < OTP_LENGTH).then(|| index + 1),
        };
        if let Some(n) = neighbour {
            self.cells[n] = None;
        }
        Ok(neighbour)
    }

    /// Fill all cells from pasted text.
    ///
    /// All-or-nothing: anything that is not exactly [`OTP_LENGTH`] ASCII
    /// digits leaves every cell untouched and returns `false`.
    pub fn paste(&mut self, text: &str) -> bool {
        if text.len() != OTP_LENGTH || !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        for (cell, b) in self.cells.iter_mut().zip(text.bytes()) {
            *cell = Some(b - b'0');
        }
        self.has_error = false;
        self.auto_fired = false;
        true
    }

    /// Check whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The full code, once every cell is filled.
    pub fn code(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(self.cells.iter().flatten().map(|d| (b'0' + d) as char).collect())
    }

    /// Consume the auto-submit trigger.
    ///
    /// Returns `true` exactly once per completed entry: when all cells are
    /// filled, nothing is in flight, and no prior failure is pending. Only
    /// an edit re-arms it.
    pub fn take_auto_submit(&mut self) -> bool {
        if self.is_complete() && !self.is_submitting && !self.has_error && !self.auto_fired {
            self.auto_fired = true;
            true
        } else {
            false
        }
    }

    /// Mark a submission as started.
    pub fn begin_submit(&mut self) {
        self.is_submitting = true;
        self.has_error = false;
    }

    /// Mark the in-flight submission as failed; blocks auto-submit until
    /// the user edits a cell.
    pub fn submit_failed(&mut self) {
        self.is_submitting = false;
        self.has_error = true;
    }

    /// Mark the in-flight submission as succeeded.
    pub fn submit_succeeded(&mut self) {
        self.is_submitting = false;
        self.has_error = false;
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Whether the last submission failed.
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

impl Default for OtpEntry {
    fn default() -> Self {
        Self::new(InputDirection::Ltr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(entry: &mut OtpEntry, code: &str) {
        for (i, ch) in code.chars().enumerate() {
            entry.enter_digit(i, ch).unwrap();
        }
    }

    #[test]
    fn test_focus_advances_ltr() {
        let mut entry = OtpEntry::new(InputDirection::Ltr);
        assert_eq!(entry.enter_digit(0, '1').unwrap(), Some(1));
        assert_eq!(entry.enter_digit(4, '9').unwrap(), None);
    }

    #[test]
    fn test_focus_advances_toward_lower_index_rtl() {
        let mut entry = OtpEntry::new(InputDirection::Rtl);
        assert_eq!(entry.enter_digit(4, '1').unwrap(), Some(3));
        assert_eq!(entry.enter_digit(0, '2').unwrap(), None);
    }

    #[test]
    fn test_non_digit_rejected() {
        let mut entry = OtpEntry::default();
        assert_eq!(
            entry.enter_digit(0, 'x'),
            Err(CommerceError::InvalidOtpInput('x'))
        );
        assert!(entry.code().is_none());
    }

    #[test]
    fn test_auto_submit_fires_exactly_once() {
        let mut entry = OtpEntry::default();
        fill(&mut entry, "12345");
        assert_eq!(entry.code().as_deref(), Some("12345"));
        assert!(entry.take_auto_submit());
        // Without an edit it must not fire again.
        assert!(!entry.take_auto_submit());

        // An edit re-arms it.
        entry.enter_digit(2, '7').unwrap();
        assert!(entry.take_auto_submit());
    }

    #[test]
    fn test_auto_submit_blocked_by_error() {
        let mut entry = OtpEntry::default();
        fill(&mut entry, "12345");
        assert!(entry.take_auto_submit());
        entry.begin_submit();
        entry.submit_failed();
        assert!(entry.has_error());
        assert!(!entry.take_auto_submit());

        // Editing a cell clears the error and re-arms.
        entry.enter_digit(0, '9').unwrap();
        assert!(!entry.has_error());
        assert!(entry.take_auto_submit());
    }

    #[test]
    fn test_auto_submit_blocked_while_submitting() {
        let mut entry = OtpEntry::default();
        fill(&mut entry, "12345");
        entry.begin_submit();
        assert!(!entry.take_auto_submit());
    }

    #[test]
    fn test_paste_rejects_non_numeric() {
        let mut entry = OtpEntry::default();
        assert!(!entry.paste("abcde"));
        assert!(!entry.paste("1234"));
        assert!(!entry.paste("123456"));
        assert!(entry.cells.iter().all(Option::is_none));

        assert!(entry.paste("09876"));
        assert_eq!(entry.code().as_deref(), Some("09876"));
    }

    #[test]
    fn test_backspace_on_empty_cell_clears_neighbour() {
        let mut entry = OtpEntry::new(InputDirection::Ltr);
        entry.enter_digit(0, '1').unwrap();
        entry.enter_digit(1, '2').unwrap();
        // Cell 2 is empty; backspace moves to and clears cell 1.
        assert_eq!(entry.clear_digit(2).unwrap(), Some(1));
        assert!(entry.code().is_none());
        assert_eq!(entry.clear_digit(0).unwrap(), None);
    }
}
