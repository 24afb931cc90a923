//! Row caps shared by import and export.

/// Upper bound on the number of rows or documents processed in one run.
///
/// Configuration expresses the cap as a signed integer where zero or a
/// negative value means "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowLimit(Option<usize>);

impl RowLimit {
    /// No cap.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self(None)
    }

    /// Caps processing at `max` items; `0` means unbounded.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        if max == 0 { Self(None) } else { Self(Some(max)) }
    }

    /// Converts a configured value, treating `<= 0` as unbounded.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw).map_or(Self(None), Self::new)
    }

    /// Returns the cap, if any.
    #[must_use]
    pub const fn max(self) -> Option<usize> {
        self.0
    }

    /// Returns `true` if another item may be processed after `done` items.
    #[must_use]
    pub const fn allows(self, done: usize) -> bool {
        match self.0 {
            Some(max) => done < max,
            None => true,
        }
    }
}
