use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Hidden,
    /// Opened safe cell carrying its adjacent-mine count; 0 is the blank case.
    Revealed(u8),
    /// Opened mine that failed to go off; play continues.
    Dud,
    /// Opened mine that went off.
    Exploded,
}

impl BoardCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Whether this cell counts toward clearing the board.
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Hidden
    }
}
