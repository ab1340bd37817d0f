use serde::{Deserialize, Deserializer, Serialize};

/// One square of the board, as generated and as mutated by play.
///
/// `adjacent_mines` is fixed at generation time and only meaningful for safe cells. Stored
/// records may give mines a negative sentinel count, read back as `u8::MAX`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(rename = "isBomb")]
    pub(crate) is_mine: bool,
    #[serde(rename = "adjacentBombCount", deserialize_with = "count_or_sentinel")]
    pub(crate) adjacent_mines: u8,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
}

impl Cell {
    pub const fn new(is_mine: bool, adjacent_mines: u8, is_revealed: bool, is_flagged: bool) -> Self {
        Self {
            is_mine,
            adjacent_mines,
            is_revealed,
            is_flagged,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Hidden and not flagged, the only state flood fill and chords will open.
    pub const fn is_covered(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Revealed safe cell showing a non-zero count.
    pub const fn is_numbered(self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mines > 0
    }

    /// Marks the cell revealed, dropping any flag it carried.
    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
        self.is_flagged = false;
    }
}

fn count_or_sentinel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    use serde::de::Error;

    let count = i16::deserialize(deserializer)?;
    if count < 0 {
        return Ok(u8::MAX);
    }
    u8::try_from(count).map_err(D::Error::custom)
}
