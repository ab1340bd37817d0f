use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs at least one row and one column")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine placement stalled after {draws} draws")]
    PlacementStalled { draws: u32 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Declared mine count does not match the board")]
    MineCountMismatch,
    #[error("Adjacent mine counts do not match mine placement")]
    InconsistentAdjacency,
    #[error("Cell is both revealed and flagged")]
    RevealedAndFlagged,
}

pub type Result<T> = core::result::Result<T, GameError>;
