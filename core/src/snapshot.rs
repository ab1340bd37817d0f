use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Plain-data copy of a [`Game`], stored as text by whoever owns persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub rows: Coord,
    pub columns: Coord,
    pub mine_count: CellCount,
    pub seed: String,
    pub is_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_mine: Option<Coord2>,
    /// Generator draw budget, absent when it is [`DEFAULT_MAX_DRAWS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_draws: Option<u32>,
    /// `rows` rows of `columns` cells each.
    pub cells: Vec<Vec<Cell>>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Malformed snapshot text: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid snapshot: {0}")]
    Invalid(#[from] GameError),
}

impl GameSnapshot {
    pub fn to_json(&self) -> core::result::Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> core::result::Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses and validates in one step.
    pub fn restore_json(text: &str) -> core::result::Result<Game, SnapshotError> {
        Ok(Game::restore(Self::from_json(text)?)?)
    }

    fn into_game(self) -> Result<Game> {
        let size = (self.columns, self.rows);
        let board = Board::from_rows(size, self.cells)?;
        let config = GameConfig::new(size, self.mine_count)?;
        if board.mine_count() != config.mines {
            return Err(GameError::MineCountMismatch);
        }
        board.check_consistency()?;
        if let Some(coords) = self.triggered_mine {
            board.validate_coords(coords)?;
        }

        log::debug!(
            "Restored {}x{} game for seed {:?}, over: {}",
            size.0,
            size.1,
            self.seed,
            self.is_over
        );
        Ok(Game::from_parts(
            config,
            SeededGenerator::new(self.seed)
                .with_max_draws(self.max_draws.unwrap_or(DEFAULT_MAX_DRAWS)),
            board,
            self.is_over,
            self.triggered_mine,
        ))
    }
}

impl From<Game> for GameSnapshot {
    fn from(game: Game) -> Self {
        let (columns, rows) = game.size();
        Self {
            rows,
            columns,
            mine_count: game.total_mines(),
            seed: game.generator().seed().into(),
            is_over: game.is_over(),
            triggered_mine: game.triggered_mine(),
            max_draws: Some(game.generator().max_draws())
                .filter(|&draws| draws != DEFAULT_MAX_DRAWS),
            cells: game.board().to_rows(),
        }
    }
}

impl TryFrom<GameSnapshot> for Game {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self> {
        snapshot
            .into_game()
            .inspect_err(|err| log::warn!("Rejected game snapshot: {}", err))
    }
}
