use alloc::collections::VecDeque;
use alloc::string::String;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InPlay,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InPlay
    }
}

/// A single seeded game: the board plus whether play has ended.
///
/// Only the "over" flag is stored. Whether an ended game was won is recomputed from the board
/// on every query, so `is_over() && !is_win()` means the player hit a mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GameSnapshot", try_from = "GameSnapshot")]
pub struct Game {
    config: GameConfig,
    generator: SeededGenerator,
    board: Board,
    is_over: bool,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(config: GameConfig, seed: impl Into<String>) -> Result<Self> {
        Self::with_generator(config, SeededGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: SeededGenerator) -> Result<Self> {
        let board = generator.generate(config)?;
        Ok(Self::from_parts(config, generator, board, false, None))
    }

    /// Starts play on a prebuilt board. `reset` still regenerates from `seed`.
    pub fn from_board(board: Board, seed: impl Into<String>) -> Result<Self> {
        let config = GameConfig::new(board.size(), board.mine_count())?;
        board.check_consistency()?;
        Ok(Self::from_parts(
            config,
            SeededGenerator::new(seed),
            board,
            false,
            None,
        ))
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        generator: SeededGenerator,
        board: Board,
        is_over: bool,
        triggered_mine: Option<Coord2>,
    ) -> Self {
        Self {
            config,
            generator,
            board,
            is_over,
            triggered_mine,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> &str {
        self.generator.seed()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords)
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Every mine flagged and every safe cell revealed, evaluated fresh.
    pub fn is_win(&self) -> bool {
        self.board.is_cleared()
    }

    pub fn state(&self) -> GameState {
        match (self.is_over, self.is_win()) {
            (false, _) => GameState::InPlay,
            (true, true) => GameState::Won,
            (true, false) => GameState::Lost,
        }
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.board.flag_count() as isize)
    }

    /// The mine whose reveal ended the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reveals a hidden cell, or chords an already revealed one.
    ///
    /// Out-of-bounds coordinates and finished games are ignored.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_over || !self.board.contains(coords) {
            return RevealOutcome::NoChange;
        }

        let outcome = if self.board[coords].is_revealed() {
            self.chord(coords)
        } else {
            self.reveal_cell(coords)
        };
        self.settle(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_over {
            return MarkOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed() {
            return MarkOutcome::NoChange;
        }

        self.board[coords].is_flagged = !cell.is_flagged();
        if !cell.is_flagged() && self.is_win() {
            self.end_game();
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        }
    }

    /// Regenerates the board from the original seed and resumes play.
    pub fn reset(&mut self) -> Result<()> {
        self.board = self.generator.generate(self.config)?;
        self.is_over = false;
        self.triggered_mine = None;
        log::debug!("Reset game for seed {:?}", self.generator.seed());
        Ok(())
    }

    pub fn export(&self) -> GameSnapshot {
        GameSnapshot::from(self.clone())
    }

    pub fn restore(snapshot: GameSnapshot) -> Result<Self> {
        Self::try_from(snapshot)
    }

    pub(crate) fn generator(&self) -> &SeededGenerator {
        &self.generator
    }

    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        use RevealOutcome::*;

        match outcome {
            NoChange => NoChange,
            HitMine => {
                self.end_game();
                HitMine
            }
            Revealed | Won if self.is_win() => {
                self.end_game();
                Won
            }
            Revealed | Won => Revealed,
        }
    }

    fn end_game(&mut self) {
        self.is_over = true;
        log::debug!(
            "Game over for seed {:?}, won: {}, triggered mine: {:?}",
            self.generator.seed(),
            self.is_win(),
            self.triggered_mine
        );
    }

    /// Chords a revealed number once its flagged neighbors account for all its mines.
    fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board[coords];
        if !cell.is_numbered() || cell.adjacent_mines() != self.board.count_flagged_neighbors(coords)
        {
            return RevealOutcome::NoChange;
        }

        let targets: SmallVec<[Coord2; 8]> = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].is_covered())
            .collect();
        log::trace!("Chord at {:?} opens {:?}", coords, targets);

        targets
            .into_iter()
            .map(|pos| self.reveal_cell(pos))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor)
    }

    /// Opens one hidden cell and floods from it when it is a zero, without ending the game.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board[coords];
        if cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        self.board[coords].reveal();
        if cell.is_mine() {
            self.triggered_mine.get_or_insert(coords);
            return RevealOutcome::HitMine;
        }

        log::debug!(
            "Revealed cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines()
        );
        if cell.adjacent_mines() == 0 {
            self.flood_fill(coords);
        }
        RevealOutcome::Revealed
    }

    /// Opens the zero region around `start` and its numbered border.
    ///
    /// Zeros revealed by earlier moves are walked through so the whole connected region opens.
    fn flood_fill(&mut self, start: Coord2) {
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut to_visit: VecDeque<Coord2> = self
            .board
            .iter_neighbors(start)
            .filter(|&pos| !self.board[pos].is_flagged())
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // flags stop the flood
            let cell = self.board[visit_coords];
            if cell.is_flagged() {
                continue;
            }

            if !cell.is_revealed() {
                self.board[visit_coords].reveal();
                log::trace!(
                    "Flood revealed cell at {:?}, adjacent mines: {}",
                    visit_coords,
                    cell.adjacent_mines()
                );
            }

            if cell.adjacent_mines() == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| !self.board[pos].is_flagged())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }
}
