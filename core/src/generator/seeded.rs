use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::*;

/// Draw budget for rejection sampling, past which generation gives up.
pub const DEFAULT_MAX_DRAWS: u32 = 1000;

/// Places mines by rejection sampling from a stream seeded by an opaque string.
///
/// The string is hashed with SHA-256 into the 256-bit PCG seed, so any seed text works and
/// the placement does not depend on platform or pointer width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeededGenerator {
    seed: String,
    max_draws: u32,
}

impl SeededGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }

    pub fn with_max_draws(mut self, max_draws: u32) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn max_draws(&self) -> u32 {
        self.max_draws
    }

    fn rng(&self) -> Pcg64 {
        let digest: [u8; 32] = Sha256::digest(self.seed.as_bytes()).into();
        Pcg64::from_seed(digest)
    }

    /// Draws distinct mine positions in placement order.
    fn choose_mine_positions(&self, config: GameConfig) -> Result<Vec<Coord2>> {
        let (columns, rows) = config.size;
        let mut rng = self.rng();
        let mut chosen = HashSet::with_capacity(config.mines.into());
        let mut positions = Vec::with_capacity(config.mines.into());
        let mut draws = 0u32;

        while positions.len() < usize::from(config.mines) {
            if draws >= self.max_draws {
                log::warn!(
                    "Mine placement for seed {:?} stalled, placed {} of {} after {} draws",
                    self.seed,
                    positions.len(),
                    config.mines,
                    draws
                );
                return Err(GameError::PlacementStalled { draws });
            }
            draws += 1;

            let candidate: Coord2 = (rng.random_range(0..columns), rng.random_range(0..rows));
            if chosen.insert(candidate) {
                positions.push(candidate);
            }
        }

        log::debug!(
            "Chose {} mines on {}x{} for seed {:?} in {} draws",
            positions.len(),
            columns,
            rows,
            self.seed,
            draws
        );
        Ok(positions)
    }
}

impl BoardGenerator for SeededGenerator {
    fn generate(&self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let mut board = Board::empty(config.size)?;
        for coords in self.choose_mine_positions(config)? {
            board.place_mine(coords);
        }
        Ok(board)
    }
}
