use crate::*;
pub use seeded::*;

mod seeded;

pub trait BoardGenerator {
    fn generate(&self, config: GameConfig) -> Result<Board>;
}

/// Builds the board for `seed` with the default draw budget.
///
/// The same `(columns, rows, mines, seed)` always yields the same board.
pub fn generate(columns: Coord, rows: Coord, mines: CellCount, seed: &str) -> Result<Board> {
    let config = GameConfig::new((columns, rows), mines)?;
    SeededGenerator::new(seed).generate(config)
}
