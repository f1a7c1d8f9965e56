use anyhow::{Context, Result};
use rand::prelude::*;
use serde::Serialize;
use tapsweeper_core::*;

/// How a single self-played game ended.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GameRecord {
    pub seed: Option<u64>,
    pub state: GameState,
    pub moves: u32,
    pub revealed: CellCount,
}

/// Plays until the game ends by revealing uniformly random hidden cells.
pub fn play<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<GameRecord> {
    let mut moves = 0;

    while !board.is_finished() {
        let hidden: Vec<Coord2> = board
            .cells()
            .filter(|(_, cell)| !cell.revealed)
            .map(|(coords, _)| coords)
            .collect();
        let Some(&target) = hidden.choose(rng) else {
            break;
        };

        let outcome = board
            .reveal(target)
            .with_context(|| format!("revealing {target:?}"))?;
        log::trace!("Move {} at {:?}: {:?}", moves, target, outcome);
        if outcome.has_update() {
            moves += 1;
        }
    }

    Ok(GameRecord {
        seed: board.seed(),
        state: board.state(),
        moves,
        revealed: board.revealed_count(),
    })
}

/// Totals over a series of games on one configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub config: GameConfig,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub average_revealed: f64,
    pub records: Vec<GameRecord>,
}

impl Summary {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            games: 0,
            wins: 0,
            losses: 0,
            average_revealed: 0.0,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, record: GameRecord) {
        match record.state {
            GameState::Won => self.wins += 1,
            GameState::Lost => self.losses += 1,
            GameState::InProgress => log::warn!("Recorded unfinished game {:?}", record),
        }
        self.games += 1;
        self.records.push(record);

        let total: f64 = self.records.iter().map(|r| f64::from(r.revealed)).sum();
        self.average_revealed = total / f64::from(self.games);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_free_board_is_won_in_one_move() {
        let layout = MineLayout::from_mine_coords((3, 3), &[]).unwrap();
        let mut board = Board::from_layout(layout);
        let mut rng = SmallRng::seed_from_u64(0);

        let record = play(&mut board, &mut rng).unwrap();

        assert_eq!(record.state, GameState::Won);
        assert_eq!(record.moves, 1);
        assert_eq!(record.revealed, 9);
        assert_eq!(record.seed, None);
    }

    #[test]
    fn every_game_finishes() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut board = Board::new(Difficulty::Hard.config(), 3).unwrap();

        for seed in 0..20 {
            board.reset(seed);
            let record = play(&mut board, &mut rng).unwrap();

            assert!(record.state.is_finished());
            assert_eq!(record.seed, Some(seed));
        }
    }

    #[test]
    fn summary_tracks_wins_losses_and_average() {
        let mut summary = Summary::new(Difficulty::Easy.config());
        let game = |state, revealed| GameRecord {
            seed: None,
            state,
            moves: 1,
            revealed,
        };

        summary.record(game(GameState::Won, 70));
        summary.record(game(GameState::Lost, 10));

        assert_eq!(summary.games, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.average_revealed, 40.0);
    }
}
