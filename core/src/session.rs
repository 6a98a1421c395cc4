use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of the game currently on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
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
        Self::Playing
    }
}

/// What the collaborator should surface after a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A mine was hit but turned out to be a dud; play continues.
    Survived,
    /// A mine went off; the game is lost.
    GameOver,
    /// Every safe cell is open; the game is won.
    Victory,
}

/// Drives one game at a time: owns the active board, routes reveals into
/// it, and replaces the board on restart.
///
/// After a [`GameEvent::GameOver`] or [`GameEvent::Victory`] the session
/// refuses further reveals until the collaborator acknowledges the result
/// and calls [`GameSession::start_new_game`].
#[derive(Clone, Debug)]
pub struct GameSession<R: Rng> {
    config: GameConfig,
    board: Board,
    state: GameState,
    move_count: u32,
    rng: R,
}

impl GameSession<SmallRng> {
    /// Session with a freshly seeded generator.
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self> {
        let board = Board::generate(config, &mut rng)?;
        Ok(Self {
            config,
            board,
            state: GameState::Playing,
            move_count: 0,
            rng,
        })
    }

    /// Wraps an existing board, e.g. one built from an explicit layout.
    pub fn with_board(board: Board, rng: R) -> Self {
        let config = GameConfig::new_unchecked(board.size(), board.total_mines());
        Self {
            config,
            board,
            state: GameState::Playing,
            move_count: 0,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Opens a cell and reports the event the collaborator should surface,
    /// if any.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Option<GameEvent>> {
        self.check_playing()?;

        let outcome = self.board.reveal(coords, &mut self.rng)?;
        if outcome.has_update() {
            self.move_count += 1;
        }

        Ok(match outcome {
            RevealOutcome::AlreadyOpen => None,
            RevealOutcome::Dud => Some(GameEvent::Survived),
            RevealOutcome::Exploded => {
                log::debug!("game lost after {} moves", self.move_count);
                self.state = GameState::Lost;
                Some(GameEvent::GameOver)
            }
            RevealOutcome::Opened => {
                if self.board.is_won() {
                    log::debug!("game won after {} moves", self.move_count);
                    self.state = GameState::Won;
                    Some(GameEvent::Victory)
                } else {
                    None
                }
            }
        })
    }

    /// Replaces the board with a freshly generated one under the same
    /// configuration and reopens play. Callable at any time, not only
    /// after a loss or win.
    pub fn start_new_game(&mut self) -> Result<()> {
        self.board = Board::generate(self.config, &mut self.rng)?;
        self.state = GameState::Playing;
        self.move_count = 0;
        log::debug!(
            "started a new {}x{} game with {} mines",
            self.config.size.0,
            self.config.size.1,
            self.config.mines
        );
        Ok(())
    }
}
