//! Board and timing parameters for the [`crate::models::snake::snake_game::SnakeGame`].
use std::{fmt, time::Duration};

/// Number of tiles along each side of the board.
pub const GRID_SIZE: i32 = 20;
/// Side of one tile in pixels.
pub const TILE_SIZE: u16 = 20;
/// Length of the snake after a reset.
pub const INITIAL_LENGTH: usize = 3;
/// Amount of time before the snake is forced to move.
pub const MILLIS_BETWEEN_FRAMES: u64 = 100;
/// Smallest board accepted by [`SnakeConfig::new`].
pub const MIN_GRID_SIZE: i32 = 5;
/// Largest board accepted by [`SnakeConfig::new`].
pub const MAX_GRID_SIZE: i32 = 60;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidGridSize,
    InvalidSnakeLength,
    InvalidTickRate,
    EmptySnake,
    GameClosed,
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidGridSize => write!(
                f,
                "grid size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}"
            ),
            SnakeError::InvalidSnakeLength => {
                write!(f, "initial snake length must be at least 1 and fit on the board")
            }
            SnakeError::InvalidTickRate => write!(f, "time between frames must be non-zero"),
            SnakeError::EmptySnake => write!(f, "a snake needs at least one cell"),
            SnakeError::GameClosed => write!(f, "the game owner is no longer running"),
        }
    }
}

impl std::error::Error for SnakeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeConfig {
    grid_size: i32,
    initial_length: usize,
    millis_between_frames: u64,
}

impl SnakeConfig {
    /// Creates a config with the given board size, starting length and tick rate.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the board is outside
    /// [`MIN_GRID_SIZE`]..=[`MAX_GRID_SIZE`], if the starting snake would not fit
    /// on the first row, or if the tick rate is zero.
    pub fn new(grid_size: i32, initial_length: usize, millis_between_frames: u64) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(SnakeError::InvalidGridSize);
        }
        // the head starts at x = initial_length
        let fits = i32::try_from(initial_length).is_ok_and(|len| len < grid_size);
        if initial_length == 0 || !fits {
            return Err(SnakeError::InvalidSnakeLength);
        }
        if millis_between_frames == 0 {
            return Err(SnakeError::InvalidTickRate);
        }
        Ok(Self {
            grid_size,
            initial_length,
            millis_between_frames,
        })
    }

    #[must_use]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    #[must_use]
    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    #[must_use]
    pub fn millis_between_frames(&self) -> u64 {
        self.millis_between_frames
    }

    #[must_use]
    pub fn time_between_frames(&self) -> Duration {
        Duration::from_millis(self.millis_between_frames)
    }

    /// Side of the whole board in pixels.
    #[must_use]
    pub fn board_pixels(&self) -> f32 {
        // grid_size is bounded by MAX_GRID_SIZE so both fit in u16
        let tiles = u16::try_from(self.grid_size).unwrap_or(u16::MAX);
        f32::from(tiles) * f32::from(TILE_SIZE)
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_length: INITIAL_LENGTH,
            millis_between_frames: MILLIS_BETWEEN_FRAMES,
        }
    }
}
