use std::time::Duration;

use iced::keyboard::{key::Named, Key};
use log::debug;

use crate::{
    app::Message,
    models::snake::{
        snake_config::SnakeConfig,
        snake_game::{Cell, Direction, GameState, SnakeGame},
    },
    view_model::ViewModel,
    views::snake::snake_game_screen::SnakeGameMessage,
};

/// Type of block that can be found on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnakeBlock {
    Empty,
    Apple,
    SnakeBody,
    SnakeHead,
}

/// Sole owner of the [`SnakeGame`] while the window is open.
#[derive(Debug)]
pub struct SnakeViewModel {
    game: SnakeGame,
}

impl SnakeViewModel {
    #[must_use]
    pub fn new(config: SnakeConfig) -> Self {
        debug!("New SnakeViewModel config: {:#?}", config);
        Self::from_game(SnakeGame::new(config))
    }

    #[must_use]
    pub fn from_game(game: SnakeGame) -> Self {
        Self { game }
    }

    /// Arrow keys and WASD steer.
    #[must_use]
    pub fn direction_for_key(key: &Key) -> Option<Direction> {
        match key {
            Key::Named(code) => match code {
                Named::ArrowUp => Some(Direction::Up),
                Named::ArrowDown => Some(Direction::Down),
                Named::ArrowLeft => Some(Direction::Left),
                Named::ArrowRight => Some(Direction::Right),
                _ => None,
            },
            Key::Character(c) => match c.as_str() {
                "w" | "W" => Some(Direction::Up),
                "s" | "S" => Some(Direction::Down),
                "a" | "A" => Some(Direction::Left),
                "d" | "D" => Some(Direction::Right),
                _ => None,
            },
            Key::Unidentified => None,
        }
    }

    /// Rows of the board indexed by `y`. Food is drawn on top of the snake.
    #[must_use]
    pub fn get_backing_grid(&self) -> Vec<Vec<SnakeBlock>> {
        let size = self.game.config().grid_size();
        let side = usize::try_from(size).unwrap_or_default();
        let mut grid = vec![vec![SnakeBlock::Empty; side]; side];

        let mut place = |cell: Cell, block: SnakeBlock| {
            if !cell.is_within(size) {
                return;
            }
            if let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) {
                grid[y][x] = block;
            }
        };
        let state = self.game.state();
        for (i, cell) in state.snake().iter().enumerate() {
            let block = if i == 0 {
                SnakeBlock::SnakeHead
            } else {
                SnakeBlock::SnakeBody
            };
            place(*cell, block);
        }
        place(state.food(), SnakeBlock::Apple);
        grid
    }

    #[must_use]
    pub fn get_state(&self) -> &GameState {
        self.game.state()
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game.state().is_game_over()
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> Duration {
        self.game.config().time_between_frames()
    }

    #[must_use]
    pub fn get_board_pixels(&self) -> f32 {
        self.game.config().board_pixels()
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(snake_game_message) = message;
        match snake_game_message {
            SnakeGameMessage::Key(key) => {
                if self.game_over() {
                    if matches!(key, Key::Named(Named::Space)) {
                        return Some(Message::Snake(SnakeGameMessage::Retry));
                    }
                    return None;
                }
                if let Some(direction) = Self::direction_for_key(&key) {
                    self.game.set_direction(direction);
                }
                None
            }
            SnakeGameMessage::Timer(_) => {
                if self.game_over() {
                    return None;
                }
                let result = self.game.tick();
                debug!("Tick: {:?}", result.outcome);
                None
            }
            SnakeGameMessage::Retry => {
                debug!("Retry requested. Resetting board...");
                self.game.reset();
                None
            }
        }
    }
}
