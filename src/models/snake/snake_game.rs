use std::collections::VecDeque;

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::snake_config::{Result, SnakeConfig, SnakeError};

/// A tile on the board. Signed so a head that left the board can still be held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.value();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn is_within(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Heading of the snake. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const VARIANTS: &'static [Direction] = &[Self::Left, Self::Up, Self::Right, Self::Down];

    /// Offset `(dx, dy)` of one step.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

/// What the snake ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one cell, length unchanged.
    Moved,
    /// Ate the food and grew by one.
    Grew,
    /// Moved and hit something; the game is now over.
    Collided(Collision),
    /// The game was already over, nothing changed.
    Halted,
}

/// Result of [`SnakeGame::tick`] together with a view of the state to draw.
#[derive(Debug)]
pub struct TickResult<'a> {
    pub outcome: TickOutcome,
    pub state: &'a GameState,
}

/// Everything a renderer needs: body (head first), food, heading and phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    snake: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    phase: Phase,
}

impl GameState {
    /// Builds a running state from a body listed head first.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::EmptySnake`] if `snake` has no cells.
    pub fn new(snake: Vec<Cell>, food: Cell, direction: Direction) -> Result<Self> {
        if snake.is_empty() {
            return Err(SnakeError::EmptySnake);
        }
        Ok(Self {
            snake: snake.into(),
            food,
            direction,
            phase: Phase::Running,
        })
    }

    #[must_use]
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    /// # Panics
    ///
    /// Panics if the body is empty, which every constructor rules out.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

/// Model of the Snake Game. Advances one cell per [`SnakeGame::tick`].
#[derive(Clone, Debug)]
pub struct SnakeGame<R = StdRng> {
    config: SnakeConfig,
    state: GameState,
    pending_direction: Direction,
    rng: R,
}

impl SnakeGame<StdRng> {
    #[must_use]
    pub fn new(config: SnakeConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for SnakeGame<StdRng> {
    fn default() -> Self {
        Self::new(SnakeConfig::default())
    }
}

impl<R: Rng> SnakeGame<R> {
    /// Creates a freshly reset game that draws food positions from `rng`.
    #[must_use]
    pub fn with_rng(config: SnakeConfig, mut rng: R) -> Self {
        let state = Self::initial_state(&config, &mut rng);
        Self {
            config,
            pending_direction: state.direction,
            state,
            rng,
        }
    }

    /// Wraps an existing state, e.g. a position set up by hand.
    #[must_use]
    pub fn from_state(config: SnakeConfig, state: GameState, rng: R) -> Self {
        Self {
            config,
            pending_direction: state.direction,
            state,
            rng,
        }
    }

    fn initial_state(config: &SnakeConfig, rng: &mut R) -> GameState {
        let length = config.initial_length();
        let snake = (0..length)
            .map(|i| {
                // config guarantees initial_length < grid_size <= i32::MAX
                let x = i32::try_from(length - i).unwrap_or(i32::MAX);
                Cell::new(x, 0)
            })
            .collect();
        GameState {
            snake,
            food: Self::random_cell(config, rng),
            direction: Direction::Right,
            phase: Phase::Running,
        }
    }

    fn random_cell(config: &SnakeConfig, rng: &mut R) -> Cell {
        let x = rng.gen_range(0..config.grid_size());
        let y = rng.gen_range(0..config.grid_size());
        Cell::new(x, y)
    }

    /// Queues `direction` for the next tick unless it would turn the snake back onto itself.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.direction.is_opposite(direction) {
            debug!(
                "Ignoring {:?} while heading {:?}",
                direction, self.state.direction
            );
            return;
        }
        self.pending_direction = direction;
    }

    pub fn reset(&mut self) {
        debug!("Resetting snake game");
        self.state = Self::initial_state(&self.config, &mut self.rng);
        self.pending_direction = self.state.direction;
    }

    /// Moves the snake one cell. Once the game is over this does nothing until [`SnakeGame::reset`].
    pub fn tick(&mut self) -> TickResult<'_> {
        if self.state.is_game_over() {
            return TickResult {
                outcome: TickOutcome::Halted,
                state: &self.state,
            };
        }

        self.state.direction = self.pending_direction;
        let new_head = self.state.head().neighbor(self.state.direction);
        let grew = new_head == self.state.food;
        self.state.snake.push_front(new_head);
        if grew {
            // the new food may land on the snake
            self.state.food = Self::random_cell(&self.config, &mut self.rng);
        } else {
            self.state.snake.pop_back();
        }

        let collision = if !new_head.is_within(self.config.grid_size()) {
            Some(Collision::Wall)
        } else if self.state.snake.iter().skip(1).any(|cell| *cell == new_head) {
            Some(Collision::Body)
        } else {
            None
        };

        let outcome = match collision {
            Some(collision) => {
                info!(
                    "Game over: {:?} collision at ({}, {}) with length {}",
                    collision,
                    new_head.x,
                    new_head.y,
                    self.state.len()
                );
                self.state.phase = Phase::Over;
                TickOutcome::Collided(collision)
            }
            None if grew => TickOutcome::Grew,
            None => TickOutcome::Moved,
        };
        TickResult {
            outcome,
            state: &self.state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    // always yields 0, so every food lands on (0, 0)
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    fn game_from(raw: &[(i32, i32)], food: (i32, i32), direction: Direction) -> SnakeGame<StepRng> {
        let state = GameState::new(cells(raw), food.into(), direction).unwrap();
        SnakeGame::from_state(SnakeConfig::default(), state, zero_rng())
    }

    #[test]
    fn reset_layout() {
        let mut game = SnakeGame::with_rng(SnakeConfig::default(), zero_rng());
        game.tick();
        game.set_direction(Direction::Down);
        game.tick();
        game.reset();

        let state = game.state();
        assert_eq!(state.len(), 3);
        assert_eq!(
            state.snake().iter().copied().collect::<Vec<_>>(),
            cells(&[(3, 0), (2, 0), (1, 0)])
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(game.pending_direction(), Direction::Right);
        assert!(!state.is_game_over());
        assert_eq!(state.food(), Cell::new(0, 0));
    }

    #[test]
    fn first_tick_moves_right() {
        let mut game = SnakeGame::with_rng(SnakeConfig::default(), zero_rng());
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Moved);
        assert_eq!(
            result.state.snake().iter().copied().collect::<Vec<_>>(),
            cells(&[(4, 0), (3, 0), (2, 0)])
        );
        assert!(!result.state.is_game_over());
    }

    #[test]
    fn eating_grows_and_moves_food() {
        let mut game = game_from(&[(5, 5), (4, 5), (3, 5)], (6, 5), Direction::Right);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Grew);
        assert_eq!(result.state.len(), 4);
        assert_eq!(result.state.head(), Cell::new(6, 5));
        assert_eq!(result.state.snake()[3], Cell::new(3, 5));
        assert_eq!(result.state.food(), Cell::new(0, 0));
    }

    #[test]
    fn moving_keeps_length() {
        let mut game = game_from(&[(5, 5), (4, 5), (3, 5), (2, 5)], (10, 10), Direction::Right);
        for direction in [Direction::Down, Direction::Left, Direction::Down] {
            game.set_direction(direction);
            let result = game.tick();
            assert_eq!(result.outcome, TickOutcome::Moved);
            assert_eq!(result.state.len(), 4);
        }
        assert_eq!(game.state().head(), Cell::new(4, 7));
    }

    #[test]
    fn opposite_direction_is_ignored() {
        let mut game = SnakeGame::with_rng(SnakeConfig::default(), zero_rng());
        game.set_direction(Direction::Left);
        assert_eq!(game.pending_direction(), Direction::Right);
        game.tick();
        assert_eq!(game.state().direction(), Direction::Right);
        assert_eq!(game.state().head(), Cell::new(4, 0));
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse() {
        let mut game = game_from(&[(5, 5), (4, 5), (3, 5)], (10, 10), Direction::Right);
        game.set_direction(Direction::Up);
        game.set_direction(Direction::Left);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Moved);
        assert_eq!(result.state.head(), Cell::new(5, 4));
        assert_eq!(result.state.direction(), Direction::Up);
    }

    #[test]
    fn leaving_left_edge_ends_game() {
        let mut game = game_from(&[(0, 7), (1, 7), (2, 7)], (10, 10), Direction::Left);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Collided(Collision::Wall));
        assert!(result.state.is_game_over());
        assert_eq!(result.state.head(), Cell::new(-1, 7));
    }

    #[test]
    fn reaching_right_edge_after_reset() {
        let mut game = SnakeGame::with_rng(SnakeConfig::default(), zero_rng());
        for _ in 0..16 {
            assert_eq!(game.tick().outcome, TickOutcome::Moved);
        }
        assert_eq!(game.state().head(), Cell::new(19, 0));
        assert_eq!(game.tick().outcome, TickOutcome::Collided(Collision::Wall));
    }

    #[test]
    fn running_into_body_ends_game() {
        // head came left from (2, 2); turning up lands on (1, 1) which stays occupied
        let mut game = game_from(
            &[(1, 2), (2, 2), (2, 1), (1, 1), (0, 1)],
            (10, 10),
            Direction::Left,
        );
        game.set_direction(Direction::Up);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Collided(Collision::Body));
        assert!(result.state.is_game_over());
    }

    #[test]
    fn chasing_tail_is_allowed() {
        // the tail at (1, 2) moves away in the same tick the head arrives
        let mut game = game_from(&[(1, 1), (2, 1), (2, 2), (1, 2)], (10, 10), Direction::Left);
        game.set_direction(Direction::Down);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Moved);
        assert_eq!(result.state.head(), Cell::new(1, 2));
    }

    #[test]
    fn game_over_is_terminal() {
        let mut game = game_from(&[(0, 0), (1, 0)], (10, 10), Direction::Left);
        game.tick();
        let frozen = game.state().clone();

        for direction in Direction::VARIANTS {
            game.set_direction(*direction);
            assert_eq!(game.tick().outcome, TickOutcome::Halted);
        }
        assert_eq!(game.state(), &frozen);

        game.reset();
        assert_eq!(game.state().phase(), Phase::Running);
    }

    #[test]
    fn food_can_spawn_under_snake() {
        // zero_rng puts the next food on (0, 0), which the snake occupies
        let mut game = game_from(&[(0, 1), (0, 0)], (0, 2), Direction::Down);
        let result = game.tick();

        assert_eq!(result.outcome, TickOutcome::Grew);
        assert_eq!(result.state.food(), Cell::new(0, 0));
        assert!(result.state.snake().contains(&Cell::new(0, 0)));
    }

    #[test]
    fn random_food_stays_on_board() {
        let config = SnakeConfig::new(7, 3, 100).unwrap();
        let mut game = SnakeGame::with_rng(config, StdRng::seed_from_u64(7));
        for _ in 0..200 {
            game.reset();
            assert!(game.state().food().is_within(7));
        }
    }

    #[test]
    fn empty_snake_rejected() {
        assert_eq!(
            GameState::new(Vec::new(), Cell::new(1, 1), Direction::Up),
            Err(SnakeError::EmptySnake)
        );
    }

    #[test]
    fn directions_pair_up() {
        for direction in Direction::VARIANTS {
            assert!(direction.is_opposite(direction.opposite()));
            assert_eq!(direction.opposite().opposite(), *direction);
            let (dx, dy) = direction.value();
            let (ox, oy) = direction.opposite().value();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
        assert!(!Direction::Up.is_opposite(Direction::Left));
    }
}
