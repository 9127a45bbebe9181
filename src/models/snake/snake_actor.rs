//! A tokio task that owns a [`SnakeGame`] so several drivers can share it.
//!
//! Every command goes through one channel and is applied in arrival order, so a
//! tick never interleaves with a direction change or a reset.
use log::{debug, error};
use rand::Rng;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use super::{
    snake_config::{Result, SnakeError},
    snake_game::{Direction, GameState, SnakeGame, TickOutcome},
};

#[derive(Debug)]
pub enum GameCommand {
    SetDirection(Direction),
    Reset,
    Tick(oneshot::Sender<(TickOutcome, GameState)>),
    Snapshot(oneshot::Sender<GameState>),
    Kill,
}

/// Cloneable sender side of the game owner.
#[derive(Clone, Debug)]
pub struct GameSender {
    sender: mpsc::UnboundedSender<GameCommand>,
}

#[derive(Debug)]
pub struct GameHandle {
    sender: GameSender,
    main_handle: JoinHandle<()>,
}

impl GameHandle {
    /// Moves `game` into a new task. Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn<R>(game: SnakeGame<R>) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender: GameSender { sender },
            main_handle: tokio::spawn(Self::main_loop(game, receiver)),
        }
    }

    async fn main_loop<R: Rng>(
        mut game: SnakeGame<R>,
        mut receiver: mpsc::UnboundedReceiver<GameCommand>,
    ) {
        while let Some(command) = receiver.recv().await {
            match command {
                GameCommand::SetDirection(direction) => game.set_direction(direction),
                GameCommand::Reset => game.reset(),
                GameCommand::Tick(reply) => {
                    let result = game.tick();
                    if reply.send((result.outcome, result.state.clone())).is_err() {
                        debug!("Tick requester went away before the reply");
                    }
                }
                GameCommand::Snapshot(reply) => {
                    if reply.send(game.state().clone()).is_err() {
                        debug!("Snapshot requester went away before the reply");
                    }
                }
                GameCommand::Kill => {
                    debug!("Killing game loop");
                    break;
                }
            }
        }
    }

    /// Another sender for the same game.
    #[must_use]
    pub fn sender(&self) -> GameSender {
        self.sender.clone()
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.sender.set_direction(direction)
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub fn reset(&self) -> Result<()> {
        self.sender.reset()
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub async fn tick(&self) -> Result<(TickOutcome, GameState)> {
        self.sender.tick().await
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub async fn snapshot(&self) -> Result<GameState> {
        self.sender.snapshot().await
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(self) {
        if self.sender.send(GameCommand::Kill).is_err() {
            debug!("Game loop already stopped");
        }
        if let Err(e) = self.main_handle.await {
            error!("Game loop did not stop cleanly: {:#?}", e);
        }
    }
}

impl GameSender {
    fn send(&self, command: GameCommand) -> Result<()> {
        self.sender.send(command).map_err(|e| {
            error!("Error sending to game loop: {}", e);
            SnakeError::GameClosed
        })
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.send(GameCommand::SetDirection(direction))
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub fn reset(&self) -> Result<()> {
        self.send(GameCommand::Reset)
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub async fn tick(&self) -> Result<(TickOutcome, GameState)> {
        let (reply, receiver) = oneshot::channel();
        self.send(GameCommand::Tick(reply))?;
        receiver.await.map_err(|_| SnakeError::GameClosed)
    }

    /// # Errors
    ///
    /// Returns [`SnakeError::GameClosed`] if the owning task has stopped.
    pub async fn snapshot(&self) -> Result<GameState> {
        let (reply, receiver) = oneshot::channel();
        self.send(GameCommand::Snapshot(reply))?;
        receiver.await.map_err(|_| SnakeError::GameClosed)
    }
}
