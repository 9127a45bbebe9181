use iced::{Element, Subscription};

use crate::{
    models::snake::snake_config::SnakeConfig,
    view::View,
    view_models::snake::snake_view_model::SnakeViewModel,
    views::snake::snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
};

pub struct State {
    screen: SnakeGameScreen,
}

#[derive(Clone, Debug)]
pub enum Message {
    Snake(SnakeGameMessage),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: SnakeGameScreen::new(SnakeViewModel::new(SnakeConfig::default())),
        }
    }

    pub fn update(state: &mut State, message: Message) {
        // a screen may answer with a follow-up message, e.g. Space at game over asks for a retry
        let mut next = Some(message);
        while let Some(message) = next {
            next = state.screen.update(message);
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
