use std::time::Instant;

use iced::{
    alignment,
    keyboard::{self, Key},
    time,
    widget::{button, column, container, text, Column, Row},
    Border, Color, Element, Length, Subscription, Theme,
};

use crate::{
    app::Message,
    models::snake::snake_config::TILE_SIZE,
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::{SnakeBlock, SnakeViewModel},
};

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Timer(Instant),
    Retry,
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new(view_model: SnakeViewModel) -> Self {
        Self { view_model }
    }

    #[must_use]
    pub fn view_model(&self) -> &SnakeViewModel {
        &self.view_model
    }

    fn board(&self) -> Element<Message> {
        let make_tile = |color: Color| {
            container(text(" ")) // Empty text to preserve size
                .width(TILE_SIZE)
                .height(TILE_SIZE)
                .style(move |_: &Theme| container::Style {
                    background: Some(color.into()),
                    ..container::Style::default()
                })
        };

        let mut grid_view = Column::new();
        for grid_row in self.view_model.get_backing_grid() {
            let mut row = Row::new();
            for entry in grid_row {
                let tile = match entry {
                    SnakeBlock::Empty => make_tile(Color::BLACK),
                    SnakeBlock::Apple => make_tile(Color::from_rgb(1.0, 0.0, 0.0)),
                    SnakeBlock::SnakeBody => make_tile(Color::from_rgb(0.0, 0.8, 0.0)),
                    SnakeBlock::SnakeHead => make_tile(Color::from_rgb(0.0, 1.0, 0.0)),
                };
                row = row.push(tile);
            }
            grid_view = grid_view.push(row);
        }
        grid_view.into()
    }

    fn game_over_panel(&self) -> Element<Message> {
        let side = self.view_model.get_board_pixels();
        let retry_button = button(text("Retry"))
            .on_press(Message::Snake(SnakeGameMessage::Retry))
            .width(80)
            .height(40);

        container(
            column![
                text("Game Over").color(Color::from_rgb(1.0, 0.0, 0.0)),
                retry_button,
            ]
            .spacing(20)
            .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fixed(side))
        .height(Length::Fixed(side))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(|_: &Theme| container::Style {
            background: Some(Color::BLACK.into()),
            border: Border {
                color: Color::from_rgb(1.0, 0.0, 0.0),
                width: 1.0,
                ..Default::default()
            },
            ..container::Style::default()
        })
        .into()
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<Message> {
        let content = if self.view_model.game_over() {
            self.game_over_panel()
        } else {
            self.board()
        };
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard = keyboard::on_key_press(|key, _| {
            Some(Message::Snake(SnakeGameMessage::Key(key)))
        });
        // no timer once the game is over; retrying brings it back
        if self.view_model.game_over() {
            return keyboard;
        }
        let timer = time::every(self.view_model.get_time_between_frames())
            .map(SnakeGameMessage::Timer)
            .map(Message::Snake);
        Subscription::batch(vec![timer, keyboard])
    }
}
