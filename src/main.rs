use log::debug;
use simplesnake::{app::State, models::snake::snake_config::SnakeConfig};

fn main() -> iced::Result {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "simplesnake=debug");
    }
    env_logger::init();
    debug!("Debug on");
    let side = SnakeConfig::default().board_pixels();
    iced::application("Simple Snake Game", State::update, State::view)
        .window_size(iced::Size::new(side + 80.0, side + 80.0))
        .subscription(State::subscription)
        .run()
}
