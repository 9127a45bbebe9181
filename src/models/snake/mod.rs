pub mod snake_actor;
pub mod snake_config;
pub mod snake_game;
