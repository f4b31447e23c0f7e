//! Arcade Snake: a fixed-tick simulation, a table-driven menu/game state
//! machine and the terminal front end around them.

pub mod app;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod snapshot;
pub mod sound;
pub mod terminal;
pub mod ui;
