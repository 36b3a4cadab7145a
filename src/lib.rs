pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod highscore;

pub use error::{Error, Result};
