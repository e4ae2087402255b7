#![warn(clippy::all, missing_docs)]

//! Core game logic for movielink.
//!
//! This crate hosts the movie/connection models, the weighted prefix
//! autocomplete index, the turn-state engine and its orchestrator, plus
//! the movie catalog (TMDB client and on-disk cache) and configuration
//! used by the terminal UI.

pub mod autocomplete;
pub mod catalog;
pub mod config;
pub mod game;
pub mod models;

pub use autocomplete::{Autocomplete, AutocompleteError, Term};
pub use catalog::{MovieDatabase, MovieLookup};
pub use config::AppConfig;
pub use game::{
    Conclusion, GameController, GameError, GamePhase, GameState, TurnResult, WinCondition,
};
pub use models::{find_connections, Connection, ConnectionType, Movie, Player};
