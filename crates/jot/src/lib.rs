pub mod cli;
pub mod commands;
pub mod error;

pub use jot_core::{preferences, storage, todo, utils};
