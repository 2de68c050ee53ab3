pub mod action_log;
pub mod caffeine;
pub mod config;
pub mod content;
pub mod error;
pub mod fallback;
pub mod feeds;
pub mod io;
pub mod overview;
pub mod paths;
pub mod proposal;
pub mod store;
pub mod task;

pub use error::{McError, Result};
