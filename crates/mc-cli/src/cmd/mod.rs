pub mod caffeine;
pub mod config;
pub mod content;
pub mod init;
pub mod log;
pub mod proposal;
pub mod serve;
pub mod task;
