pub mod clock;
pub mod config;
pub mod goal;
pub mod log;
pub mod reminder;
pub mod stats;
pub mod workout;
