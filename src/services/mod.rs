pub mod monitor;
pub mod notifier;
pub mod practicum;
pub mod tracker;
