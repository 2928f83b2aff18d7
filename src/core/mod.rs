pub mod config;
pub use config::WorkerConfig;
