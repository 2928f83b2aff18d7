pub mod api;
pub mod cache;
pub mod cli;
pub mod core;
pub mod emulator;
pub mod notify;
pub mod worker;
