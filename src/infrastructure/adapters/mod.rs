//! Platform adapters

pub mod console;
pub mod green_api;

pub use console::ConsoleAdapter;
pub use green_api::GreenApiAdapter;
