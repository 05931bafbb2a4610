//! Message handling - Parsing and routing of inbound messages

pub mod parser;
pub mod router;

pub use parser::MessageParser;
pub use router::{MessageRouter, Reply};
