//! Application services - Business logic orchestration

pub mod docs_service;
pub mod message_service;
pub mod storefront;

pub use docs_service::{DocsService, Manifest};
pub use message_service::MessageService;
