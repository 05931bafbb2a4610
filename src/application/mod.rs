//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Message handling loop, storefront rules, docs combiner
//! - Messaging: Payload parsing and rule routing
//! - Templates: Canned reply texts
//! - Errors: Error types

pub mod errors;
pub mod messaging;
pub mod services;
pub mod templates;
