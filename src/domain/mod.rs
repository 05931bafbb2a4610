//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (User, Message, Rule)
//! - Traits: Abstractions for infrastructure (Bot)

pub mod entities;
pub mod traits;
