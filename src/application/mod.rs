//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Discovery, registration, reconciliation and the runtime loop
//! - Errors: Domain-specific errors
//! - Messaging: Event bus and input parsing

pub mod errors;
pub mod services;
pub mod messaging;
