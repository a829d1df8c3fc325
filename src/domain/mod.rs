//! Domain layer for Credit Guardian
//!
//! CDD Principle: Domain Model - Pure business rules for consumer credit data
//! - Contains the core entities, value objects, and validation results
//! - Independent of infrastructure concerns like files, terminals, or CLIs
//! - Expresses the ubiquitous language of credit reporting and FCRA compliance

pub mod credit;
pub mod findings;
pub mod score;

// Re-export main domain types for convenience
pub use credit::*;
pub use findings::*;
pub use score::*;
