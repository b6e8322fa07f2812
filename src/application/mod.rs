//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages the runtime behavior:
//! - Test cases and the per-test fixture context
//! - Mock function handles (expectation registration and consumption)
//! - The runner (fixture discipline, panic isolation, result collection)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod case;
pub mod context;
pub mod metrics;
pub mod ports;
pub mod runner;
