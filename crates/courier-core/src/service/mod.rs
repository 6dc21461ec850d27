//! Business logic services (use cases).
//!
//! Services orchestrate the message pipeline and repository calls. They
//! depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod message;
