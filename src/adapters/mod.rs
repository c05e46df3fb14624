//! Adapters - Implementations of the ports.
//!
//! Each submodule implements one port: AI providers (HTTP and mock) plus
//! the orchestrator that routes across them, doctor directory backends,
//! and proximity resolvers.

pub mod ai;
pub mod directory;
pub mod proximity;
