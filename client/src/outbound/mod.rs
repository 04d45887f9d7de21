//! Outbound adapters implementing the domain ports.
//!
//! - **http**: reqwest client for the rooms backend REST API.
//!
//! Adapters translate between wire formats and domain types. They hold no
//! business rules.

pub mod http;
