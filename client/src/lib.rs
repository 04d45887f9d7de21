//! Client-side core for the live rooms app.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the wallet
//! exchange flow, profile and onboarding services, and the ports they call;
//! [`outbound`] implements those ports over the rooms REST API; [`config`]
//! loads client settings.

pub mod config;
pub mod domain;
pub mod outbound;
