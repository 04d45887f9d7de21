//! HTTP adapter for the rooms backend.
//!
//! One reqwest client implements the exchange gateway and both profile
//! ports against the REST API.

mod dto;
mod rooms_api;

pub use rooms_api::HttpRoomsApi;
