//! Domain ports for the remote rooms backend.

mod macros;
pub(crate) use macros::define_port_error;

mod exchange_gateway;
mod user_profile_command;
mod user_profile_query;

#[cfg(test)]
pub use exchange_gateway::MockExchangeGateway;
pub use exchange_gateway::{
    ExchangeGateway, ExchangeGatewayError, ExchangeRequest, FixtureExchangeGateway,
};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::{
    FixtureUserProfileCommand, UserProfileCommand, UserProfileCommandError,
};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery, UserProfileQueryError};
