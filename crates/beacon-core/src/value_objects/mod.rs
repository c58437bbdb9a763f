//! Value objects - immutable types that represent domain concepts

mod access;
mod snowflake;

pub use access::{
    evaluate_channel, evaluate_message, evaluate_server, ChannelAction, ChannelFacts, DenyReason,
    MessageAction, ServerAction, ServerFacts,
};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
