//! Execute handlers for the token mediator contract.
//!
//! This module contains all execute and reply handlers, organized by category:
//! - `initialize` - One-time bridge wiring
//! - `outgoing` - RelayTokens, Receive and the relay pull reply
//! - `incoming` - ExecuteIncomingInstruction
//! - `recovery` - FixAssetsAboveLimits
//! - `rewards` - Rewarder, server fee, withdrawal and payout replies
//! - `config` - Outbound and execution limit updates

mod config;
mod incoming;
mod initialize;
mod outgoing;
mod recovery;
mod rewards;

pub use config::*;
pub use incoming::*;
pub use initialize::*;
pub use outgoing::*;
pub use recovery::*;
pub use rewards::*;
