//! Token Mediator Contract - One Side of a Two-Chain Token Bridge
//!
//! The mediator takes custody of a cw20 token on this chain and asks a
//! message-relay transport to deliver bridging instructions to its paired
//! mediator on the remote chain. Instructions arriving from the paired side
//! release tokens here.
//!
//! # Outgoing Flow
//! 1. User approves the mediator and calls `RelayTokens`, or sends tokens with cw20 `Send`
//! 2. Value is checked against the server fee and the outbound daily limits
//! 3. Fee goes to the reward policy; `value - fee` is bridged through the transport
//!
//! # Incoming Flow
//! 1. Transport calls `ExecuteIncomingInstruction` with a 32-byte message id
//! 2. Within execution limits the recipient is paid (unlock or mint)
//! 3. Above them the instruction is parked until the owner runs `FixAssetsAboveLimits`
//!
//! # Security
//! - Daily and per-transaction limits in both directions
//! - Message ids are executed or parked at most once
//! - Storage-backed reentrancy guard around token pulls and payouts
//! - Role checks on every privileged operation

pub mod contract;
pub mod error;
mod execute;
pub mod fee_ledger;
pub mod guard;
pub mod hash;
pub mod limits;
pub mod msg;
mod query;
pub mod registry;
pub mod reward_policy;
pub mod roles;
pub mod state;
pub mod token;
pub mod transport;

pub use crate::error::ContractError;
pub use crate::hash::{compute_message_id, keccak256};
pub use crate::reward_policy::RewardDistribution;
