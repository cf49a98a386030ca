//! Error types for the token mediator contract
//!
//! Every error rejects the whole transaction; CosmWasm discards all state
//! written by a failing execute or reply, so no partial mutation survives.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use crate::limits::Direction;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    #[error("Mediator is already initialized")]
    AlreadyInitialized,

    #[error("Mediator is not initialized")]
    NotInitialized,

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    // ========================================================================
    // Reentrancy Errors
    // ========================================================================

    #[error("Reentrancy violation: a guarded call is already in progress")]
    ReentrancyViolation,

    #[error("Reentrancy guard is not held")]
    GuardNotHeld,

    // ========================================================================
    // Amount & Limit Errors
    // ========================================================================

    #[error("Value {value} does not exceed the server fee {fee}")]
    BelowFeeThreshold { fee: Uint128, value: Uint128 },

    #[error("{direction} limit exceeded: {limit_type} limit is {limit}, requested {requested}")]
    LimitExceeded {
        direction: Direction,
        limit_type: String,
        limit: Uint128,
        requested: Uint128,
    },

    #[error("Invalid limits: {reason}")]
    InvalidLimits { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Uint128,
        available: Uint128,
    },

    // ========================================================================
    // Out-of-Limit Registry Errors
    // ========================================================================

    #[error("Message {message_id} is already registered")]
    AlreadyRegistered { message_id: String },

    #[error("Insufficient recovery: requested {requested}, pending {pending}")]
    InsufficientRecovery {
        requested: Uint128,
        pending: Uint128,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    pub fn unauthorized(role: impl Into<String>) -> Self {
        ContractError::Unauthorized { role: role.into() }
    }
}
