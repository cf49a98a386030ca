//! State definitions for the token mediator contract
//!
//! Configuration is a typed struct saved once by `Initialize`. Limit, fee,
//! guard, role and registry state live next to the modules that own them.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

// ============================================================================
// Core Configuration
// ============================================================================

/// How the bridged token is held on this side of the bridge.
#[cw_serde]
pub enum TokenType {
    /// Relayed tokens stay in custody; inbound executions transfer them out.
    LockUnlock,
    /// Relayed tokens are burned; inbound executions mint.
    MintBurn,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::LockUnlock => "lock_unlock",
            TokenType::MintBurn => "mint_burn",
        }
    }
}

/// Fee distribution strategy chosen at deployment.
#[cw_serde]
pub enum RewardPolicy {
    /// Fees accrue into the reward ledger and are pulled by the rewarder.
    Deferred,
    /// Fees are pushed to reward accounts as soon as they are collected.
    Push {
        reward_accounts: Vec<Addr>,
        /// Gas cap for each signature-hook payout.
        signature_gas_limit: u64,
    },
}

impl RewardPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardPolicy::Deferred => "deferred",
            RewardPolicy::Push { .. } => "push",
        }
    }
}

/// Bridge wiring, written exactly once by `Initialize`.
#[cw_serde]
pub struct BridgeConfig {
    /// Message-relay transport contract
    pub transport: Addr,
    /// Mediator on the remote chain (remote address format, not validated here)
    pub paired_mediator: String,
    /// Bridged cw20 token
    pub token: Addr,
    pub token_type: TokenType,
    /// Gas budget requested from the transport for remote execution
    pub request_gas_limit: u64,
    /// Decimal difference applied to inbound values (positive scales up)
    pub decimal_shift: i32,
    pub reward_policy: RewardPolicy,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:token-mediator";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interface version reported by the `Version` query
pub const INTERFACES_VERSION: (u64, u64, u64) = (1, 0, 0);

/// Name hashed into the 4-byte mode identifier
pub const MEDIATOR_MODE_NAME: &str = "erc-to-erc-amb";

/// Largest accepted decimal shift in either direction
pub const MAX_DECIMAL_SHIFT: i32 = 38;

// ============================================================================
// Core State Storage
// ============================================================================

pub const BRIDGE_CONFIG: Item<BridgeConfig> = Item::new("bridge_config");

/// Counter feeding outbound message ids
pub const OUTBOUND_NONCE: Item<u64> = Item::new("outbound_nonce");

/// Inbound message ids that were executed directly.
/// Key: 32-byte message id, Value: executed amount
pub const EXECUTED_MESSAGES: Map<&[u8], Uint128> = Map::new("executed_messages");

/// Load the bridge configuration, mapping absence to `NotInitialized`.
pub fn load_config(storage: &dyn Storage) -> Result<BridgeConfig, ContractError> {
    BRIDGE_CONFIG
        .may_load(storage)?
        .ok_or(ContractError::NotInitialized)
}

pub fn is_initialized(storage: &dyn Storage) -> StdResult<bool> {
    Ok(BRIDGE_CONFIG.may_load(storage)?.is_some())
}

/// Return the current outbound nonce and advance the counter.
pub fn next_outbound_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let nonce = OUTBOUND_NONCE.may_load(storage)?.unwrap_or_default();
    OUTBOUND_NONCE.save(storage, &(nonce + 1))?;
    Ok(nonce)
}
