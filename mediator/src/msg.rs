//! Message types for the token mediator contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::limits::{ExecutionLimits, OutboundLimits};
use crate::state::{RewardPolicy, TokenType};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
///
/// Instantiation only records who may run `Initialize`; the bridge is wired
/// by that one-time execute.
#[cw_serde]
pub struct InstantiateMsg {
    /// Account allowed to call `Initialize` (defaults to the instantiator)
    pub bootstrapper: Option<String>,
}

/// Reward policy as supplied in `Initialize`
#[cw_serde]
pub enum RewardPolicyMsg {
    Deferred {},
    Push {
        reward_accounts: Vec<String>,
        signature_gas_limit: u64,
    },
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Lifecycle
    // ========================================================================
    /// Wire the mediator to its transport, paired mediator and token.
    ///
    /// Authorization: Bootstrap account only, exactly once
    Initialize {
        transport: String,
        paired_mediator: String,
        token: String,
        token_type: TokenType,
        limits: OutboundLimits,
        execution_limits: ExecutionLimits,
        request_gas_limit: u64,
        decimal_shift: i32,
        owner: String,
        reward_policy: RewardPolicyMsg,
    },

    // ========================================================================
    // Outgoing Transfers
    // ========================================================================
    /// Pull `value` tokens from the sender (needs cw20 allowance) and bridge
    /// `value - server_fee` to `receiver` on the remote chain.
    ///
    /// Authorization: Anyone
    RelayTokens { receiver: String, value: Uint128 },

    /// Bridge tokens sent with cw20 `Send` (transfer notification)
    ///
    /// Authorization: Configured token only
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Incoming Transfers
    // ========================================================================
    /// Execute a bridging instruction delivered by the transport.
    ///
    /// Authorization: Transport only
    ExecuteIncomingInstruction {
        /// Recipient on this chain
        recipient: String,
        /// Value in remote units
        value: Uint128,
        /// 32-byte message id assigned by the sending mediator
        message_id: Binary,
    },

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Resolve part or all of a parked out-of-limit instruction.
    ///
    /// Authorization: Owner only
    FixAssetsAboveLimits {
        message_id: Binary,
        /// Send the resolved value back to the recipient on the remote chain
        unlock_on_other_side: bool,
        value_to_unlock: Uint128,
    },

    // ========================================================================
    // Fees & Rewards
    // ========================================================================
    /// Authorization: Owner only
    TransferRewarder { new_rewarder: String },

    /// Authorization: Owner only
    ChangeServerFee { new_fee: Uint128 },

    /// Withdraw accrued reward income.
    ///
    /// Authorization: Rewarder only
    Withdraw { amount: Uint128 },

    // ========================================================================
    // Limits Configuration
    // ========================================================================
    /// Authorization: Owner only
    UpdateLimits {
        daily_limit: Option<Uint128>,
        max_per_tx: Option<Uint128>,
        min_per_tx: Option<Uint128>,
    },

    /// Authorization: Owner only
    UpdateExecutionLimits {
        daily_limit: Option<Uint128>,
        max_per_tx: Option<Uint128>,
    },
}

/// Payload of a cw20 `Send` to the mediator
#[cw_serde]
pub enum ReceiveMsg {
    /// Bridge the received tokens to `receiver` on the remote chain
    Relay { receiver: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Bridge wiring and role holders
    #[returns(ConfigResponse)]
    Config {},

    #[returns(LimitsResponse)]
    Limits {},

    /// Day number of the current block
    #[returns(u64)]
    CurrentDay {},

    #[returns(Uint128)]
    TotalSpentPerDay { day: u64 },

    #[returns(Uint128)]
    TotalExecutedPerDay { day: u64 },

    /// Whether a relay of `amount` would pass the outbound limits now
    #[returns(bool)]
    WithinLimit { amount: Uint128 },

    /// Whether an execution of `amount` would pass the execution limits now
    #[returns(bool)]
    WithinExecutionLimit { amount: Uint128 },

    #[returns(FeeStateResponse)]
    FeeState {},

    #[returns(Uint128)]
    OutOfLimitAmount {},

    #[returns(Option<TxAboveLimitsResponse>)]
    TxAboveLimits { message_id: Binary },

    #[returns(MessageStatusResponse)]
    MessageStatus { message_id: Binary },

    #[returns(GuardResponse)]
    Guard {},

    #[returns(VersionResponse)]
    Version {},

    #[returns(ModeResponse)]
    Mode {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub initialized: bool,
    pub transport: Option<Addr>,
    pub paired_mediator: Option<String>,
    pub token: Option<Addr>,
    pub token_type: Option<TokenType>,
    pub request_gas_limit: Option<u64>,
    pub decimal_shift: Option<i32>,
    pub reward_policy: Option<RewardPolicy>,
    pub owner: Option<Addr>,
    pub rewarder: Option<Addr>,
    pub bootstrapper: Option<Addr>,
    pub outbound_nonce: u64,
}

#[cw_serde]
pub struct LimitsResponse {
    pub limits: OutboundLimits,
    pub execution_limits: ExecutionLimits,
}

#[cw_serde]
pub struct FeeStateResponse {
    pub server_fee: Uint128,
    pub reward_income: Uint128,
    pub rewarder: Option<Addr>,
}

#[cw_serde]
pub struct TxAboveLimitsResponse {
    pub recipient: Addr,
    pub pending_value: Uint128,
}

/// Processing state of an inbound message id
#[cw_serde]
pub enum MessageStatus {
    Unknown,
    Executed { value: Uint128 },
    OutOfLimit { pending_value: Uint128 },
}

#[cw_serde]
pub struct MessageStatusResponse {
    pub message_id: String,
    pub status: MessageStatus,
}

#[cw_serde]
pub struct GuardResponse {
    pub locked: bool,
}

#[cw_serde]
pub struct VersionResponse {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

#[cw_serde]
pub struct ModeResponse {
    /// 4-byte mode identifier
    pub mode: Binary,
    /// 0x-prefixed hex of `mode`
    pub mode_hex: String,
}
