//! Query handlers for the token mediator contract.

use cosmwasm_std::{Binary, Deps, Env, StdError, StdResult, Uint128};

use crate::fee_ledger;
use crate::guard;
use crate::hash::{mediator_mode, parse_message_id, to_hex};
use crate::limits::{self, day_of, Direction, EXECUTION_LIMITS, OUTBOUND_LIMITS};
use crate::msg::{
    ConfigResponse, FeeStateResponse, GuardResponse, LimitsResponse, MessageStatus,
    MessageStatusResponse, ModeResponse, TxAboveLimitsResponse, VersionResponse,
};
use crate::registry;
use crate::roles::{Role, ROLES};
use crate::state::{BRIDGE_CONFIG, EXECUTED_MESSAGES, INTERFACES_VERSION, OUTBOUND_NONCE};

// ============================================================================
// Configuration Queries
// ============================================================================

/// Bridge wiring and role holders; wiring fields are `None` until initialized.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = BRIDGE_CONFIG.may_load(deps.storage)?;
    let role = |role: Role| ROLES.may_load(deps.storage, role.as_str());

    Ok(ConfigResponse {
        initialized: config.is_some(),
        transport: config.as_ref().map(|c| c.transport.clone()),
        paired_mediator: config.as_ref().map(|c| c.paired_mediator.clone()),
        token: config.as_ref().map(|c| c.token.clone()),
        token_type: config.as_ref().map(|c| c.token_type.clone()),
        request_gas_limit: config.as_ref().map(|c| c.request_gas_limit),
        decimal_shift: config.as_ref().map(|c| c.decimal_shift),
        reward_policy: config.map(|c| c.reward_policy),
        owner: role(Role::Owner)?,
        rewarder: role(Role::Rewarder)?,
        bootstrapper: role(Role::Bootstrap)?,
        outbound_nonce: OUTBOUND_NONCE.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_limits(deps: Deps) -> StdResult<LimitsResponse> {
    Ok(LimitsResponse {
        limits: OUTBOUND_LIMITS.load(deps.storage)?,
        execution_limits: EXECUTION_LIMITS.load(deps.storage)?,
    })
}

pub fn query_version() -> VersionResponse {
    let (major, minor, patch) = INTERFACES_VERSION;
    VersionResponse {
        major,
        minor,
        patch,
    }
}

pub fn query_mode() -> ModeResponse {
    let mode = mediator_mode();
    ModeResponse {
        mode: Binary::from(mode.to_vec()),
        mode_hex: to_hex(&mode),
    }
}

// ============================================================================
// Limit Queries
// ============================================================================

pub fn query_current_day(env: Env) -> u64 {
    day_of(env.block.time)
}

pub fn query_total_spent_per_day(deps: Deps, day: u64) -> StdResult<Uint128> {
    limits::spent_on(deps.storage, Direction::Outbound, day)
}

pub fn query_total_executed_per_day(deps: Deps, day: u64) -> StdResult<Uint128> {
    limits::spent_on(deps.storage, Direction::Inbound, day)
}

pub fn query_within_limit(deps: Deps, env: Env, amount: Uint128) -> StdResult<bool> {
    limits::within_limit(
        deps.storage,
        Direction::Outbound,
        day_of(env.block.time),
        amount,
    )
}

pub fn query_within_execution_limit(deps: Deps, env: Env, amount: Uint128) -> StdResult<bool> {
    limits::within_limit(
        deps.storage,
        Direction::Inbound,
        day_of(env.block.time),
        amount,
    )
}

// ============================================================================
// Fee Queries
// ============================================================================

pub fn query_fee_state(deps: Deps) -> StdResult<FeeStateResponse> {
    let state = fee_ledger::load(deps.storage)?;
    Ok(FeeStateResponse {
        server_fee: state.server_fee,
        reward_income: state.reward_income,
        rewarder: ROLES.may_load(deps.storage, Role::Rewarder.as_str())?,
    })
}

// ============================================================================
// Message Queries
// ============================================================================

pub fn query_out_of_limit_amount(deps: Deps) -> StdResult<Uint128> {
    registry::out_of_limit_amount(deps.storage)
}

pub fn query_tx_above_limits(
    deps: Deps,
    message_id: Binary,
) -> StdResult<Option<TxAboveLimitsResponse>> {
    let id = message_id_bytes(&message_id)?;
    Ok(registry::entry(deps.storage, &id)?.map(|entry| TxAboveLimitsResponse {
        recipient: entry.recipient,
        pending_value: entry.pending_value,
    }))
}

/// Whether an inbound message id was executed, parked, or never seen.
pub fn query_message_status(deps: Deps, message_id: Binary) -> StdResult<MessageStatusResponse> {
    let id = message_id_bytes(&message_id)?;

    let status = if let Some(value) = EXECUTED_MESSAGES.may_load(deps.storage, &id)? {
        MessageStatus::Executed { value }
    } else if let Some(entry) = registry::entry(deps.storage, &id)? {
        MessageStatus::OutOfLimit {
            pending_value: entry.pending_value,
        }
    } else {
        MessageStatus::Unknown
    };

    Ok(MessageStatusResponse {
        message_id: to_hex(&id),
        status,
    })
}

pub fn query_guard(deps: Deps) -> StdResult<GuardResponse> {
    Ok(GuardResponse {
        locked: guard::is_locked(deps.storage)?,
    })
}

fn message_id_bytes(message_id: &Binary) -> StdResult<[u8; 32]> {
    parse_message_id(message_id).map_err(|e| StdError::generic_err(e.to_string()))
}
