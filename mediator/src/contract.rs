//! Token Mediator Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute and reply handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_change_server_fee, execute_fix_assets_above_limits, execute_incoming_instruction,
    execute_initialize, execute_receive, execute_relay_tokens, execute_transfer_rewarder,
    execute_update_execution_limits, execute_update_limits, execute_withdraw, reply_relay_pull,
    reply_signature_payout, reply_withdraw_payout,
};
use crate::guard::{RELAY_PULL_REPLY_ID, WITHDRAW_PAYOUT_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_current_day, query_fee_state, query_guard, query_limits,
    query_message_status, query_mode, query_out_of_limit_amount, query_total_executed_per_day,
    query_total_spent_per_day, query_tx_above_limits, query_version, query_within_execution_limit,
    query_within_limit,
};
use crate::reward_policy::SIGNATURE_PAYOUT_REPLY_ID;
use crate::roles::{self, Role};
use crate::state::{CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let bootstrapper = match msg.bootstrapper {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => info.sender,
    };
    roles::assign(deps.storage, Role::Bootstrap, &bootstrapper)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("bootstrapper", bootstrapper)
        .add_attribute("version", CONTRACT_VERSION))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Lifecycle
        ExecuteMsg::Initialize {
            transport,
            paired_mediator,
            token,
            token_type,
            limits,
            execution_limits,
            request_gas_limit,
            decimal_shift,
            owner,
            reward_policy,
        } => execute_initialize(
            deps,
            info,
            transport,
            paired_mediator,
            token,
            token_type,
            limits,
            execution_limits,
            request_gas_limit,
            decimal_shift,
            owner,
            reward_policy,
        ),

        // Outgoing transfers
        ExecuteMsg::RelayTokens { receiver, value } => {
            execute_relay_tokens(deps, env, info, receiver, value)
        }
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Incoming transfers
        ExecuteMsg::ExecuteIncomingInstruction {
            recipient,
            value,
            message_id,
        } => execute_incoming_instruction(deps, env, info, recipient, value, message_id),

        // Recovery
        ExecuteMsg::FixAssetsAboveLimits {
            message_id,
            unlock_on_other_side,
            value_to_unlock,
        } => execute_fix_assets_above_limits(
            deps,
            env,
            info,
            message_id,
            unlock_on_other_side,
            value_to_unlock,
        ),

        // Fees & rewards
        ExecuteMsg::TransferRewarder { new_rewarder } => {
            execute_transfer_rewarder(deps, info, new_rewarder)
        }
        ExecuteMsg::ChangeServerFee { new_fee } => execute_change_server_fee(deps, info, new_fee),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, info, amount),

        // Limits configuration
        ExecuteMsg::UpdateLimits {
            daily_limit,
            max_per_tx,
            min_per_tx,
        } => execute_update_limits(deps, info, daily_limit, max_per_tx, min_per_tx),
        ExecuteMsg::UpdateExecutionLimits {
            daily_limit,
            max_per_tx,
        } => execute_update_execution_limits(deps, info, daily_limit, max_per_tx),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        RELAY_PULL_REPLY_ID => reply_relay_pull(deps, env, msg.result),
        WITHDRAW_PAYOUT_REPLY_ID => reply_withdraw_payout(deps, msg.result),
        SIGNATURE_PAYOUT_REPLY_ID => reply_signature_payout(msg.result),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Configuration
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Limits {} => to_json_binary(&query_limits(deps)?),
        QueryMsg::Version {} => to_json_binary(&query_version()),
        QueryMsg::Mode {} => to_json_binary(&query_mode()),

        // Limit tracking
        QueryMsg::CurrentDay {} => to_json_binary(&query_current_day(env)),
        QueryMsg::TotalSpentPerDay { day } => {
            to_json_binary(&query_total_spent_per_day(deps, day)?)
        }
        QueryMsg::TotalExecutedPerDay { day } => {
            to_json_binary(&query_total_executed_per_day(deps, day)?)
        }
        QueryMsg::WithinLimit { amount } => {
            to_json_binary(&query_within_limit(deps, env, amount)?)
        }
        QueryMsg::WithinExecutionLimit { amount } => {
            to_json_binary(&query_within_execution_limit(deps, env, amount)?)
        }

        // Fees
        QueryMsg::FeeState {} => to_json_binary(&query_fee_state(deps)?),

        // Messages & registry
        QueryMsg::OutOfLimitAmount {} => to_json_binary(&query_out_of_limit_amount(deps)?),
        QueryMsg::TxAboveLimits { message_id } => {
            to_json_binary(&query_tx_above_limits(deps, message_id)?)
        }
        QueryMsg::MessageStatus { message_id } => {
            to_json_binary(&query_message_status(deps, message_id)?)
        }
        QueryMsg::Guard {} => to_json_binary(&query_guard(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
