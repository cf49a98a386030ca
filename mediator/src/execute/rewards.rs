//! Fee and reward handlers.

use cosmwasm_std::{
    DepsMut, Event, MessageInfo, Response, StdError, SubMsg, SubMsgResult, Uint128,
};

use crate::error::ContractError;
use crate::fee_ledger;
use crate::guard::{self, GuardedCall};
use crate::roles::{self, Role};
use crate::state::load_config;
use crate::token;

/// Hand the rewarder role to `new_rewarder`.
pub fn execute_transfer_rewarder(
    deps: DepsMut,
    info: MessageInfo,
    new_rewarder: String,
) -> Result<Response, ContractError> {
    load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Owner, &info.sender)?;

    let new_rewarder = deps.api.addr_validate(&new_rewarder)?;
    let previous = roles::assign(deps.storage, Role::Rewarder, &new_rewarder)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_rewarder")
        .add_event(
            Event::new("rewarder_changed")
                .add_attribute(
                    "old_rewarder",
                    previous.map_or_else(|| "none".to_string(), |addr| addr.to_string()),
                )
                .add_attribute("new_rewarder", new_rewarder),
        ))
}

pub fn execute_change_server_fee(
    deps: DepsMut,
    info: MessageInfo,
    new_fee: Uint128,
) -> Result<Response, ContractError> {
    load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Owner, &info.sender)?;

    let old_fee = fee_ledger::set_server_fee(deps.storage, new_fee)?;

    Ok(Response::new()
        .add_attribute("method", "change_server_fee")
        .add_event(
            Event::new("server_fee_changed")
                .add_attribute("old_fee", old_fee.to_string())
                .add_attribute("new_fee", new_fee.to_string()),
        ))
}

/// Pay `amount` of accrued reward income to the rewarder.
///
/// The payout runs under the reentrancy guard; the reply releases it.
/// Withdrawing zero succeeds without a payout.
pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Rewarder, &info.sender)?;
    guard::ensure_idle(deps.storage)?;
    // Nothing to pay out
    if amount.is_zero() {
        let income = fee_ledger::load(deps.storage)?.reward_income;
        return Ok(Response::new()
            .add_attribute("method", "withdraw")
            .add_attribute("rewarder", info.sender)
            .add_attribute("amount", amount.to_string())
            .add_attribute("remaining_income", income.to_string()));
    }

    let remaining = fee_ledger::debit(deps.storage, amount)?;
    let call = GuardedCall::Withdraw {
        rewarder: info.sender.clone(),
        amount,
    };
    guard::acquire(deps.storage, &call)?;
    let payout = token::transfer(&config.token, &info.sender, amount)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(payout, call.reply_id()))
        .add_attribute("method", "withdraw")
        .add_attribute("rewarder", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining_income", remaining.to_string()))
}

/// Reply to the withdrawal payout: release the guard, fail if the payout did.
pub fn reply_withdraw_payout(
    deps: DepsMut,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let call = guard::release(deps.storage)?;
    let GuardedCall::Withdraw { rewarder, amount } = call else {
        return Err(ContractError::GuardNotHeld);
    };

    if let SubMsgResult::Err(err) = result {
        return Err(StdError::generic_err(format!("reward payout failed: {}", err)).into());
    }

    Ok(Response::new()
        .add_attribute("method", "withdraw_reply")
        .add_attribute("rewarder", rewarder)
        .add_attribute("amount", amount.to_string()))
}

/// A capped signature payout failed. The relay stands; only record it.
pub fn reply_signature_payout(result: SubMsgResult) -> Result<Response, ContractError> {
    let reason = match result {
        SubMsgResult::Err(err) => err,
        SubMsgResult::Ok(_) => "unexpected success reply".to_string(),
    };

    Ok(Response::new()
        .add_attribute("method", "signature_payout_reply")
        .add_attribute("signature_reward_failed", reason))
}
