//! Outgoing transfer handlers (RelayTokens and Receive).
//!
//! `RelayTokens` pulls tokens with cw20 `TransferFrom` under the reentrancy
//! guard; the bridge path runs in the reply once the tokens are in custody.
//! `Receive` is the cw20 `Send` hook and bridges immediately.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, Response, StdError,
    Storage, SubMsg, SubMsgResult, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::fee_ledger;
use crate::guard::{self, GuardedCall};
use crate::hash::to_hex;
use crate::limits::{self, day_of, Direction};
use crate::msg::ReceiveMsg;
use crate::reward_policy::policy;
use crate::roles::{self, Role};
use crate::state::{load_config, BridgeConfig, TokenType};
use crate::token;
use crate::transport::OutboundMessage;

/// Start a relay: check fee and limits, record the spend, take the guard and
/// pull `value` tokens from the sender.
pub fn execute_relay_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receiver: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    guard::ensure_idle(deps.storage)?;
    fee_ledger::load(deps.storage)?.check_covers_fee(value)?;
    if receiver.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "receiver must not be empty".to_string(),
        });
    }

    let day = day_of(env.block.time);
    limits::check_limit(deps.storage, Direction::Outbound, day, value)?;
    limits::record_spend(deps.storage, Direction::Outbound, day, value)?;

    let call = GuardedCall::Relay {
        sender: info.sender.clone(),
        receiver: receiver.clone(),
        value,
    };
    guard::acquire(deps.storage, &call)?;
    let pull = token::transfer_from(&env, &config.token, &info.sender, value)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(pull, call.reply_id()))
        .add_attribute("method", "relay_tokens")
        .add_attribute("sender", info.sender)
        .add_attribute("receiver", receiver)
        .add_attribute("value", value.to_string())
        .add_attribute("day", day.to_string()))
}

/// Reply to the relay pull: release the guard, then bridge the tokens.
pub fn reply_relay_pull(
    deps: DepsMut,
    env: Env,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let call = guard::release(deps.storage)?;
    let GuardedCall::Relay {
        sender,
        receiver,
        value,
    } = call
    else {
        return Err(ContractError::GuardNotHeld);
    };

    if let SubMsgResult::Err(err) = result {
        return Err(StdError::generic_err(format!("token pull failed: {}", err)).into());
    }

    let config = load_config(deps.storage)?;
    let response = bridge_tokens(deps.storage, &env, &config, &sender, receiver, value)?;
    Ok(response.add_attribute("method", "relay_tokens_reply"))
}

/// cw20 transfer notification.
///
/// Outside a guarded relay the transfer is checked and counted against the
/// outbound limits here; while the guard is held the relay already did so.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Token, &info.sender)?;

    let from = deps.api.addr_validate(&cw20_msg.sender)?;
    let value = cw20_msg.amount;
    let receiver = if cw20_msg.msg.is_empty() {
        from.to_string()
    } else {
        match from_json(&cw20_msg.msg)? {
            ReceiveMsg::Relay { receiver } => receiver,
        }
    };
    if receiver.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "receiver must not be empty".to_string(),
        });
    }

    let guarded = guard::is_locked(deps.storage)?;
    if !guarded {
        fee_ledger::load(deps.storage)?.check_covers_fee(value)?;
        let day = day_of(env.block.time);
        limits::check_limit(deps.storage, Direction::Outbound, day, value)?;
        limits::record_spend(deps.storage, Direction::Outbound, day, value)?;
    }

    let response = bridge_tokens(deps.storage, &env, &config, &from, receiver, value)?;
    Ok(response
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "receive")
        .add_attribute("guarded", guarded.to_string()))
}

/// Tokens are in custody: distribute the fee, burn if this side mints, and
/// send the bridging instruction for `value - server_fee`.
fn bridge_tokens(
    storage: &mut dyn Storage,
    env: &Env,
    config: &BridgeConfig,
    from: &Addr,
    receiver: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    let fee_state = fee_ledger::load(storage)?;
    fee_state.check_covers_fee(value)?;
    let fee = fee_state.server_fee;
    let bridged = value - fee;

    let policy = policy(config);
    let fee_payouts = policy.on_signatures(storage, &config.token, fee)?;

    let mut response = Response::new();
    if config.token_type == TokenType::MintBurn {
        response = response.add_message(token::burn(&config.token, bridged)?);
    }

    let outbound = OutboundMessage::new(storage, env, config, receiver.clone(), bridged)?;
    let message_id = to_hex(&outbound.message_id);
    response = response.add_message(outbound.into_cosmos_msg(config)?);

    Ok(response.add_submessages(fee_payouts).add_event(
        Event::new("tokens_relayed")
            .add_attribute("message_id", message_id)
            .add_attribute("sender", from)
            .add_attribute("receiver", receiver)
            .add_attribute("value", bridged.to_string())
            .add_attribute("fee", fee.to_string())
            .add_attribute("reward_policy", policy.name()),
    ))
}
