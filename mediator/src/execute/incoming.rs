//! Incoming bridging instructions delivered by the transport.

use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use crate::error::ContractError;
use crate::fee_ledger;
use crate::hash::{parse_message_id, to_hex};
use crate::limits::{self, day_of, Direction};
use crate::registry;
use crate::reward_policy::policy;
use crate::roles::{self, Role};
use crate::state::{load_config, EXECUTED_MESSAGES};
use crate::token;
use crate::transport::shift_value;

/// Execute an instruction from the paired mediator.
///
/// Values within the execution limits are released at once; anything else is
/// parked in the out-of-limit registry for the owner to resolve.
pub fn execute_incoming_instruction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    value: Uint128,
    message_id: Binary,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Transport, &info.sender)?;

    let id = parse_message_id(&message_id)?;
    let id_hex = to_hex(&id);
    if EXECUTED_MESSAGES.has(deps.storage, &id) || registry::is_registered(deps.storage, &id) {
        return Err(ContractError::AlreadyRegistered { message_id: id_hex });
    }
    let recipient = deps.api.addr_validate(&recipient)?;
    if value.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "value must be greater than zero".to_string(),
        });
    }

    let day = day_of(env.block.time);
    if !limits::within_limit(deps.storage, Direction::Inbound, day, value)? {
        registry::register(deps.storage, &id, recipient.clone(), value)?;
        return Ok(Response::new()
            .set_data(to_json_binary(&false)?)
            .add_attribute("method", "execute_incoming_instruction")
            .add_event(
                Event::new("amount_limit_exceeded")
                    .add_attribute("recipient", recipient)
                    .add_attribute("value", value.to_string())
                    .add_attribute("message_id", id_hex),
            ));
    }

    limits::record_spend(deps.storage, Direction::Inbound, day, value)?;
    EXECUTED_MESSAGES.save(deps.storage, &id, &value)?;

    let local_value = shift_value(value, config.decimal_shift)?;
    let server_fee = fee_ledger::load(deps.storage)?.server_fee;
    let policy = policy(&config);
    let affirmation = policy.on_affirmation(&config, server_fee, local_value)?;
    let payout = local_value - affirmation.withheld;

    let mut response = Response::new();
    if !payout.is_zero() {
        response = response.add_message(token::release(&config, &recipient, payout)?);
    }

    Ok(response
        .add_submessages(affirmation.messages)
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "execute_incoming_instruction")
        .add_event(
            Event::new("tokens_bridged")
                .add_attribute("recipient", recipient)
                .add_attribute("value", payout.to_string())
                .add_attribute("fee", affirmation.withheld.to_string())
                .add_attribute("message_id", id_hex)
                .add_attribute("reward_policy", policy.name()),
        ))
}
