//! Owner recovery of out-of-limit instructions.

use cosmwasm_std::{Binary, DepsMut, Env, Event, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::hash::{parse_message_id, to_hex};
use crate::limits::{Direction, OUTBOUND_LIMITS};
use crate::registry;
use crate::roles::{self, Role};
use crate::state::load_config;
use crate::transport::{shift_value, OutboundMessage};

/// Resolve `value_to_unlock` of a parked instruction.
///
/// With `unlock_on_other_side` the resolved value is sent back to the
/// original recipient on the remote chain; otherwise it is only written off.
pub fn execute_fix_assets_above_limits(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message_id: Binary,
    unlock_on_other_side: bool,
    value_to_unlock: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Owner, &info.sender)?;

    let id = parse_message_id(&message_id)?;
    let parked = registry::check_resolvable(deps.storage, &id, value_to_unlock)?;

    let unlock_value = if unlock_on_other_side {
        let local = shift_value(value_to_unlock, config.decimal_shift)?;
        let max_per_tx = OUTBOUND_LIMITS.load(deps.storage)?.max_per_tx;
        if local > max_per_tx {
            return Err(ContractError::LimitExceeded {
                direction: Direction::Outbound,
                limit_type: "max_per_tx".to_string(),
                limit: max_per_tx,
                requested: local,
            });
        }
        Some(local)
    } else {
        None
    };

    let entry = registry::resolve(deps.storage, &id, value_to_unlock)?;

    let mut response = Response::new()
        .add_attribute("method", "fix_assets_above_limits")
        .add_attribute("unlock_on_other_side", unlock_on_other_side.to_string());

    if let Some(local) = unlock_value {
        let outbound = OutboundMessage::new(
            deps.storage,
            &env,
            &config,
            parked.recipient.to_string(),
            local,
        )?;
        response = response
            .add_attribute("reverse_message_id", to_hex(&outbound.message_id))
            .add_message(outbound.into_cosmos_msg(&config)?);
    }

    Ok(response.add_event(
        Event::new("asset_above_limits_fixed")
            .add_attribute("message_id", to_hex(&id))
            .add_attribute("value", value_to_unlock.to_string())
            .add_attribute("remaining", entry.pending_value.to_string()),
    ))
}
