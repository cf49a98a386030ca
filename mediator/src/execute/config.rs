//! Owner configuration updates.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::limits::{EXECUTION_LIMITS, OUTBOUND_LIMITS};
use crate::roles::{self, Role};
use crate::state::load_config;

pub fn execute_update_limits(
    deps: DepsMut,
    info: MessageInfo,
    daily_limit: Option<Uint128>,
    max_per_tx: Option<Uint128>,
    min_per_tx: Option<Uint128>,
) -> Result<Response, ContractError> {
    load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Owner, &info.sender)?;

    let mut limits = OUTBOUND_LIMITS.load(deps.storage)?;
    if let Some(daily) = daily_limit {
        limits.daily_limit = daily;
    }
    if let Some(max) = max_per_tx {
        limits.max_per_tx = max;
    }
    if let Some(min) = min_per_tx {
        limits.min_per_tx = min;
    }
    limits.validate()?;
    OUTBOUND_LIMITS.save(deps.storage, &limits)?;

    Ok(Response::new()
        .add_attribute("method", "update_limits")
        .add_attribute("daily_limit", limits.daily_limit.to_string())
        .add_attribute("max_per_tx", limits.max_per_tx.to_string())
        .add_attribute("min_per_tx", limits.min_per_tx.to_string()))
}

pub fn execute_update_execution_limits(
    deps: DepsMut,
    info: MessageInfo,
    daily_limit: Option<Uint128>,
    max_per_tx: Option<Uint128>,
) -> Result<Response, ContractError> {
    load_config(deps.storage)?;
    roles::ensure(deps.storage, Role::Owner, &info.sender)?;

    let mut limits = EXECUTION_LIMITS.load(deps.storage)?;
    if let Some(daily) = daily_limit {
        limits.daily_limit = daily;
    }
    if let Some(max) = max_per_tx {
        limits.max_per_tx = max;
    }
    limits.validate()?;
    EXECUTION_LIMITS.save(deps.storage, &limits)?;

    Ok(Response::new()
        .add_attribute("method", "update_execution_limits")
        .add_attribute("daily_limit", limits.daily_limit.to_string())
        .add_attribute("max_per_tx", limits.max_per_tx.to_string()))
}
