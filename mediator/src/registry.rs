//! Out-of-Limit Registry
//!
//! Inbound instructions rejected by the execution limiter are parked here,
//! keyed by message id, until the owner resolves them. Entries are never
//! removed: a fully resolved entry keeps its recipient with a zero pending
//! value, so the message id stays registered and further fixes are refused.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::hash::to_hex;

/// A parked inbound instruction
#[cw_serde]
pub struct OutOfLimitEntry {
    pub recipient: Addr,
    /// Value still awaiting resolution (remote units, before decimal shift)
    pub pending_value: Uint128,
}

/// Key: 32-byte message id, Value: parked entry
pub const TX_ABOVE_LIMITS: Map<&[u8], OutOfLimitEntry> = Map::new("tx_above_limits");

/// Sum of all pending values
pub const OUT_OF_LIMIT_AMOUNT: Item<Uint128> = Item::new("out_of_limit_amount");

pub fn out_of_limit_amount(storage: &dyn Storage) -> StdResult<Uint128> {
    Ok(OUT_OF_LIMIT_AMOUNT.may_load(storage)?.unwrap_or_default())
}

pub fn entry(storage: &dyn Storage, message_id: &[u8; 32]) -> StdResult<Option<OutOfLimitEntry>> {
    TX_ABOVE_LIMITS.may_load(storage, message_id)
}

pub fn is_registered(storage: &dyn Storage, message_id: &[u8; 32]) -> bool {
    TX_ABOVE_LIMITS.has(storage, message_id)
}

/// Park an instruction rejected by the execution limiter.
pub fn register(
    storage: &mut dyn Storage,
    message_id: &[u8; 32],
    recipient: Addr,
    value: Uint128,
) -> Result<(), ContractError> {
    if is_registered(storage, message_id) {
        return Err(ContractError::AlreadyRegistered {
            message_id: to_hex(message_id),
        });
    }

    let total = out_of_limit_amount(storage)?
        .checked_add(value)
        .map_err(StdError::from)?;
    OUT_OF_LIMIT_AMOUNT.save(storage, &total)?;
    TX_ABOVE_LIMITS.save(
        storage,
        message_id,
        &OutOfLimitEntry {
            recipient,
            pending_value: value,
        },
    )?;
    Ok(())
}

/// Check that `value` can be resolved from a parked entry without touching
/// storage.
pub fn check_resolvable(
    storage: &dyn Storage,
    message_id: &[u8; 32],
    value: Uint128,
) -> Result<OutOfLimitEntry, ContractError> {
    if value.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "value to unlock must be greater than zero".to_string(),
        });
    }

    let entry = entry(storage, message_id)?.ok_or(ContractError::InsufficientRecovery {
        requested: value,
        pending: Uint128::zero(),
    })?;
    if value > entry.pending_value {
        return Err(ContractError::InsufficientRecovery {
            requested: value,
            pending: entry.pending_value,
        });
    }
    Ok(entry)
}

/// Resolve `value` of a parked entry, returning the updated entry.
pub fn resolve(
    storage: &mut dyn Storage,
    message_id: &[u8; 32],
    value: Uint128,
) -> Result<OutOfLimitEntry, ContractError> {
    let mut entry = check_resolvable(storage, message_id, value)?;

    entry.pending_value -= value;
    let total = out_of_limit_amount(storage)?
        .checked_sub(value)
        .map_err(StdError::from)?;
    OUT_OF_LIMIT_AMOUNT.save(storage, &total)?;
    TX_ABOVE_LIMITS.save(storage, message_id, &entry)?;
    Ok(entry)
}
