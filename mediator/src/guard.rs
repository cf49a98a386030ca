//! Reentrancy Guard
//!
//! A single storage-backed lock covering the window in which the mediator
//! hands control to the token contract: from the execute that dispatches a
//! pull or payout submessage until the reply for that submessage. The guard
//! stores the context of the in-flight call, so "locked" and "a call is
//! pending" are the same fact.
//!
//! Every guarded submessage is dispatched with `reply_always`, and the reply
//! handler releases the guard before doing anything that can fail. A failing
//! reply reverts the whole transaction, which also restores the unlocked
//! state, so no path leaves the guard held once the transaction ends.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

/// Reply id for the cw20 `TransferFrom` pulling relayed tokens into custody
pub const RELAY_PULL_REPLY_ID: u64 = 1;

/// Reply id for the cw20 `Transfer` paying out a rewarder withdrawal
pub const WITHDRAW_PAYOUT_REPLY_ID: u64 = 2;

/// Context of the call holding the guard
#[cw_serde]
pub enum GuardedCall {
    Relay {
        sender: Addr,
        receiver: String,
        value: Uint128,
    },
    Withdraw {
        rewarder: Addr,
        amount: Uint128,
    },
}

impl GuardedCall {
    pub fn reply_id(&self) -> u64 {
        match self {
            GuardedCall::Relay { .. } => RELAY_PULL_REPLY_ID,
            GuardedCall::Withdraw { .. } => WITHDRAW_PAYOUT_REPLY_ID,
        }
    }
}

pub const GUARD: Item<GuardedCall> = Item::new("reentrancy_guard");

pub fn is_locked(storage: &dyn Storage) -> StdResult<bool> {
    Ok(GUARD.may_load(storage)?.is_some())
}

pub fn ensure_idle(storage: &dyn Storage) -> Result<(), ContractError> {
    if is_locked(storage)? {
        return Err(ContractError::ReentrancyViolation);
    }
    Ok(())
}

/// Take the guard for `call`.
pub fn acquire(storage: &mut dyn Storage, call: &GuardedCall) -> Result<(), ContractError> {
    ensure_idle(storage)?;
    GUARD.save(storage, call)?;
    Ok(())
}

/// Drop the guard and hand back the context it carried.
pub fn release(storage: &mut dyn Storage) -> Result<GuardedCall, ContractError> {
    let call = GUARD
        .may_load(storage)?
        .ok_or(ContractError::GuardNotHeld)?;
    GUARD.remove(storage);
    Ok(call)
}
