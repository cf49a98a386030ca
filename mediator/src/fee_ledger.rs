//! Fee & Reward Ledger
//!
//! A flat server fee is withheld from every relay. Under the deferred reward
//! policy the fee accrues into `reward_income`, which only the rewarder role
//! can draw down. The ledger tracks bookkeeping only; it does not reconcile
//! against the token balance actually held in custody.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

/// Fee configuration and accrual
#[cw_serde]
#[derive(Default)]
pub struct FeeState {
    /// Flat charge per relayed transfer
    pub server_fee: Uint128,
    /// Undrawn reward balance
    pub reward_income: Uint128,
}

impl FeeState {
    /// Reject a transfer that would not cover the server fee.
    pub fn check_covers_fee(&self, value: Uint128) -> Result<(), ContractError> {
        if value <= self.server_fee {
            return Err(ContractError::BelowFeeThreshold {
                fee: self.server_fee,
                value,
            });
        }
        Ok(())
    }
}

pub const FEE_STATE: Item<FeeState> = Item::new("fee_state");

pub fn load(storage: &dyn Storage) -> StdResult<FeeState> {
    Ok(FEE_STATE.may_load(storage)?.unwrap_or_default())
}

/// Add `amount` to the reward income.
pub fn accrue(storage: &mut dyn Storage, amount: Uint128) -> StdResult<Uint128> {
    let mut state = load(storage)?;
    state.reward_income = state
        .reward_income
        .checked_add(amount)
        .map_err(StdError::from)?;
    FEE_STATE.save(storage, &state)?;
    Ok(state.reward_income)
}

/// Draw `amount` from the reward income, returning what remains.
pub fn debit(storage: &mut dyn Storage, amount: Uint128) -> Result<Uint128, ContractError> {
    let mut state = load(storage)?;
    if amount > state.reward_income {
        return Err(ContractError::InsufficientFunds {
            requested: amount,
            available: state.reward_income,
        });
    }
    state.reward_income -= amount;
    FEE_STATE.save(storage, &state)?;
    Ok(state.reward_income)
}

/// Replace the server fee, returning the previous one.
pub fn set_server_fee(storage: &mut dyn Storage, fee: Uint128) -> StdResult<Uint128> {
    let mut state = load(storage)?;
    let previous = state.server_fee;
    state.server_fee = fee;
    FEE_STATE.save(storage, &state)?;
    Ok(previous)
}
