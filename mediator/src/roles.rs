//! Role table
//!
//! Authorization is data: each operation names the role it requires and
//! checks the sender against this table before touching any other state.
//! `Bootstrap`, `Owner` and `Rewarder` are stored accounts; `Transport` and
//! `Token` resolve to the collaborators recorded in the bridge config.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::state::load_config;

#[cw_serde]
#[derive(Copy)]
pub enum Role {
    /// Account allowed to call `Initialize`
    Bootstrap,
    Owner,
    /// Account allowed to withdraw reward income
    Rewarder,
    /// Transport contract delivering inbound instructions
    Transport,
    /// Token contract sending transfer notifications
    Token,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Bootstrap => "bootstrap",
            Role::Owner => "owner",
            Role::Rewarder => "rewarder",
            Role::Transport => "transport",
            Role::Token => "token",
        }
    }
}

/// Key: role name, Value: account holding the role
pub const ROLES: Map<&str, Addr> = Map::new("roles");

/// Current holder of `role`, if any.
pub fn holder(storage: &dyn Storage, role: Role) -> Result<Option<Addr>, ContractError> {
    match role {
        Role::Bootstrap | Role::Owner | Role::Rewarder => {
            Ok(ROLES.may_load(storage, role.as_str())?)
        }
        Role::Transport => Ok(Some(load_config(storage)?.transport)),
        Role::Token => Ok(Some(load_config(storage)?.token)),
    }
}

/// Reject `sender` unless it holds `role`.
pub fn ensure(storage: &dyn Storage, role: Role, sender: &Addr) -> Result<(), ContractError> {
    match holder(storage, role)? {
        Some(account) if &account == sender => Ok(()),
        _ => Err(ContractError::unauthorized(role.as_str())),
    }
}

/// Assign a stored role, returning the previous holder.
pub fn assign(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<Option<Addr>> {
    debug_assert!(matches!(role, Role::Bootstrap | Role::Owner | Role::Rewarder));
    let previous = ROLES.may_load(storage, role.as_str())?;
    ROLES.save(storage, role.as_str(), account)?;
    Ok(previous)
}
