//! Reward Distribution Policy
//!
//! One capability, two strategies, chosen by `RewardPolicy` at initialization:
//!
//! | Strategy | Signature hook (outbound relay fee) | Affirmation hook (inbound execution) |
//! |----------|-------------------------------------|--------------------------------------|
//! | `DeferredLedger` | accrue into reward income | withhold nothing |
//! | `ImmediatePush`  | capped-gas payouts, failures swallowed | withhold server fee, direct payouts |
//!
//! Signature payouts go to accounts that may be arbitrary contracts, so each
//! one runs under a gas cap and a failed payout does not revert the relay.
//! Affirmation payouts use plain submessages and revert on failure.

use cosmwasm_std::{Addr, StdResult, Storage, SubMsg, Uint128};

use crate::error::ContractError;
use crate::fee_ledger;
use crate::state::{BridgeConfig, RewardPolicy};
use crate::token;

/// Reply id for signature-hook payouts (only replies on error)
pub const SIGNATURE_PAYOUT_REPLY_ID: u64 = 3;

/// Fee withheld from an inbound execution and the messages paying it out
#[derive(Debug, Default, PartialEq)]
pub struct Affirmation {
    pub withheld: Uint128,
    pub messages: Vec<SubMsg>,
}

pub trait RewardDistribution {
    fn name(&self) -> &'static str;

    /// Handle the fee withheld from an outbound relay; the fee is already in
    /// custody.
    fn on_signatures(
        &self,
        storage: &mut dyn Storage,
        token: &Addr,
        fee: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError>;

    /// Decide the fee taken from an inbound execution of `value` local units.
    fn on_affirmation(
        &self,
        config: &BridgeConfig,
        server_fee: Uint128,
        value: Uint128,
    ) -> Result<Affirmation, ContractError>;
}

/// Deferred accrual, pulled later by the rewarder.
pub struct DeferredLedger;

impl RewardDistribution for DeferredLedger {
    fn name(&self) -> &'static str {
        "deferred"
    }

    fn on_signatures(
        &self,
        storage: &mut dyn Storage,
        _token: &Addr,
        fee: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        if !fee.is_zero() {
            fee_ledger::accrue(storage, fee)?;
        }
        Ok(vec![])
    }

    fn on_affirmation(
        &self,
        _config: &BridgeConfig,
        _server_fee: Uint128,
        _value: Uint128,
    ) -> Result<Affirmation, ContractError> {
        Ok(Affirmation::default())
    }
}

/// Immediate push to a fixed set of reward accounts.
pub struct ImmediatePush<'a> {
    pub reward_accounts: &'a [Addr],
    pub signature_gas_limit: u64,
}

impl<'a> ImmediatePush<'a> {
    /// Equal shares per account; the remainder goes to the first account.
    fn shares(&self, fee: Uint128) -> Vec<(&'a Addr, Uint128)> {
        let count = self.reward_accounts.len() as u128;
        if count == 0 || fee.is_zero() {
            return vec![];
        }
        let share = Uint128::new(fee.u128() / count);
        let remainder = Uint128::new(fee.u128() % count);

        self.reward_accounts
            .iter()
            .enumerate()
            .map(|(i, account)| {
                let amount = if i == 0 { share + remainder } else { share };
                (account, amount)
            })
            .filter(|(_, amount)| !amount.is_zero())
            .collect()
    }
}

impl RewardDistribution for ImmediatePush<'_> {
    fn name(&self) -> &'static str {
        "push"
    }

    fn on_signatures(
        &self,
        _storage: &mut dyn Storage,
        token: &Addr,
        fee: Uint128,
    ) -> Result<Vec<SubMsg>, ContractError> {
        self.shares(fee)
            .into_iter()
            .map(|(account, amount)| {
                let msg = token::transfer(token, account, amount)?;
                Ok(SubMsg::reply_on_error(msg, SIGNATURE_PAYOUT_REPLY_ID)
                    .with_gas_limit(self.signature_gas_limit))
            })
            .collect::<StdResult<Vec<_>>>()
            .map_err(ContractError::from)
    }

    fn on_affirmation(
        &self,
        config: &BridgeConfig,
        server_fee: Uint128,
        value: Uint128,
    ) -> Result<Affirmation, ContractError> {
        if server_fee.is_zero() || value <= server_fee {
            return Ok(Affirmation::default());
        }

        let messages = self
            .shares(server_fee)
            .into_iter()
            .map(|(account, amount)| Ok(SubMsg::new(token::release(config, account, amount)?)))
            .collect::<StdResult<Vec<_>>>()?;

        Ok(Affirmation {
            withheld: server_fee,
            messages,
        })
    }
}

/// Strategy configured for this deployment.
pub fn policy(config: &BridgeConfig) -> Box<dyn RewardDistribution + '_> {
    match &config.reward_policy {
        RewardPolicy::Deferred => Box::new(DeferredLedger),
        RewardPolicy::Push {
            reward_accounts,
            signature_gas_limit,
        } => Box::new(ImmediatePush {
            reward_accounts,
            signature_gas_limit: *signature_gas_limit,
        }),
    }
}
