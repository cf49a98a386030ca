//! Outbound messages to the transport collaborator
//!
//! The mediator never talks to its paired mediator directly. It asks the
//! transport to pass an `ExecuteIncomingInstruction` to the paired mediator,
//! tagged with a message id the paired side uses for idempotency.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, Env, StdResult, Storage, Uint128, WasmMsg};

use crate::error::ContractError;
use crate::hash::compute_message_id;
use crate::msg::ExecuteMsg;
use crate::state::{next_outbound_nonce, BridgeConfig};

/// Interface the transport contract exposes to mediators.
#[cw_serde]
pub enum TransportExecuteMsg {
    /// Relay `data` as an execute message to `contract` on the remote chain.
    RequireToPassMessage {
        contract: String,
        data: Binary,
        gas: u64,
    },
}

/// A bridging instruction addressed to the paired mediator.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundMessage {
    pub message_id: [u8; 32],
    pub recipient: String,
    pub value: Uint128,
}

impl OutboundMessage {
    /// Build an instruction with a fresh message id.
    pub fn new(
        storage: &mut dyn Storage,
        env: &Env,
        config: &BridgeConfig,
        recipient: String,
        value: Uint128,
    ) -> StdResult<Self> {
        let nonce = next_outbound_nonce(storage)?;
        let message_id = compute_message_id(
            env.contract.address.as_str(),
            &config.paired_mediator,
            &recipient,
            value.u128(),
            nonce,
        );
        Ok(Self {
            message_id,
            recipient,
            value,
        })
    }

    /// Wrap the instruction into a transport call.
    pub fn into_cosmos_msg(self, config: &BridgeConfig) -> StdResult<CosmosMsg> {
        let data = to_json_binary(&ExecuteMsg::ExecuteIncomingInstruction {
            recipient: self.recipient,
            value: self.value,
            message_id: Binary::from(self.message_id.to_vec()),
        })?;

        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.transport.to_string(),
            msg: to_json_binary(&TransportExecuteMsg::RequireToPassMessage {
                contract: config.paired_mediator.clone(),
                data,
                gas: config.request_gas_limit,
            })?,
            funds: vec![],
        }))
    }
}

/// Convert a value received from the remote chain into local token units.
///
/// A positive shift scales up; a negative shift divides and truncates.
pub fn shift_value(value: Uint128, decimal_shift: i32) -> Result<Uint128, ContractError> {
    let factor = 10u128
        .checked_pow(decimal_shift.unsigned_abs())
        .ok_or_else(|| ContractError::InvalidAmount {
            reason: format!("decimal shift {} out of range", decimal_shift),
        })?;

    if decimal_shift >= 0 {
        value
            .checked_mul(Uint128::new(factor))
            .map_err(|_| ContractError::InvalidAmount {
                reason: format!("{} overflows after decimal shift", value),
            })
    } else {
        Ok(Uint128::new(value.u128() / factor))
    }
}
