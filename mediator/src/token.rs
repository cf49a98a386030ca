//! cw20 token collaborator messages.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, Env, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::state::{BridgeConfig, TokenType};

fn cw20_msg(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Pull `amount` from `owner` into the mediator's custody (needs allowance).
pub fn transfer_from(env: &Env, token: &Addr, owner: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        },
    )
}

/// Pay `amount` out of custody.
pub fn transfer(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

/// Destroy `amount` held in custody.
pub fn burn(token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(token, &Cw20ExecuteMsg::Burn { amount })
}

/// Deliver `amount` to `recipient` for an inbound execution: unlock from
/// custody or mint, depending on how this side holds the token.
pub fn release(config: &BridgeConfig, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    match config.token_type {
        TokenType::LockUnlock => transfer(&config.token, recipient, amount),
        TokenType::MintBurn => cw20_msg(
            &config.token,
            &Cw20ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount,
            },
        ),
    }
}
