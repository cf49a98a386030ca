//! One-time bridge wiring.

use cosmwasm_std::{to_json_binary, Addr, Api, DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::fee_ledger::{FeeState, FEE_STATE};
use crate::limits::{ExecutionLimits, OutboundLimits, EXECUTION_LIMITS, OUTBOUND_LIMITS};
use crate::msg::RewardPolicyMsg;
use crate::registry::OUT_OF_LIMIT_AMOUNT;
use crate::roles::{self, Role};
use crate::state::{
    is_initialized, BridgeConfig, RewardPolicy, TokenType, BRIDGE_CONFIG, MAX_DECIMAL_SHIFT,
    OUTBOUND_NONCE,
};

/// Wire the mediator. Only the bootstrap account may call this, once.
#[allow(clippy::too_many_arguments)]
pub fn execute_initialize(
    deps: DepsMut,
    info: MessageInfo,
    transport: String,
    paired_mediator: String,
    token: String,
    token_type: TokenType,
    limits: OutboundLimits,
    execution_limits: ExecutionLimits,
    request_gas_limit: u64,
    decimal_shift: i32,
    owner: String,
    reward_policy: RewardPolicyMsg,
) -> Result<Response, ContractError> {
    if is_initialized(deps.storage)? {
        return Err(ContractError::AlreadyInitialized);
    }
    roles::ensure(deps.storage, Role::Bootstrap, &info.sender)?;

    let transport = validate_addr(deps.api, "transport", &transport)?;
    let token = validate_addr(deps.api, "token", &token)?;
    let owner = validate_addr(deps.api, "owner", &owner)?;
    if paired_mediator.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "paired_mediator must not be empty".to_string(),
        });
    }

    if request_gas_limit == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "request_gas_limit must be greater than zero".to_string(),
        });
    }
    if decimal_shift.unsigned_abs() > MAX_DECIMAL_SHIFT.unsigned_abs() {
        return Err(ContractError::InvalidConfig {
            reason: format!(
                "decimal_shift {} exceeds +/-{}",
                decimal_shift, MAX_DECIMAL_SHIFT
            ),
        });
    }

    limits.validate_initial()?;
    execution_limits.validate_initial()?;

    let reward_policy = match reward_policy {
        RewardPolicyMsg::Deferred {} => RewardPolicy::Deferred,
        RewardPolicyMsg::Push {
            reward_accounts,
            signature_gas_limit,
        } => {
            if reward_accounts.is_empty() {
                return Err(ContractError::InvalidConfig {
                    reason: "push policy needs at least one reward account".to_string(),
                });
            }
            if signature_gas_limit == 0 {
                return Err(ContractError::InvalidConfig {
                    reason: "signature_gas_limit must be greater than zero".to_string(),
                });
            }
            let reward_accounts = reward_accounts
                .iter()
                .map(|account| validate_addr(deps.api, "reward account", account))
                .collect::<Result<Vec<_>, _>>()?;
            RewardPolicy::Push {
                reward_accounts,
                signature_gas_limit,
            }
        }
    };

    let config = BridgeConfig {
        transport,
        paired_mediator,
        token,
        token_type,
        request_gas_limit,
        decimal_shift,
        reward_policy,
    };
    BRIDGE_CONFIG.save(deps.storage, &config)?;
    OUTBOUND_LIMITS.save(deps.storage, &limits)?;
    EXECUTION_LIMITS.save(deps.storage, &execution_limits)?;
    FEE_STATE.save(deps.storage, &FeeState::default())?;
    OUT_OF_LIMIT_AMOUNT.save(deps.storage, &Uint128::zero())?;
    OUTBOUND_NONCE.save(deps.storage, &0u64)?;
    roles::assign(deps.storage, Role::Owner, &owner)?;

    Ok(Response::new()
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "initialize")
        .add_attribute("transport", config.transport)
        .add_attribute("paired_mediator", config.paired_mediator)
        .add_attribute("token", config.token)
        .add_attribute("token_type", config.token_type.as_str())
        .add_attribute("reward_policy", config.reward_policy.as_str())
        .add_attribute("owner", owner)
        .add_attribute("daily_limit", limits.daily_limit.to_string())
        .add_attribute("max_per_tx", limits.max_per_tx.to_string())
        .add_attribute("min_per_tx", limits.min_per_tx.to_string())
        .add_attribute(
            "execution_daily_limit",
            execution_limits.daily_limit.to_string(),
        )
        .add_attribute(
            "execution_max_per_tx",
            execution_limits.max_per_tx.to_string(),
        ))
}

fn validate_addr(api: &dyn Api, field: &str, value: &str) -> Result<Addr, ContractError> {
    api.addr_validate(value)
        .map_err(|e| ContractError::InvalidAddress {
            reason: format!("{}: {}", field, e),
        })
}
