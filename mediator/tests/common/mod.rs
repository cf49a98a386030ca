//! Shared multi-test fixtures: cw20 tokens, mediators and a mock transport.

#![allow(dead_code)]

use anyhow::Result as AnyResult;
use cosmwasm_std::{
    from_json, Addr, Binary, DepsMut, Empty, Env, MessageInfo, Response, StdError, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use mediator::limits::{ExecutionLimits, OutboundLimits};
use mediator::msg::{
    ExecuteMsg, FeeStateResponse, GuardResponse, InstantiateMsg, QueryMsg, RewardPolicyMsg,
};
use mediator::state::TokenType;

pub const ADMIN: &str = "terra1admin";
pub const USER: &str = "terra1user";
pub const RECEIVER: &str = "terra1receiver";
pub const REWARDER: &str = "terra1rewarder";
/// Account the rejecting token refuses to credit.
pub const REJECTING_ACCOUNT: &str = "terra1rejectingaccount";

pub const USER_BALANCE: u128 = 1_000_000;
pub const CUSTODY_BALANCE: u128 = 1_000_000;

// ============================================================================
// Mock Transport
// ============================================================================

/// Stand-in for the message-relay transport. It queues every passed message
/// and delivers one on request, calling the target as the transport.
pub mod mock_transport {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdError,
        StdResult, WasmMsg,
    };
    use cw_storage_plus::{Item, Map};

    #[cw_serde]
    pub struct InstantiateMsg {}

    #[cw_serde]
    pub enum ExecuteMsg {
        RequireToPassMessage {
            contract: String,
            data: Binary,
            gas: u64,
        },
        Deliver {
            index: u64,
        },
    }

    #[cw_serde]
    pub enum QueryMsg {
        Messages {},
    }

    #[cw_serde]
    pub struct PassedMessage {
        pub sender: String,
        pub contract: String,
        pub data: Binary,
        pub gas: u64,
        pub delivered: bool,
    }

    const MESSAGES: Map<u64, PassedMessage> = Map::new("messages");
    const COUNT: Item<u64> = Item::new("count");

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: InstantiateMsg,
    ) -> StdResult<Response> {
        COUNT.save(deps.storage, &0)?;
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            ExecuteMsg::RequireToPassMessage {
                contract,
                data,
                gas,
            } => {
                let index = COUNT.load(deps.storage)?;
                MESSAGES.save(
                    deps.storage,
                    index,
                    &PassedMessage {
                        sender: info.sender.to_string(),
                        contract,
                        data,
                        gas,
                        delivered: false,
                    },
                )?;
                COUNT.save(deps.storage, &(index + 1))?;
                Ok(Response::new().add_attribute("index", index.to_string()))
            }
            ExecuteMsg::Deliver { index } => {
                let mut message = MESSAGES.load(deps.storage, index)?;
                if message.delivered {
                    return Err(StdError::generic_err("already delivered"));
                }
                message.delivered = true;
                MESSAGES.save(deps.storage, index, &message)?;
                Ok(Response::new().add_message(WasmMsg::Execute {
                    contract_addr: message.contract,
                    msg: message.data,
                    funds: vec![],
                }))
            }
        }
    }

    pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Messages {} => {
                let messages = MESSAGES
                    .range(deps.storage, None, None, Order::Ascending)
                    .map(|item| item.map(|(_, message)| message))
                    .collect::<StdResult<Vec<_>>>()?;
                to_json_binary(&messages)
            }
        }
    }
}

pub use mock_transport::PassedMessage;

// ============================================================================
// Contract Wrappers
// ============================================================================

pub fn contract_mediator() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        mediator::contract::execute,
        mediator::contract::instantiate,
        mediator::contract::query,
    )
    .with_reply(mediator::contract::reply)
    .with_migrate(mediator::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// cw20-base that fails every `Transfer` to `REJECTING_ACCOUNT`.
fn execute_rejecting_cw20(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: cw20_base::msg::ExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    if let cw20_base::msg::ExecuteMsg::Transfer { recipient, .. } = &msg {
        if recipient == REJECTING_ACCOUNT {
            return Err(StdError::generic_err("recipient rejects transfers").into());
        }
    }
    cw20_base::contract::execute(deps, env, info, msg)
}

pub fn contract_rejecting_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        execute_rejecting_cw20,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn contract_transport() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        mock_transport::execute,
        mock_transport::instantiate,
        mock_transport::query,
    );
    Box::new(contract)
}

// ============================================================================
// Deployment
// ============================================================================

/// One mediator with its token.
#[derive(Clone, Debug)]
pub struct Side {
    pub mediator: Addr,
    pub token: Addr,
}

/// Parameters for one mediator deployment.
#[derive(Clone, Debug)]
pub struct SideConfig {
    pub token_type: TokenType,
    pub limits: OutboundLimits,
    pub execution_limits: ExecutionLimits,
    pub decimal_shift: i32,
    pub server_fee: Uint128,
    pub reward_policy: RewardPolicyMsg,
}

impl Default for SideConfig {
    fn default() -> Self {
        Self {
            token_type: TokenType::LockUnlock,
            limits: default_limits(),
            execution_limits: default_execution_limits(),
            decimal_shift: 0,
            server_fee: Uint128::zero(),
            reward_policy: RewardPolicyMsg::Deferred {},
        }
    }
}

pub fn default_limits() -> OutboundLimits {
    OutboundLimits {
        daily_limit: Uint128::new(1000),
        max_per_tx: Uint128::new(500),
        min_per_tx: Uint128::new(10),
    }
}

pub fn default_execution_limits() -> ExecutionLimits {
    ExecutionLimits {
        daily_limit: Uint128::new(1000),
        max_per_tx: Uint128::new(500),
    }
}

pub fn store_codes(app: &mut App) -> (u64, u64, u64) {
    (
        app.store_code(contract_mediator()),
        app.store_code(contract_cw20()),
        app.store_code(contract_transport()),
    )
}

pub fn instantiate_transport(app: &mut App, code_id: u64) -> Addr {
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &mock_transport::InstantiateMsg {},
        &[],
        "transport",
        None,
    )
    .unwrap()
}

pub fn instantiate_mediator(app: &mut App, code_id: u64, label: &str) -> Addr {
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &InstantiateMsg { bootstrapper: None },
        &[],
        label,
        Some(ADMIN.to_string()),
    )
    .unwrap()
}

/// cw20 token for `mediator`: a funded LockUnlock token, or an empty
/// MintBurn token minted by the mediator.
pub fn instantiate_token(
    app: &mut App,
    code_id: u64,
    mediator: &Addr,
    token_type: &TokenType,
    symbol: &str,
) -> Addr {
    let (initial_balances, mint) = match token_type {
        TokenType::LockUnlock => (
            vec![
                Cw20Coin {
                    address: USER.to_string(),
                    amount: Uint128::new(USER_BALANCE),
                },
                Cw20Coin {
                    address: mediator.to_string(),
                    amount: Uint128::new(CUSTODY_BALANCE),
                },
            ],
            None,
        ),
        TokenType::MintBurn => (
            vec![],
            Some(MinterResponse {
                minter: mediator.to_string(),
                cap: None,
            }),
        ),
    };

    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &cw20_base::msg::InstantiateMsg {
            name: format!("Bridged {}", symbol),
            symbol: symbol.to_string(),
            decimals: 6,
            initial_balances,
            mint,
            marketing: None,
        },
        &[],
        symbol,
        None,
    )
    .unwrap()
}

pub fn initialize_msg(
    transport: &Addr,
    paired_mediator: &Addr,
    token: &Addr,
    config: &SideConfig,
) -> ExecuteMsg {
    ExecuteMsg::Initialize {
        transport: transport.to_string(),
        paired_mediator: paired_mediator.to_string(),
        token: token.to_string(),
        token_type: config.token_type.clone(),
        limits: config.limits.clone(),
        execution_limits: config.execution_limits.clone(),
        request_gas_limit: 2_000_000,
        decimal_shift: config.decimal_shift,
        owner: ADMIN.to_string(),
        reward_policy: config.reward_policy.clone(),
    }
}

fn initialize(app: &mut App, side: &Side, transport: &Addr, paired: &Addr, config: &SideConfig) {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        side.mediator.clone(),
        &initialize_msg(transport, paired, &side.token, config),
        &[],
    )
    .unwrap();

    if !config.server_fee.is_zero() {
        app.execute_contract(
            Addr::unchecked(ADMIN),
            side.mediator.clone(),
            &ExecuteMsg::ChangeServerFee {
                new_fee: config.server_fee,
            },
            &[],
        )
        .unwrap();
    }
}

/// A single initialized mediator paired with an address that has no code.
pub fn setup_single(config: SideConfig) -> (App, Side, Addr) {
    setup_single_with_token(config, contract_cw20())
}

/// `setup_single` with a custom token contract.
pub fn setup_single_with_token(
    config: SideConfig,
    token_contract: Box<dyn Contract<Empty>>,
) -> (App, Side, Addr) {
    let mut app = App::default();
    let (mediator_code, _, transport_code) = store_codes(&mut app);
    let cw20_code = app.store_code(token_contract);

    let transport = instantiate_transport(&mut app, transport_code);
    let mediator = instantiate_mediator(&mut app, mediator_code, "mediator");
    let token = instantiate_token(&mut app, cw20_code, &mediator, &config.token_type, "TKN");
    let side = Side { mediator, token };

    let paired = Addr::unchecked("terra1pairedmediator");
    initialize(&mut app, &side, &transport, &paired, &config);

    (app, side, transport)
}

/// Two mediators wired to each other through one mock transport.
pub fn setup_pair(home: SideConfig, foreign: SideConfig) -> (App, Side, Side, Addr) {
    let mut app = App::default();
    let (mediator_code, cw20_code, transport_code) = store_codes(&mut app);

    let transport = instantiate_transport(&mut app, transport_code);
    let home_mediator = instantiate_mediator(&mut app, mediator_code, "home-mediator");
    let foreign_mediator = instantiate_mediator(&mut app, mediator_code, "foreign-mediator");

    let home_token = instantiate_token(
        &mut app,
        cw20_code,
        &home_mediator,
        &home.token_type,
        "HOME",
    );
    let foreign_token = instantiate_token(
        &mut app,
        cw20_code,
        &foreign_mediator,
        &foreign.token_type,
        "FRGN",
    );

    let home_side = Side {
        mediator: home_mediator,
        token: home_token,
    };
    let foreign_side = Side {
        mediator: foreign_mediator,
        token: foreign_token,
    };
    initialize(
        &mut app,
        &home_side,
        &transport,
        &foreign_side.mediator,
        &home,
    );
    initialize(
        &mut app,
        &foreign_side,
        &transport,
        &home_side.mediator,
        &foreign,
    );

    (app, home_side, foreign_side, transport)
}

// ============================================================================
// Actions
// ============================================================================

/// Approve the mediator and relay `value` from `sender`.
pub fn relay(
    app: &mut App,
    side: &Side,
    sender: &str,
    receiver: &str,
    value: u128,
) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        side.token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: side.mediator.to_string(),
            amount: Uint128::new(value),
            expires: None,
        },
        &[],
    )?;
    app.execute_contract(
        Addr::unchecked(sender),
        side.mediator.clone(),
        &ExecuteMsg::RelayTokens {
            receiver: receiver.to_string(),
            value: Uint128::new(value),
        },
        &[],
    )
}

/// Call the mediator as its transport.
pub fn deliver_incoming(
    app: &mut App,
    side: &Side,
    transport: &Addr,
    recipient: &str,
    value: u128,
    message_id: [u8; 32],
) -> AnyResult<AppResponse> {
    app.execute_contract(
        transport.clone(),
        side.mediator.clone(),
        &ExecuteMsg::ExecuteIncomingInstruction {
            recipient: recipient.to_string(),
            value: Uint128::new(value),
            message_id: Binary::from(message_id.to_vec()),
        },
        &[],
    )
}

pub fn deliver_queued(app: &mut App, transport: &Addr, index: u64) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(USER),
        transport.clone(),
        &mock_transport::ExecuteMsg::Deliver { index },
        &[],
    )
}

// ============================================================================
// Queries
// ============================================================================

pub fn balance(app: &App, token: &Addr, account: &str) -> u128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &cw20::Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance.u128()
}

pub fn fee_state(app: &App, side: &Side) -> FeeStateResponse {
    app.wrap()
        .query_wasm_smart(&side.mediator, &QueryMsg::FeeState {})
        .unwrap()
}

pub fn guard_locked(app: &App, side: &Side) -> bool {
    let res: GuardResponse = app
        .wrap()
        .query_wasm_smart(&side.mediator, &QueryMsg::Guard {})
        .unwrap();
    res.locked
}

pub fn current_day(app: &App, side: &Side) -> u64 {
    app.wrap()
        .query_wasm_smart(&side.mediator, &QueryMsg::CurrentDay {})
        .unwrap()
}

pub fn spent_today(app: &App, side: &Side) -> u128 {
    let day = current_day(app, side);
    let spent: Uint128 = app
        .wrap()
        .query_wasm_smart(&side.mediator, &QueryMsg::TotalSpentPerDay { day })
        .unwrap();
    spent.u128()
}

pub fn passed_messages(app: &App, transport: &Addr) -> Vec<PassedMessage> {
    app.wrap()
        .query_wasm_smart(transport, &mock_transport::QueryMsg::Messages {})
        .unwrap()
}

/// The mediator instruction carried by a queued transport message.
pub fn instruction(message: &PassedMessage) -> (String, Uint128, Binary) {
    match from_json(&message.data).unwrap() {
        ExecuteMsg::ExecuteIncomingInstruction {
            recipient,
            value,
            message_id,
        } => (recipient, value, message_id),
        other => panic!("unexpected instruction {:?}", other),
    }
}

/// Value of attribute `key` on the custom event `ty` (without the `wasm-` prefix).
pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{}", ty);
    res.events
        .iter()
        .filter(|event| event.ty == ty)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}

pub fn message_id(seed: u8) -> [u8; 32] {
    [seed; 32]
}

pub fn binary_id(seed: u8) -> Binary {
    Binary::from(message_id(seed).to_vec())
}
