#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coin, to_json_binary, wasm_execute, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo,
    Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{may_pay, nonpayable};

use collection_types::{query_collection_config, ExecuteMsg as CollectionExecuteMsg};
use merkle_proof::decode_hash;
use pauser::PauseState;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, Phase, PhaseDetails, QueryMsg};
use crate::phase::PhaseMethods;
use crate::state::{
    Config, MintDetails, Phases, UserMintDetails, CONFIG, PHASES_KEY, PHASE_MINTED, TOTAL_MINTED,
    USER_MINT_DETAILS_KEY,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:drop-sale";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PER_USER_QUOTA: u32 = 5;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };
    let collection = deps.api.addr_validate(&msg.collection)?;
    let max_supply = match msg.max_supply {
        Some(max_supply) => max_supply,
        None => query_collection_config(&collection, deps.as_ref())?.sale_supply(),
    };

    let config = Config {
        admin: admin.clone(),
        collection: collection.clone(),
        mint_denom: msg.mint_denom,
        per_user_quota: msg.per_user_quota.unwrap_or(DEFAULT_PER_USER_QUOTA),
        max_supply,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_MINTED.save(deps.storage, &0)?;

    // Every phase starts closed
    let phases = Phases::new(PHASES_KEY);
    for phase in Phase::ALL {
        phases.save(
            deps.storage,
            phase,
            &PhaseDetails {
                start_block: 0,
                duration: 0,
                mint_price: coin(0, &config.mint_denom),
                supply: 0,
                merkle_root: None,
            },
        )?;
        PHASE_MINTED.save(deps.storage, phase.key(), &0)?;
    }

    let pause_state = PauseState::new()?;
    pause_state.initialize(deps.storage)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("collection", collection)
        .add_attribute("max_supply", max_supply.to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::MintWhitelisted { quantity, proof } => {
            execute_mint(deps, env, info, Phase::Whitelist, quantity, proof)
        }
        ExecuteMsg::MintWaitlist { quantity, proof } => {
            execute_mint(deps, env, info, Phase::Waitlist, quantity, proof)
        }
        ExecuteMsg::MintPublicSale { quantity } => {
            execute_mint(deps, env, info, Phase::Public, quantity, vec![])
        }
        ExecuteMsg::UpdateSaleTime {
            whitelist_start,
            waitlist_start,
            public_start,
            whitelist_duration,
            waitlist_duration,
            public_duration,
        } => execute_update_sale_time(
            deps,
            env,
            info,
            [
                (whitelist_start, whitelist_duration),
                (waitlist_start, waitlist_duration),
                (public_start, public_duration),
            ],
        ),
        ExecuteMsg::UpdateSalePrice {
            whitelist_price,
            waitlist_price,
            public_price,
        } => execute_update_sale_price(
            deps,
            env,
            info,
            [whitelist_price, waitlist_price, public_price],
        ),
        ExecuteMsg::UpdateSaleSupply {
            whitelist_supply,
            waitlist_supply,
            public_supply,
            per_user_quota,
            max_supply,
        } => execute_update_sale_supply(
            deps,
            env,
            info,
            [whitelist_supply, waitlist_supply, public_supply],
            per_user_quota,
            max_supply,
        ),
        ExecuteMsg::UpdateMerkleProofRoot {
            whitelist_root,
            waitlist_root,
        } => execute_update_merkle_proof_root(deps, env, info, whitelist_root, waitlist_root),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
        ExecuteMsg::Pause {} => execute_pause(deps, env, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, env, info),
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, env, info, admin),
    }
}

/// Shared purchase routine of the three phases. Every check runs before any
/// counter is written.
pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    phase: Phase,
    quantity: u32,
    proof: Vec<String>,
) -> Result<Response, ContractError> {
    let pause_state = PauseState::new()?;
    pause_state.error_if_paused(deps.storage)?;

    if quantity == 0 {
        return Err(ContractError::InvalidQuantity {});
    }
    let config = CONFIG.load(deps.storage)?;
    let phases = Phases::new(PHASES_KEY);
    let details = phases.load(deps.storage, phase)?;

    if !details.is_active(env.block.height) {
        return Err(ContractError::SaleNotOpen {});
    }
    if phase.is_gated() && !details.is_member(&info.sender, &proof) {
        return Err(ContractError::NotWhitelisted {});
    }

    // Exact amount must be paid
    let expected = details.total_price(quantity)?;
    let sent = may_pay(&info, &details.mint_price.denom)?;
    if sent != expected {
        return Err(ContractError::InvalidPayment { expected, sent });
    }

    let user_mint_details = UserMintDetails::new(USER_MINT_DETAILS_KEY);
    let mut user_details = user_mint_details.load(deps.storage, &info.sender)?;
    if exceeds(user_details.total_minted, quantity, config.per_user_quota) {
        return Err(ContractError::MintingLimitExceeded {});
    }
    let phase_minted = PHASE_MINTED
        .may_load(deps.storage, phase.key())?
        .unwrap_or_default();
    // A cap lowered below the minted count blocks the phase
    if exceeds(phase_minted, quantity, details.supply) {
        return Err(ContractError::PhaseSupplyExceeded {});
    }
    let total_minted = TOTAL_MINTED.load(deps.storage)?;
    if exceeds(total_minted, quantity, config.max_supply) {
        return Err(ContractError::SaleCompleted {});
    }

    user_details.record(phase, quantity)?;
    user_mint_details.save(deps.storage, &info.sender, &user_details)?;
    PHASE_MINTED.save(deps.storage, phase.key(), &(phase_minted + quantity))?;
    TOTAL_MINTED.save(deps.storage, &(total_minted + quantity))?;

    // Payment stays here until withdrawn
    let mint_msg = wasm_execute(
        config.collection,
        &CollectionExecuteMsg::Mint {
            recipient: info.sender.to_string(),
            quantity,
        },
        vec![],
    )?;

    let res = Response::new()
        .add_message(mint_msg)
        .add_attribute("action", format!("mint_{phase}"))
        .add_attribute("phase", phase.to_string())
        .add_attribute("minter", info.sender)
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("paid", sent.to_string());
    Ok(res)
}

fn exceeds(minted: u32, quantity: u32, limit: u32) -> bool {
    minted.checked_add(quantity).map_or(true, |total| total > limit)
}

fn ensure_admin(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::NotAuthorized {});
    }
    Ok(config)
}

pub fn execute_update_sale_time(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    windows: [(u64, u64); 3],
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.as_ref(), &info)?;

    let phases = Phases::new(PHASES_KEY);
    for (phase, (start_block, duration)) in Phase::ALL.into_iter().zip(windows) {
        let mut details = phases.load(deps.storage, phase)?;
        details.start_block = start_block;
        details.duration = duration;
        phases.save(deps.storage, phase, &details)?;
    }

    let res = Response::new()
        .add_attribute("action", "update_sale_time")
        .add_attribute("whitelist_start", windows[0].0.to_string())
        .add_attribute("waitlist_start", windows[1].0.to_string())
        .add_attribute("public_start", windows[2].0.to_string());
    Ok(res)
}

pub fn execute_update_sale_price(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    prices: [Uint128; 3],
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = ensure_admin(deps.as_ref(), &info)?;

    let phases = Phases::new(PHASES_KEY);
    for (phase, price) in Phase::ALL.into_iter().zip(prices) {
        let mut details = phases.load(deps.storage, phase)?;
        details.mint_price = coin(price.u128(), &config.mint_denom);
        phases.save(deps.storage, phase, &details)?;
    }

    let res = Response::new()
        .add_attribute("action", "update_sale_price")
        .add_attribute("whitelist_price", prices[0].to_string())
        .add_attribute("waitlist_price", prices[1].to_string())
        .add_attribute("public_price", prices[2].to_string())
        .add_attribute("denom", config.mint_denom);
    Ok(res)
}

pub fn execute_update_sale_supply(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    supplies: [u32; 3],
    per_user_quota: u32,
    max_supply: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = ensure_admin(deps.as_ref(), &info)?;

    let phases = Phases::new(PHASES_KEY);
    for (phase, supply) in Phase::ALL.into_iter().zip(supplies) {
        let mut details = phases.load(deps.storage, phase)?;
        details.supply = supply;
        phases.save(deps.storage, phase, &details)?;
    }
    config.per_user_quota = per_user_quota;
    config.max_supply = max_supply;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_sale_supply")
        .add_attribute("per_user_quota", per_user_quota.to_string())
        .add_attribute("max_supply", max_supply.to_string());
    Ok(res)
}

pub fn execute_update_merkle_proof_root(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    whitelist_root: String,
    waitlist_root: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.as_ref(), &info)?;

    let phases = Phases::new(PHASES_KEY);
    for (phase, root) in [
        (Phase::Whitelist, &whitelist_root),
        (Phase::Waitlist, &waitlist_root),
    ] {
        decode_hash(root).map_err(|_| ContractError::InvalidMerkleRoot { root: root.clone() })?;
        let mut details = phases.load(deps.storage, phase)?;
        details.merkle_root = Some(root.to_lowercase());
        phases.save(deps.storage, phase, &details)?;
    }

    let res = Response::new()
        .add_attribute("action", "update_merkle_proof_root")
        .add_attribute("whitelist_root", whitelist_root)
        .add_attribute("waitlist_root", waitlist_root);
    Ok(res)
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = ensure_admin(deps.as_ref(), &info)?;

    let balance = deps.querier.query_all_balances(env.contract.address)?;
    let mut res = Response::new()
        .add_attribute("action", "withdraw")
        .add_attribute("recipient", config.admin.as_str());
    if !balance.is_empty() {
        let amount = balance
            .iter()
            .map(|coin| coin.to_string())
            .collect::<Vec<_>>()
            .join(",");
        res = res
            .add_message(BankMsg::Send {
                to_address: config.admin.into_string(),
                amount: balance,
            })
            .add_attribute("amount", amount);
    }
    Ok(res)
}

pub fn execute_pause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.as_ref(), &info)?;
    let pause_state = PauseState::new()?;
    pause_state.pause(deps.storage)?;
    let res = Response::new().add_attribute("action", "pause");
    Ok(res)
}

pub fn execute_unpause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.as_ref(), &info)?;
    let pause_state = PauseState::new()?;
    pause_state.unpause(deps.storage)?;
    let res = Response::new().add_attribute("action", "unpause");
    Ok(res)
}

pub fn execute_update_admin(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = ensure_admin(deps.as_ref(), &info)?;
    let new_admin = deps.api.addr_validate(&admin)?;
    config.admin = new_admin.clone();
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("new_admin", new_admin);
    Ok(res)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Phase { phase } => to_json_binary(&query_phase(deps, env, phase)?),
        QueryMsg::Phases {} => to_json_binary(&query_phases(deps, env)?),
        QueryMsg::ActivePhase {} => to_json_binary(&query_active_phase(deps, env)?),
        QueryMsg::UserMinted { address } => {
            to_json_binary(&query_user_mint_details(deps, env, address)?.total_minted)
        }
        QueryMsg::UserMintDetails { address } => {
            to_json_binary(&query_user_mint_details(deps, env, address)?)
        }
        QueryMsg::TotalMinted {} => to_json_binary(&TOTAL_MINTED.load(deps.storage)?),
        QueryMsg::PhaseMinted { phase } => to_json_binary(&query_phase_minted(deps, env, phase)?),
        QueryMsg::IsPaused {} => to_json_binary(&query_is_paused(deps, env)?),
    }
}

fn query_phase(deps: Deps, _env: Env, phase: Phase) -> Result<PhaseDetails, ContractError> {
    let phases = Phases::new(PHASES_KEY);
    Ok(phases.load(deps.storage, phase)?)
}

fn query_phases(deps: Deps, _env: Env) -> Result<Vec<(Phase, PhaseDetails)>, ContractError> {
    let phases = Phases::new(PHASES_KEY);
    Ok(phases.load_all(deps.storage)?)
}

fn query_active_phase(deps: Deps, env: Env) -> Result<Option<Phase>, ContractError> {
    let phases = Phases::new(PHASES_KEY);
    Ok(phases.load_active_phase(deps.storage, env.block.height)?)
}

fn query_user_mint_details(
    deps: Deps,
    _env: Env,
    address: String,
) -> Result<MintDetails, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    let user_mint_details = UserMintDetails::new(USER_MINT_DETAILS_KEY);
    Ok(user_mint_details.load(deps.storage, &address)?)
}

fn query_phase_minted(deps: Deps, _env: Env, phase: Phase) -> Result<u32, ContractError> {
    Ok(PHASE_MINTED
        .may_load(deps.storage, phase.key())?
        .unwrap_or_default())
}

fn query_is_paused(deps: Deps, _env: Env) -> Result<bool, ContractError> {
    let pause_state = PauseState::new()?;
    let is_paused = pause_state.is_paused(deps.storage)?;
    Ok(is_paused)
}
