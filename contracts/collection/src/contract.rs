#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
    StdResult, Storage, SubMsg, SubMsgResult,
};
use cw2::set_contract_version;
use cw721::Cw721ReceiveMsg;
use cw_utils::{nonpayable, parse_execute_response_data};

use collection_types::{
    CollectionConfig, ExecuteMsg, InstantiateMsg, QueryMsg, SupplyDetails, RECEIVE_NFT_ACK,
};
use pauser::PauseState;

use crate::airdrop::{
    execute_airdrop_claim, execute_update_airdrop_addresses, execute_update_airdrop_state,
    query_airdrop_allocation, query_airdrop_state,
};
use crate::error::ContractError;
use crate::state::{
    AIRDROP_MINTED, AIRDROP_OPEN, BASE_URI, CONFIG, LEDGER, OPERATORS, SALE_MINTED,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:drop-collection";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const RECEIVE_NFT_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    if msg.max_supply == 0 || msg.airdrop_supply > msg.max_supply {
        return Err(ContractError::InvalidSupply {});
    }
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };
    let minter = msg
        .minter
        .map(|minter| deps.api.addr_validate(&minter))
        .transpose()?;

    let config = CollectionConfig {
        admin: admin.clone(),
        minter,
        name: msg.name,
        symbol: msg.symbol,
        max_supply: msg.max_supply,
        airdrop_supply: msg.airdrop_supply,
    };
    CONFIG.save(deps.storage, &config)?;
    BASE_URI.save(deps.storage, &msg.base_uri.unwrap_or_default())?;
    SALE_MINTED.save(deps.storage, &0)?;
    AIRDROP_MINTED.save(deps.storage, &0)?;
    AIRDROP_OPEN.save(deps.storage, &false)?;

    let pause_state = PauseState::new()?;
    pause_state.initialize(deps.storage)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("max_supply", config.max_supply.to_string())
        .add_attribute("airdrop_supply", config.airdrop_supply.to_string());
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
        ExecuteMsg::Mint {
            recipient,
            quantity,
        } => execute_mint(deps, env, info, recipient, quantity),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, env, info, spender, token_id)
        }
        ExecuteMsg::SetApprovalForAll { operator, approved } => {
            execute_set_approval_for_all(deps, env, info, operator, approved)
        }
        ExecuteMsg::TransferFrom { from, to, token_id } => {
            execute_transfer_from(deps, env, info, from, to, token_id)
        }
        ExecuteMsg::SafeTransferFrom {
            from,
            to,
            token_id,
            data,
        } => execute_safe_transfer_from(deps, env, info, from, to, token_id, data),
        ExecuteMsg::SetBaseUri { base_uri } => execute_set_base_uri(deps, env, info, base_uri),
        ExecuteMsg::Pause {} => execute_pause(deps, env, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, env, info),
        ExecuteMsg::UpdateSaleContract { address } => {
            execute_update_sale_contract(deps, env, info, address)
        }
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, env, info, admin),
        ExecuteMsg::UpdateAirdropAddresses {
            addresses,
            quantities,
        } => execute_update_airdrop_addresses(deps, env, info, addresses, quantities),
        ExecuteMsg::UpdateAirdropState { open } => {
            execute_update_airdrop_state(deps, env, info, open)
        }
        ExecuteMsg::AirdropClaim {} => execute_airdrop_claim(deps, env, info),
    }
}

/// Single path by which tokens come into existence. Callers own the channel
/// counters and supply checks.
pub(crate) fn mint_tokens(
    storage: &mut dyn Storage,
    recipient: &Addr,
    quantity: u32,
) -> Result<Vec<Event>, ContractError> {
    let token_ids = LEDGER.mint(storage, recipient, quantity)?;
    let events = token_ids
        .into_iter()
        .map(|token_id| {
            Event::new("transfer")
                .add_attribute("to", recipient.as_str())
                .add_attribute("token_id", token_id.to_string())
        })
        .collect();
    Ok(events)
}

pub(crate) fn ensure_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.admin {
        return Err(ContractError::NotAuthorized {});
    }
    Ok(())
}

fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    quantity: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let pause_state = PauseState::new()?;
    pause_state.error_if_paused(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.minter.as_ref() != Some(&info.sender) {
        return Err(ContractError::NotAuthorized {});
    }
    if quantity == 0 {
        return Err(ContractError::MintZeroQuantity {});
    }
    if recipient.is_empty() {
        return Err(ContractError::ZeroAddressTarget {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let sale_minted = SALE_MINTED.load(deps.storage)?;
    let sale_minted = sale_minted
        .checked_add(quantity)
        .ok_or(ContractError::OverflowError {})?;
    if sale_minted > config.sale_supply() {
        return Err(ContractError::SupplyExhausted {});
    }
    SALE_MINTED.save(deps.storage, &sale_minted)?;

    let events = mint_tokens(deps.storage, &recipient, quantity)?;

    let res = Response::new()
        .add_events(events)
        .add_attribute("action", "mint")
        .add_attribute("recipient", recipient)
        .add_attribute("quantity", quantity.to_string());
    Ok(res)
}

fn execute_approve(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    spender: Option<String>,
    token_id: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let token = LEDGER.load(deps.storage, token_id)?;

    let is_operator = OPERATORS
        .may_load(deps.storage, (token.owner.clone(), info.sender.clone()))?
        .unwrap_or(false);
    if info.sender != token.owner && !is_operator {
        return Err(ContractError::NotOwnerOrApproved {});
    }
    // Empty spender clears the approval
    let spender = spender
        .filter(|spender| !spender.is_empty())
        .map(|spender| deps.api.addr_validate(&spender))
        .transpose()?;
    LEDGER.set_approved(deps.storage, token_id, spender.clone())?;

    let mut event = Event::new("approval")
        .add_attribute("owner", token.owner.as_str())
        .add_attribute("token_id", token_id.to_string());
    if let Some(spender) = &spender {
        event = event.add_attribute("spender", spender.as_str());
    }
    let res = Response::new()
        .add_event(event)
        .add_attribute("action", "approve")
        .add_attribute("token_id", token_id.to_string());
    Ok(res)
}

fn execute_set_approval_for_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
    approved: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let operator = deps.api.addr_validate(&operator)?;
    OPERATORS.save(
        deps.storage,
        (info.sender.clone(), operator.clone()),
        &approved,
    )?;

    let event = Event::new("approval_for_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator.as_str())
        .add_attribute("approved", approved.to_string());
    let res = Response::new()
        .add_event(event)
        .add_attribute("action", "set_approval_for_all");
    Ok(res)
}

/// Shared checks and effects of both transfer flavours. Returns the validated
/// recipient.
fn transfer_token(
    deps: DepsMut,
    sender: &Addr,
    from: &str,
    to: &str,
    token_id: u32,
) -> Result<(Addr, Event), ContractError> {
    let token = LEDGER.load(deps.storage, token_id)?;

    if token.owner.as_str() != from {
        return Err(ContractError::TransferFromIncorrectOwner {});
    }
    let is_operator = OPERATORS
        .may_load(deps.storage, (token.owner.clone(), sender.clone()))?
        .unwrap_or(false);
    if *sender != token.owner && token.approved.as_ref() != Some(sender) && !is_operator {
        return Err(ContractError::CallerNotOwnerNorApproved {});
    }
    if to.is_empty() {
        return Err(ContractError::TransferToZeroAddress {});
    }
    let to = deps.api.addr_validate(to)?;

    LEDGER.transfer(deps.storage, token_id, &to)?;

    let event = Event::new("transfer")
        .add_attribute("from", token.owner.as_str())
        .add_attribute("to", to.as_str())
        .add_attribute("token_id", token_id.to_string());
    Ok((to, event))
}

fn execute_transfer_from(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    from: String,
    to: String,
    token_id: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let (_, event) = transfer_token(deps, &info.sender, &from, &to, token_id)?;

    let res = Response::new()
        .add_event(event)
        .add_attribute("action", "transfer_from")
        .add_attribute("token_id", token_id.to_string());
    Ok(res)
}

fn execute_safe_transfer_from(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    from: String,
    to: String,
    token_id: u32,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let querier = deps.querier;
    let (to, event) = transfer_token(deps, &info.sender, &from, &to, token_id)?;

    let mut res = Response::new()
        .add_event(event)
        .add_attribute("action", "safe_transfer_from")
        .add_attribute("token_id", token_id.to_string());

    // Plain accounts take the token without a hook
    if querier.query_wasm_contract_info(to.as_str()).is_ok() {
        let receive_msg = Cw721ReceiveMsg {
            sender: info.sender.into_string(),
            token_id: token_id.to_string(),
            msg: data.unwrap_or_default(),
        };
        res = res.add_submessage(SubMsg::reply_always(
            receive_msg.into_cosmos_msg(to)?,
            RECEIVE_NFT_REPLY_ID,
        ));
    }
    Ok(res)
}

fn execute_set_base_uri(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    BASE_URI.save(deps.storage, &base_uri)?;

    let res = Response::new()
        .add_attribute("action", "set_base_uri")
        .add_attribute("base_uri", base_uri);
    Ok(res)
}

fn execute_pause(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    let pause_state = PauseState::new()?;
    pause_state.pause(deps.storage)?;
    let res = Response::new().add_attribute("action", "pause");
    Ok(res)
}

fn execute_unpause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    let pause_state = PauseState::new()?;
    pause_state.unpause(deps.storage)?;
    let res = Response::new().add_attribute("action", "unpause");
    Ok(res)
}

fn execute_update_sale_contract(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    let address = deps.api.addr_validate(&address)?;
    config.minter = Some(address.clone());
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_sale_contract")
        .add_attribute("address", address);
    Ok(res)
}

fn execute_update_admin(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    let new_admin = deps.api.addr_validate(&admin)?;
    config.admin = new_admin.clone();
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("new_admin", new_admin);
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        RECEIVE_NFT_REPLY_ID => {
            let acknowledged = match msg.result {
                SubMsgResult::Ok(res) => res.data.map_or(false, |data| is_receive_ack(&data)),
                SubMsgResult::Err(_) => false,
            };
            if !acknowledged {
                return Err(ContractError::TransferToNonReceiverImplementer {});
            }
            Ok(Response::new().add_attribute("action", "receive_nft_acknowledged"))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// Chains wrap execute data in MsgExecuteContractResponse, mocks may not.
fn is_receive_ack(data: &Binary) -> bool {
    match parse_execute_response_data(data.as_slice()) {
        Ok(parsed) if parsed.data.as_deref() == Some(RECEIVE_NFT_ACK) => true,
        _ => data.as_slice() == RECEIVE_NFT_ACK,
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps, env)?),
        QueryMsg::BalanceOf { owner } => to_json_binary(&query_balance_of(deps, env, owner)?),
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, env, token_id)?),
        QueryMsg::Approved { token_id } => to_json_binary(&query_approved(deps, env, token_id)?),
        QueryMsg::IsApprovedForAll { owner, operator } => {
            to_json_binary(&query_is_approved_for_all(deps, env, owner, operator)?)
        }
        QueryMsg::TokensOfOwner { owner } => {
            to_json_binary(&query_tokens_of_owner(deps, env, owner)?)
        }
        QueryMsg::TotalSupply {} => to_json_binary(&query_total_supply(deps, env)?),
        QueryMsg::Supply {} => to_json_binary(&query_supply(deps, env)?),
        QueryMsg::TokenUri { token_id } => {
            to_json_binary(&query_token_uri(deps, env, token_id)?)
        }
        QueryMsg::BaseUri {} => to_json_binary(&BASE_URI.load(deps.storage)?),
        QueryMsg::IsPaused {} => to_json_binary(&query_is_paused(deps, env)?),
        QueryMsg::AirdropAllocation { address } => {
            to_json_binary(&query_airdrop_allocation(deps, env, address)?)
        }
        QueryMsg::AirdropState {} => to_json_binary(&query_airdrop_state(deps, env)?),
    }
}

fn query_config(deps: Deps, _env: Env) -> Result<CollectionConfig, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_balance_of(deps: Deps, _env: Env, owner: String) -> Result<u32, ContractError> {
    if owner.is_empty() {
        return Err(ContractError::ZeroAddressQuery {});
    }
    let owner = deps.api.addr_validate(&owner)?;
    Ok(LEDGER.balance_of(deps.storage, &owner)?)
}

fn query_owner_of(deps: Deps, _env: Env, token_id: u32) -> Result<Addr, ContractError> {
    let token = LEDGER.load(deps.storage, token_id)?;
    Ok(token.owner)
}

fn query_approved(deps: Deps, _env: Env, token_id: u32) -> Result<Option<Addr>, ContractError> {
    let token = LEDGER.load(deps.storage, token_id)?;
    Ok(token.approved)
}

fn query_is_approved_for_all(
    deps: Deps,
    _env: Env,
    owner: String,
    operator: String,
) -> Result<bool, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    let approved = OPERATORS
        .may_load(deps.storage, (owner, operator))?
        .unwrap_or(false);
    Ok(approved)
}

fn query_tokens_of_owner(deps: Deps, _env: Env, owner: String) -> Result<Vec<u32>, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    Ok(LEDGER.tokens_of(deps.storage, &owner)?)
}

fn query_total_supply(deps: Deps, _env: Env) -> Result<u32, ContractError> {
    Ok(LEDGER.total_supply(deps.storage)?)
}

fn query_supply(deps: Deps, _env: Env) -> Result<SupplyDetails, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(SupplyDetails {
        total_supply: LEDGER.total_supply(deps.storage)?,
        sale_minted: SALE_MINTED.load(deps.storage)?,
        airdrop_minted: AIRDROP_MINTED.load(deps.storage)?,
        max_supply: config.max_supply,
        sale_supply: config.sale_supply(),
        airdrop_supply: config.airdrop_supply,
    })
}

fn query_token_uri(deps: Deps, _env: Env, token_id: u32) -> Result<String, ContractError> {
    LEDGER.load(deps.storage, token_id)?;
    let base_uri = BASE_URI.load(deps.storage)?;
    Ok(format!("{base_uri}{token_id}"))
}

fn query_is_paused(deps: Deps, _env: Env) -> Result<bool, ContractError> {
    let pause_state = PauseState::new()?;
    let is_paused = pause_state.is_paused(deps.storage)?;
    Ok(is_paused)
}
