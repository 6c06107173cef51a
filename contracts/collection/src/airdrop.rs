use collection_types::AirdropAllocation;
use cosmwasm_std::{Deps, DepsMut, Env, MessageInfo, Response};
use cw_utils::nonpayable;
use pauser::PauseState;

use crate::contract::{ensure_admin, mint_tokens};
use crate::error::ContractError;
use crate::state::{AIRDROP_ALLOCATIONS, AIRDROP_MINTED, AIRDROP_OPEN, CONFIG};

pub fn execute_update_airdrop_addresses(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    addresses: Vec<String>,
    quantities: Vec<u32>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    if addresses.len() != quantities.len() {
        return Err(ContractError::MismatchedArrayLengths {});
    }

    for (address, quantity) in addresses.iter().zip(quantities) {
        if address.is_empty() {
            return Err(ContractError::ZeroAddressTarget {});
        }
        let address = deps.api.addr_validate(address)?;
        // Overwrite also re-opens a consumed allotment
        AIRDROP_ALLOCATIONS.save(
            deps.storage,
            address,
            &AirdropAllocation {
                quantity,
                claimed: false,
            },
        )?;
    }

    let res = Response::new()
        .add_attribute("action", "update_airdrop_addresses")
        .add_attribute("count", addresses.len().to_string());
    Ok(res)
}

pub fn execute_update_airdrop_state(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    open: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ensure_admin(deps.storage, &info.sender)?;
    AIRDROP_OPEN.save(deps.storage, &open)?;

    let res = Response::new()
        .add_attribute("action", "update_airdrop_state")
        .add_attribute("open", open.to_string());
    Ok(res)
}

pub fn execute_airdrop_claim(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let pause_state = PauseState::new()?;
    pause_state.error_if_paused(deps.storage)?;

    if !AIRDROP_OPEN.load(deps.storage)? {
        return Err(ContractError::ClaimingDisabled {});
    }
    let mut allocation = match AIRDROP_ALLOCATIONS.may_load(deps.storage, info.sender.clone())? {
        Some(allocation) if allocation.quantity > 0 && !allocation.claimed => allocation,
        _ => return Err(ContractError::NotEligible {}),
    };

    let config = CONFIG.load(deps.storage)?;
    let airdrop_minted = AIRDROP_MINTED
        .load(deps.storage)?
        .checked_add(allocation.quantity)
        .ok_or(ContractError::OverflowError {})?;
    if airdrop_minted > config.airdrop_supply {
        return Err(ContractError::AirdropSupplyExhausted {});
    }

    allocation.claimed = true;
    AIRDROP_ALLOCATIONS.save(deps.storage, info.sender.clone(), &allocation)?;
    AIRDROP_MINTED.save(deps.storage, &airdrop_minted)?;

    let events = mint_tokens(deps.storage, &info.sender, allocation.quantity)?;

    let res = Response::new()
        .add_events(events)
        .add_attribute("action", "airdrop_claim")
        .add_attribute("recipient", info.sender)
        .add_attribute("quantity", allocation.quantity.to_string());
    Ok(res)
}

pub fn query_airdrop_allocation(
    deps: Deps,
    _env: Env,
    address: String,
) -> Result<Option<AirdropAllocation>, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    Ok(AIRDROP_ALLOCATIONS.may_load(deps.storage, address)?)
}

pub fn query_airdrop_state(deps: Deps, _env: Env) -> Result<bool, ContractError> {
    Ok(AIRDROP_OPEN.load(deps.storage)?)
}
