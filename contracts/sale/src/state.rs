use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::msg::{Phase, PhaseDetails};
use crate::phase::PhaseMethods;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub collection: Addr,
    pub mint_denom: String,
    pub per_user_quota: u32,
    // Ceiling over all three phases
    pub max_supply: u32,
}

#[cw_serde]
#[derive(Default)]
pub struct MintDetails {
    pub total_minted: u32,
    pub phases: Vec<(Phase, u32)>,
}

impl MintDetails {
    pub fn minted_in(&self, phase: Phase) -> u32 {
        self.phases
            .iter()
            .find(|(found, _)| *found == phase)
            .map(|(_, count)| *count)
            .unwrap_or_default()
    }

    /// Adds to both counters. Limits are checked by the caller beforehand.
    pub fn record(&mut self, phase: Phase, quantity: u32) -> StdResult<()> {
        self.total_minted = self.total_minted.checked_add(quantity).ok_or_else(|| {
            StdError::generic_err("Total minted overflow")
        })?;
        match self.phases.iter_mut().find(|(found, _)| *found == phase) {
            Some((_, count)) => *count += quantity,
            None => self.phases.push((phase, quantity)),
        }
        Ok(())
    }
}

pub struct UserMintDetails<'a>(Map<'a, Addr, MintDetails>);
impl<'a> UserMintDetails<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        UserMintDetails(Map::new(storage_key))
    }

    pub fn load(&self, store: &dyn Storage, user: &Addr) -> StdResult<MintDetails> {
        Ok(self.0.may_load(store, user.clone())?.unwrap_or_default())
    }

    pub fn save(&self, store: &mut dyn Storage, user: &Addr, details: &MintDetails) -> StdResult<()> {
        self.0.save(store, user.clone(), details)
    }
}

pub struct Phases<'a>(Map<'a, u8, PhaseDetails>);
impl<'a> Phases<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        Phases(Map::new(storage_key))
    }

    pub fn save(&self, store: &mut dyn Storage, phase: Phase, details: &PhaseDetails) -> StdResult<()> {
        self.0.save(store, phase.key(), details)
    }

    pub fn load(&self, store: &dyn Storage, phase: Phase) -> StdResult<PhaseDetails> {
        self.0
            .may_load(store, phase.key())?
            .ok_or_else(|| StdError::generic_err(format!("Phase {phase} not found")))
    }

    pub fn load_all(&self, store: &dyn Storage) -> StdResult<Vec<(Phase, PhaseDetails)>> {
        Phase::ALL
            .into_iter()
            .map(|phase| self.load(store, phase).map(|details| (phase, details)))
            .collect()
    }

    /// First phase whose window contains `height`. Windows may overlap when
    /// the admin configures them that way.
    pub fn load_active_phase(&self, store: &dyn Storage, height: u64) -> StdResult<Option<Phase>> {
        Ok(self
            .load_all(store)?
            .into_iter()
            .find(|(_, details)| details.is_active(height))
            .map(|(phase, _)| phase))
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PHASES_KEY: &str = "phases";
pub const USER_MINT_DETAILS_KEY: &str = "user_mint_details";
pub const PHASE_MINTED: Map<u8, u32> = Map::new("phase_minted");
pub const TOTAL_MINTED: Item<u32> = Item::new("total_minted");
