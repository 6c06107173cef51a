use cosmwasm_std::{StdError, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

pub const PAUSED_KEY: &str = "paused";

#[derive(Error, Debug, PartialEq)]
pub enum PauseError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Pausable: paused")]
    Paused {},

    #[error("Pausable: not paused")]
    NotPaused {},
}

/// Pause flag of a contract. Authorization is left to the caller: both drop
/// contracts only let their admin reach `pause` and `unpause`.
pub struct PauseState<'a> {
    pub paused: Item<'a, bool>,
}

impl<'a> PauseState<'a> {
    pub fn new() -> Result<Self, PauseError> {
        Ok(PauseState {
            paused: Item::new(PAUSED_KEY),
        })
    }

    /// Stores an explicit `false` so the flag exists from instantiation on.
    pub fn initialize(&self, storage: &mut dyn Storage) -> Result<(), PauseError> {
        self.paused.save(storage, &false)?;
        Ok(())
    }

    /// Errors if the contract is paused, does nothing otherwise.
    pub fn error_if_paused(&self, storage: &dyn Storage) -> Result<(), PauseError> {
        if self.is_paused(storage)? {
            Err(PauseError::Paused {})
        } else {
            Ok(())
        }
    }

    pub fn pause(&self, storage: &mut dyn Storage) -> Result<(), PauseError> {
        self.error_if_paused(storage)?;
        self.paused.save(storage, &true)?;
        Ok(())
    }

    pub fn unpause(&self, storage: &mut dyn Storage) -> Result<(), PauseError> {
        if !self.is_paused(storage)? {
            return Err(PauseError::NotPaused {});
        }
        self.paused.save(storage, &false)?;
        Ok(())
    }

    pub fn is_paused(&self, storage: &dyn Storage) -> Result<bool, PauseError> {
        Ok(self.paused.may_load(storage)?.unwrap_or(false))
    }
}
