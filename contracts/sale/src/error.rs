use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use pauser::PauseError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Pause(#[from] PauseError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    NotAuthorized {},

    #[error("Invalid quantity")]
    InvalidQuantity {},

    #[error("Sale not open")]
    SaleNotOpen {},

    #[error("Not whitelisted")]
    NotWhitelisted {},

    #[error("Invalid payment amount")]
    InvalidPayment { expected: Uint128, sent: Uint128 },

    #[error("Minting limit")]
    MintingLimitExceeded {},

    #[error("All tokens minted")]
    PhaseSupplyExceeded {},

    #[error("Sale completed")]
    SaleCompleted {},

    #[error("Invalid merkle root: {root}")]
    InvalidMerkleRoot { root: String },

    #[error("Overflow error")]
    OverflowError {},
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}

impl From<OverflowError> for ContractError {
    fn from(_err: OverflowError) -> Self {
        ContractError::OverflowError {}
    }
}
