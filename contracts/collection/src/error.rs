use cosmwasm_std::{OverflowError, StdError};
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

    #[error("Invalid supply")]
    InvalidSupply {},

    #[error("Mint quantity cannot be zero")]
    MintZeroQuantity {},

    #[error("Mint to the zero address")]
    ZeroAddressTarget {},

    #[error("Balance query for the zero address")]
    ZeroAddressQuery {},

    #[error("Nonexistent token: {token_id}")]
    NonexistentToken { token_id: u32 },

    #[error("Approve caller is not owner nor approved for all")]
    NotOwnerOrApproved {},

    #[error("Transfer caller is not owner nor approved")]
    CallerNotOwnerNorApproved {},

    #[error("Transfer from incorrect owner")]
    TransferFromIncorrectOwner {},

    #[error("Transfer to the zero address")]
    TransferToZeroAddress {},

    #[error("Transfer to non receiver implementer")]
    TransferToNonReceiverImplementer {},

    #[error("mint: Sale completed")]
    SupplyExhausted {},

    #[error("update: Incorrect configuration")]
    MismatchedArrayLengths {},

    #[error("claim: Disabled")]
    ClaimingDisabled {},

    #[error("claim: User cannot claim")]
    NotEligible {},

    #[error("claim: All minted")]
    AirdropSupplyExhausted {},

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

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
