use cosmwasm_std::{Addr, Uint128};

use crate::error::ContractError;
use crate::msg::PhaseDetails;

pub trait PhaseMethods {
    fn is_active(&self, height: u64) -> bool;
    fn end_block(&self) -> u64;
    fn total_price(&self, quantity: u32) -> Result<Uint128, ContractError>;
    fn is_member(&self, address: &Addr, proof: &[String]) -> bool;
}

impl PhaseMethods for PhaseDetails {
    fn is_active(&self, height: u64) -> bool {
        height >= self.start_block && height < self.end_block()
    }

    fn end_block(&self) -> u64 {
        self.start_block.saturating_add(self.duration)
    }

    fn total_price(&self, quantity: u32) -> Result<Uint128, ContractError> {
        Ok(self
            .mint_price
            .amount
            .checked_mul(Uint128::from(quantity))?)
    }

    // No root admits nobody, a malformed proof proves nothing
    fn is_member(&self, address: &Addr, proof: &[String]) -> bool {
        match &self.merkle_root {
            Some(root) => merkle_proof::verify_hex(root, address.as_str(), proof).unwrap_or(false),
            None => false,
        }
    }
}
