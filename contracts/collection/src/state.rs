use collection_types::{AirdropAllocation, CollectionConfig};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

#[cw_serde]
pub struct TokenInfo {
    pub owner: Addr,
    pub approved: Option<Addr>,
    // Position of the token in its owner's acquisition sequence
    pub seq: u64,
}

/// Ownership ledger.
///
/// Every owned token is indexed under `(owner, seq)` where `seq` comes from a
/// counter shared by all mints and transfers, so a prefix range over an owner
/// walks their tokens in acquisition order. The balance map is kept next to
/// that index and both change together in `mint` and `transfer`.
pub struct TokenLedger<'a> {
    tokens: Map<'a, u32, TokenInfo>,
    owned: Map<'a, (Addr, u64), u32>,
    balances: Map<'a, Addr, u32>,
    next_token_id: Item<'a, u32>,
    next_seq: Item<'a, u64>,
}

impl<'a> TokenLedger<'a> {
    pub const fn new(
        tokens_key: &'a str,
        owned_key: &'a str,
        balances_key: &'a str,
        next_token_id_key: &'a str,
        next_seq_key: &'a str,
    ) -> Self {
        TokenLedger {
            tokens: Map::new(tokens_key),
            owned: Map::new(owned_key),
            balances: Map::new(balances_key),
            next_token_id: Item::new(next_token_id_key),
            next_seq: Item::new(next_seq_key),
        }
    }

    pub fn total_supply(&self, store: &dyn Storage) -> StdResult<u32> {
        Ok(self.next_token_id.may_load(store)?.unwrap_or_default())
    }

    fn take_seq(&self, store: &mut dyn Storage) -> Result<u64, ContractError> {
        let seq = self.next_seq.may_load(store)?.unwrap_or_default();
        self.next_seq.save(
            store,
            &seq.checked_add(1).ok_or(ContractError::OverflowError {})?,
        )?;
        Ok(seq)
    }

    /// Assigns `quantity` fresh consecutive ids to `to` and returns them.
    pub fn mint(
        &self,
        store: &mut dyn Storage,
        to: &Addr,
        quantity: u32,
    ) -> Result<Vec<u32>, ContractError> {
        let first_id = self.total_supply(store)?;
        let end_id = first_id
            .checked_add(quantity)
            .ok_or(ContractError::OverflowError {})?;

        for token_id in first_id..end_id {
            let seq = self.take_seq(store)?;
            self.tokens.save(
                store,
                token_id,
                &TokenInfo {
                    owner: to.clone(),
                    approved: None,
                    seq,
                },
            )?;
            self.owned.save(store, (to.clone(), seq), &token_id)?;
        }
        self.balances
            .update(store, to.clone(), |balance| -> Result<_, ContractError> {
                balance
                    .unwrap_or_default()
                    .checked_add(quantity)
                    .ok_or(ContractError::OverflowError {})
            })?;
        self.next_token_id.save(store, &end_id)?;

        Ok((first_id..end_id).collect())
    }

    pub fn load(&self, store: &dyn Storage, token_id: u32) -> Result<TokenInfo, ContractError> {
        self.tokens
            .may_load(store, token_id)?
            .ok_or(ContractError::NonexistentToken { token_id })
    }

    pub fn set_approved(
        &self,
        store: &mut dyn Storage,
        token_id: u32,
        approved: Option<Addr>,
    ) -> Result<(), ContractError> {
        let mut token = self.load(store, token_id)?;
        token.approved = approved;
        self.tokens.save(store, token_id, &token)?;
        Ok(())
    }

    /// Moves `token_id` to `to`, clearing its approval and appending it to the
    /// end of `to`'s sequence.
    pub fn transfer(
        &self,
        store: &mut dyn Storage,
        token_id: u32,
        to: &Addr,
    ) -> Result<(), ContractError> {
        let token = self.load(store, token_id)?;
        let from = token.owner;

        self.owned.remove(store, (from.clone(), token.seq));
        self.balances
            .update(store, from, |balance| -> Result<_, ContractError> {
                balance
                    .unwrap_or_default()
                    .checked_sub(1)
                    .ok_or(ContractError::OverflowError {})
            })?;

        let seq = self.take_seq(store)?;
        self.owned.save(store, (to.clone(), seq), &token_id)?;
        self.balances
            .update(store, to.clone(), |balance| -> Result<_, ContractError> {
                balance
                    .unwrap_or_default()
                    .checked_add(1)
                    .ok_or(ContractError::OverflowError {})
            })?;
        self.tokens.save(
            store,
            token_id,
            &TokenInfo {
                owner: to.clone(),
                approved: None,
                seq,
            },
        )?;
        Ok(())
    }

    pub fn balance_of(&self, store: &dyn Storage, owner: &Addr) -> StdResult<u32> {
        Ok(self
            .balances
            .may_load(store, owner.clone())?
            .unwrap_or_default())
    }

    pub fn tokens_of(&self, store: &dyn Storage, owner: &Addr) -> StdResult<Vec<u32>> {
        self.owned
            .prefix(owner.clone())
            .range(store, None, None, Order::Ascending)
            .map(|item| item.map(|(_, token_id)| token_id))
            .collect()
    }
}

pub const CONFIG: Item<CollectionConfig> = Item::new("config");
pub const BASE_URI: Item<String> = Item::new("base_uri");
// Tokens minted through the sale contract
pub const SALE_MINTED: Item<u32> = Item::new("sale_minted");
pub const AIRDROP_MINTED: Item<u32> = Item::new("airdrop_minted");
pub const AIRDROP_OPEN: Item<bool> = Item::new("airdrop_open");
pub const AIRDROP_ALLOCATIONS: Map<Addr, AirdropAllocation> = Map::new("airdrop_allocations");
// (owner, operator)
pub const OPERATORS: Map<(Addr, Addr), bool> = Map::new("operators");

pub const LEDGER: TokenLedger =
    TokenLedger::new("tokens", "owned", "balances", "next_token_id", "next_seq");
