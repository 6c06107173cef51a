use std::fmt;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128};

use crate::state::{Config, MintDetails};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum Phase {
    Whitelist,
    Waitlist,
    Public,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Whitelist, Phase::Waitlist, Phase::Public];

    pub fn key(&self) -> u8 {
        match self {
            Phase::Whitelist => 1,
            Phase::Waitlist => 2,
            Phase::Public => 3,
        }
    }

    /// Whether minting in this phase requires an allowlist proof.
    pub fn is_gated(&self) -> bool {
        !matches!(self, Phase::Public)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Whitelist => write!(f, "whitelist"),
            Phase::Waitlist => write!(f, "waitlist"),
            Phase::Public => write!(f, "public"),
        }
    }
}

#[cw_serde]
pub struct PhaseDetails {
    pub start_block: u64,
    // Window is [start_block, start_block + duration)
    pub duration: u64,
    pub mint_price: Coin,
    pub supply: u32,
    // Hex encoded, gated phases only
    pub merkle_root: Option<String>,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: Option<String>,
    pub collection: String,
    pub mint_denom: String,
    pub per_user_quota: Option<u32>,
    // Defaults to the collection's supply minus its airdrop reserve
    pub max_supply: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    MintWhitelisted {
        quantity: u32,
        proof: Vec<String>,
    },
    MintWaitlist {
        quantity: u32,
        proof: Vec<String>,
    },
    MintPublicSale {
        quantity: u32,
    },
    UpdateSaleTime {
        whitelist_start: u64,
        waitlist_start: u64,
        public_start: u64,
        whitelist_duration: u64,
        waitlist_duration: u64,
        public_duration: u64,
    },
    UpdateSalePrice {
        whitelist_price: Uint128,
        waitlist_price: Uint128,
        public_price: Uint128,
    },
    UpdateSaleSupply {
        whitelist_supply: u32,
        waitlist_supply: u32,
        public_supply: u32,
        per_user_quota: u32,
        max_supply: u32,
    },
    UpdateMerkleProofRoot {
        whitelist_root: String,
        waitlist_root: String,
    },
    Withdraw {},
    Pause {},
    Unpause {},
    UpdateAdmin {
        admin: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(PhaseDetails)]
    Phase { phase: Phase },
    #[returns(Vec<(Phase, PhaseDetails)>)]
    Phases {},
    #[returns(Option<Phase>)]
    ActivePhase {},
    #[returns(u32)]
    UserMinted { address: String },
    #[returns(MintDetails)]
    UserMintDetails { address: String },
    #[returns(u32)]
    TotalMinted {},
    #[returns(u32)]
    PhaseMinted { phase: Phase },
    #[returns(bool)]
    IsPaused {},
}
