use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Deps, StdError};
use cw721::Cw721ReceiveMsg;

/// Response data a contract must return from `ReceiveNft` to accept a safe
/// transfer.
pub const RECEIVE_NFT_ACK: &[u8] = b"cw721_received";

/// Execute message a safe transfer sends to a recipient contract.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    ReceiveNft(Cw721ReceiveMsg),
}

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    // Hard ceiling over sale and airdrop together
    pub max_supply: u32,
    // Slice of max_supply reserved for airdrop claims
    pub airdrop_supply: u32,
    pub base_uri: Option<String>,
    pub admin: Option<String>,
    // Sale contract allowed to call Mint
    pub minter: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        recipient: String,
        quantity: u32,
    },
    // None clears the current approval
    Approve {
        spender: Option<String>,
        token_id: u32,
    },
    SetApprovalForAll {
        operator: String,
        approved: bool,
    },
    TransferFrom {
        from: String,
        to: String,
        token_id: u32,
    },
    SafeTransferFrom {
        from: String,
        to: String,
        token_id: u32,
        data: Option<Binary>,
    },
    SetBaseUri {
        base_uri: String,
    },
    Pause {},
    Unpause {},
    UpdateSaleContract {
        address: String,
    },
    UpdateAdmin {
        admin: String,
    },
    UpdateAirdropAddresses {
        addresses: Vec<String>,
        quantities: Vec<u32>,
    },
    UpdateAirdropState {
        open: bool,
    },
    AirdropClaim {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CollectionConfig)]
    Config {},
    #[returns(u32)]
    BalanceOf { owner: String },
    #[returns(Addr)]
    OwnerOf { token_id: u32 },
    #[returns(Option<Addr>)]
    Approved { token_id: u32 },
    #[returns(bool)]
    IsApprovedForAll { owner: String, operator: String },
    #[returns(Vec<u32>)]
    TokensOfOwner { owner: String },
    #[returns(u32)]
    TotalSupply {},
    #[returns(SupplyDetails)]
    Supply {},
    #[returns(String)]
    TokenUri { token_id: u32 },
    #[returns(String)]
    BaseUri {},
    #[returns(bool)]
    IsPaused {},
    #[returns(Option<AirdropAllocation>)]
    AirdropAllocation { address: String },
    #[returns(bool)]
    AirdropState {},
}

#[cw_serde]
pub struct CollectionConfig {
    pub admin: Addr,
    pub minter: Option<Addr>,
    pub name: String,
    pub symbol: String,
    pub max_supply: u32,
    pub airdrop_supply: u32,
}

impl CollectionConfig {
    /// Part of the supply that the sale contract may mint.
    pub fn sale_supply(&self) -> u32 {
        self.max_supply.saturating_sub(self.airdrop_supply)
    }
}

#[cw_serde]
pub struct SupplyDetails {
    pub total_supply: u32,
    pub sale_minted: u32,
    pub airdrop_minted: u32,
    pub max_supply: u32,
    pub sale_supply: u32,
    pub airdrop_supply: u32,
}

#[cw_serde]
pub struct AirdropAllocation {
    pub quantity: u32,
    pub claimed: bool,
}

pub fn query_collection_config(
    collection: &Addr,
    deps: Deps,
) -> Result<CollectionConfig, StdError> {
    deps.querier
        .query_wasm_smart(collection, &QueryMsg::Config {})
}
