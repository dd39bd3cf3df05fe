//! Message types for the token handler contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::registry::AssetKind;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// The bridge contract; the only caller of deposit/execute/withdraw/fund-in
    pub bridge: String,
    /// Registry administrator (defaults to `bridge`)
    pub admin: Option<String>,
    /// Bech32 prefix for recipient accounts (defaults to "terra")
    pub address_prefix: Option<String>,
    /// Resource ids to register, each exactly 32 bytes
    pub initial_resource_ids: Vec<Binary>,
    /// CW20 contracts, index-aligned with `initial_resource_ids`
    pub initial_asset_addresses: Vec<String>,
    /// Subset of `initial_asset_addresses` that use burn/mint
    pub burnable_assets: Vec<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Bridge Entry Points
    // ========================================================================
    /// Take custody of (or burn) a deposit and record it.
    ///
    /// Authorization: bridge only
    ///
    /// `data` is `amount (32)` or `amount (32) | len (32) | recipient (len)`.
    Deposit {
        resource_id: Binary,
        destination_chain_id: u64,
        deposit_nonce: u64,
        depositor: String,
        data: Binary,
    },

    /// Release (or mint) an incoming transfer.
    ///
    /// Authorization: bridge only
    ///
    /// `data` is `amount (32) | len (32) | recipient (len)`; the first 20
    /// bytes of the recipient are the local account.
    ExecuteTransfer { resource_id: Binary, data: Binary },

    /// Same as `ExecuteTransfer`, with the resource id repeated in front of
    /// the payload: `resource_id (32) | amount (32) | len (32) | recipient`.
    ExecuteProposal { resource_id: Binary, data: Binary },

    /// Release custodied tokens without resource routing.
    ///
    /// Authorization: bridge only
    Withdraw {
        asset: String,
        recipient: String,
        amount: Uint128,
    },

    /// Pull tokens from `from` into custody (requires an allowance).
    ///
    /// Authorization: bridge only
    FundIn {
        asset: String,
        from: String,
        amount: Uint128,
    },

    // ========================================================================
    // Registry Administration
    // ========================================================================
    /// Bind a resource id to a CW20 contract and whitelist it.
    ///
    /// Authorization: admin only
    SetResource { resource_id: Binary, asset: String },

    /// Switch a registered asset to burn/mint. Cannot be undone.
    ///
    /// Authorization: admin only
    SetBurnable { asset: String },

    /// Enable or disable bridging for a registered asset.
    ///
    /// Authorization: admin only
    SetWhitelisted { asset: String, enabled: bool },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Returns a zeroed record when nothing is stored under the key
    #[returns(DepositRecordResponse)]
    DepositRecord {
        destination_chain_id: u64,
        deposit_nonce: u64,
    },

    #[returns(ResolveResponse)]
    Resolve { resource_id: Binary },

    #[returns(AssetResponse)]
    Asset { asset: String },

    /// Resource bindings in resource id order
    #[returns(ResourcesResponse)]
    Resources {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(LockedBalanceResponse)]
    LockedBalance { asset: String },

    #[returns(BurnedBalanceResponse)]
    BurnedBalance { asset: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub bridge: Addr,
    pub admin: Addr,
    pub address_prefix: String,
}

/// Deposit audit entry. Every field is empty/zero when no record exists.
#[cw_serde]
#[derive(Default)]
pub struct DepositRecordResponse {
    pub asset: String,
    pub destination_chain_id: u64,
    pub resource_id: Binary,
    pub recipient_address_length: u64,
    pub recipient_address: Binary,
    pub depositor: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ResolveResponse {
    pub resource_id: Binary,
    /// `None` when the id is not registered
    pub asset: Option<Addr>,
    pub whitelisted: bool,
    pub kind: Option<AssetKind>,
}

#[cw_serde]
pub struct AssetResponse {
    pub asset: Addr,
    pub registered: bool,
    pub resource_id: Option<Binary>,
    pub whitelisted: bool,
    pub kind: Option<AssetKind>,
}

#[cw_serde]
pub struct ResourceEntry {
    pub resource_id: Binary,
    pub asset: Addr,
}

#[cw_serde]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceEntry>,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub asset: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct BurnedBalanceResponse {
    pub asset: String,
    pub amount: Uint128,
}
