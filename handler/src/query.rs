//! Query handlers for the token handler contract.

use common::ResourceId;
use cosmwasm_std::{Binary, Deps, StdError, StdResult};

use crate::msg::{
    AssetResponse, BurnedBalanceResponse, ConfigResponse, DepositRecordResponse,
    LockedBalanceResponse, ResolveResponse, ResourceEntry, ResourcesResponse,
};
use crate::registry;
use crate::safe;
use crate::state::{CONFIG, DEPOSIT_RECORDS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        bridge: config.bridge,
        admin: config.admin,
        address_prefix: config.address_prefix,
    })
}

/// Look up a deposit record. Absent keys answer with a zeroed record.
pub fn query_deposit_record(
    deps: Deps,
    destination_chain_id: u64,
    deposit_nonce: u64,
) -> StdResult<DepositRecordResponse> {
    let record = DEPOSIT_RECORDS.may_load(deps.storage, (destination_chain_id, deposit_nonce))?;

    Ok(record
        .map(|record| DepositRecordResponse {
            asset: record.asset.into_string(),
            destination_chain_id: record.destination_chain_id,
            resource_id: Binary::from(record.resource_id.to_vec()),
            recipient_address_length: record.recipient_address_length,
            recipient_address: record.recipient_address,
            depositor: record.depositor.into_string(),
            amount: record.amount,
        })
        .unwrap_or_default())
}

// ============================================================================
// Registry Queries
// ============================================================================

pub fn query_resolve(deps: Deps, resource_id: Binary) -> StdResult<ResolveResponse> {
    let id = parse_resource_id(&resource_id)?;
    let asset = registry::resolve(deps.storage, &id)?;
    let entry = match &asset {
        Some(asset) => registry::entry_of(deps.storage, asset)?,
        None => None,
    };

    Ok(ResolveResponse {
        resource_id,
        asset,
        whitelisted: entry.as_ref().map_or(false, |e| e.whitelisted),
        kind: entry.map(|e| e.kind),
    })
}

pub fn query_asset(deps: Deps, asset: String) -> StdResult<AssetResponse> {
    let asset = deps.api.addr_validate(&asset)?;
    let entry = registry::entry_of(deps.storage, &asset)?;
    let resource_id = registry::resource_id_of(deps.storage, &asset)?;

    Ok(AssetResponse {
        registered: entry.is_some(),
        resource_id: resource_id.map(|id| Binary::from(id.as_slice())),
        whitelisted: entry.as_ref().map_or(false, |e| e.whitelisted),
        kind: entry.map(|e| e.kind),
        asset,
    })
}

pub fn query_resources(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<ResourcesResponse> {
    let start_after = start_after
        .map(|bytes| parse_resource_id(&bytes))
        .transpose()?;

    let resources = registry::list(deps.storage, start_after.as_ref(), limit)?
        .into_iter()
        .map(|(id, asset)| ResourceEntry {
            resource_id: Binary::from(id.as_slice()),
            asset,
        })
        .collect();

    Ok(ResourcesResponse { resources })
}

// ============================================================================
// Ledger Queries
// ============================================================================

pub fn query_locked_balance(deps: Deps, asset: String) -> StdResult<LockedBalanceResponse> {
    let addr = deps.api.addr_validate(&asset)?;
    let amount = safe::locked_balance(deps.storage, &addr)?;
    Ok(LockedBalanceResponse { asset, amount })
}

pub fn query_burned_balance(deps: Deps, asset: String) -> StdResult<BurnedBalanceResponse> {
    let addr = deps.api.addr_validate(&asset)?;
    let amount = safe::burned_balance(deps.storage, &addr)?;
    Ok(BurnedBalanceResponse { asset, amount })
}

fn parse_resource_id(bytes: &Binary) -> StdResult<ResourceId> {
    ResourceId::from_slice(bytes).map_err(|e| StdError::generic_err(e.to_string()))
}
