//! Bridge entry point handlers.
//!
//! Every handler here is callable only by the configured bridge. The caller
//! check runs before any argument is parsed, so an unauthorized call never
//! touches the codec, the registry or the ledger.

use common::{split_resource_id, DepositPayload, ExecutionPayload, ResourceId};
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::address_codec::recipient_address;
use crate::error::ContractError;
use crate::registry::{self, AssetKind};
use crate::safe;
use crate::state::{Config, DepositRecord, CONFIG, DEPOSIT_RECORDS};

// ============================================================================
// Deposit
// ============================================================================

/// Lock or burn a deposit and store its record under
/// `(destination_chain_id, deposit_nonce)`.
#[allow(clippy::too_many_arguments)]
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    resource_id: Binary,
    destination_chain_id: u64,
    deposit_nonce: u64,
    depositor: String,
    data: Binary,
) -> Result<Response, ContractError> {
    load_bridge_config(deps.storage, &info)?;

    let resource_id = ResourceId::from_slice(&resource_id)?;
    let payload = DepositPayload::decode(&data)?;
    let depositor = deps.api.addr_validate(&depositor)?;

    let (asset, entry) = registry::resolve_whitelisted(deps.storage, &resource_id)?;

    if DEPOSIT_RECORDS.has(deps.storage, (destination_chain_id, deposit_nonce)) {
        return Err(ContractError::DepositAlreadyRecorded {
            destination_chain_id,
            deposit_nonce,
        });
    }

    let asset_msg = match entry.kind {
        AssetKind::Burnable => safe::burn(deps.storage, &asset, &depositor, payload.amount)?,
        AssetKind::Custodied => safe::lock(
            deps.storage,
            &asset,
            &depositor,
            &env.contract.address,
            payload.amount,
        )?,
    };

    let record = DepositRecord {
        asset: asset.clone(),
        destination_chain_id,
        resource_id: *resource_id.as_bytes(),
        recipient_address_length: payload.recipient.len() as u64,
        recipient_address: Binary::from(payload.recipient),
        depositor: depositor.clone(),
        amount: payload.amount,
    };
    DEPOSIT_RECORDS.save(deps.storage, (destination_chain_id, deposit_nonce), &record)?;

    Ok(Response::new()
        .add_submessage(asset_msg)
        .add_attribute("method", "deposit")
        .add_attribute("resource_id", resource_id.to_hex())
        .add_attribute("destination_chain_id", destination_chain_id.to_string())
        .add_attribute("deposit_nonce", deposit_nonce.to_string())
        .add_attribute("asset", asset)
        .add_attribute("kind", entry.kind.as_str())
        .add_attribute("depositor", depositor)
        .add_attribute("amount", payload.amount))
}

// ============================================================================
// Execution
// ============================================================================

/// Release or mint an incoming transfer to the payload's recipient.
pub fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    resource_id: Binary,
    data: Binary,
) -> Result<Response, ContractError> {
    let config = load_bridge_config(deps.storage, &info)?;

    let resource_id = ResourceId::from_slice(&resource_id)?;
    let response = transfer_out(deps, &config, &resource_id, &data)?;

    Ok(response.add_attribute("method", "execute_transfer"))
}

/// Like [`execute_transfer`], with the resource id also carried at the front
/// of `data`. Both copies must agree.
pub fn execute_proposal(
    deps: DepsMut,
    info: MessageInfo,
    resource_id: Binary,
    data: Binary,
) -> Result<Response, ContractError> {
    let config = load_bridge_config(deps.storage, &info)?;

    let resource_id = ResourceId::from_slice(&resource_id)?;
    let (embedded, body) = split_resource_id(&data)?;
    if embedded != resource_id {
        return Err(ContractError::ResourceIdMismatch {
            expected: resource_id.to_hex(),
            got: embedded.to_hex(),
        });
    }

    let response = transfer_out(deps, &config, &resource_id, body)?;

    Ok(response.add_attribute("method", "execute_proposal"))
}

fn transfer_out(
    deps: DepsMut,
    config: &Config,
    resource_id: &ResourceId,
    data: &[u8],
) -> Result<Response, ContractError> {
    let payload = ExecutionPayload::decode(data)?;
    let (asset, entry) = registry::resolve_whitelisted(deps.storage, resource_id)?;
    let recipient = recipient_address(
        deps.api,
        &payload.destination_account(),
        &config.address_prefix,
    )?;

    let asset_msg = match entry.kind {
        AssetKind::Burnable => safe::mint(deps.storage, &asset, &recipient, payload.amount)?,
        AssetKind::Custodied => safe::release(deps.storage, &asset, &recipient, payload.amount)?,
    };

    Ok(Response::new()
        .add_submessage(asset_msg)
        .add_attribute("resource_id", resource_id.to_hex())
        .add_attribute("asset", asset)
        .add_attribute("kind", entry.kind.as_str())
        .add_attribute("recipient", recipient)
        .add_attribute("amount", payload.amount))
}

// ============================================================================
// Custody Management
// ============================================================================

/// Release custodied tokens directly, bypassing resource routing.
pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    load_bridge_config(deps.storage, &info)?;

    let asset = deps.api.addr_validate(&asset)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let asset_msg = safe::release(deps.storage, &asset, &recipient, amount)?;

    Ok(Response::new()
        .add_submessage(asset_msg)
        .add_attribute("method", "withdraw")
        .add_attribute("asset", asset)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

/// Pre-fund custody from `from`, which must have approved this contract.
pub fn execute_fund_in(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    from: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    load_bridge_config(deps.storage, &info)?;

    let asset = deps.api.addr_validate(&asset)?;
    let from = deps.api.addr_validate(&from)?;

    let asset_msg = safe::fund_in(deps.storage, &asset, &from, &env.contract.address, amount)?;

    Ok(Response::new()
        .add_submessage(asset_msg)
        .add_attribute("method", "fund_in")
        .add_attribute("asset", asset)
        .add_attribute("from", from)
        .add_attribute("amount", amount))
}

fn load_bridge_config(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.bridge {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}
