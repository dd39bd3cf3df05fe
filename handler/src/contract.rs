//! Token Handler Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `registry` / `safe` - Routing table and custody ledger

use common::ResourceId;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, SubMsgResult,
};
use cw2::set_contract_version;

use crate::address_codec::validate_prefix;
use crate::error::ContractError;
use crate::execute::{
    execute_deposit, execute_fund_in, execute_proposal, execute_set_burnable,
    execute_set_resource, execute_set_whitelisted, execute_transfer, execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_asset, query_burned_balance, query_config, query_deposit_record, query_locked_balance,
    query_resolve, query_resources,
};
use crate::registry;
use crate::safe::AssetCall;
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_ADDRESS_PREFIX};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let bridge = deps.api.addr_validate(&msg.bridge)?;
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => bridge.clone(),
    };
    let address_prefix = msg
        .address_prefix
        .unwrap_or_else(|| DEFAULT_ADDRESS_PREFIX.to_string());
    validate_prefix(&address_prefix)?;

    if msg.initial_resource_ids.len() != msg.initial_asset_addresses.len() {
        return Err(ContractError::ResourceListMismatch {
            resource_ids: msg.initial_resource_ids.len(),
            assets: msg.initial_asset_addresses.len(),
        });
    }

    let config = Config {
        bridge,
        admin,
        address_prefix,
    };
    CONFIG.save(deps.storage, &config)?;

    for (resource_id, asset) in msg
        .initial_resource_ids
        .iter()
        .zip(msg.initial_asset_addresses.iter())
    {
        let resource_id = ResourceId::from_slice(resource_id)?;
        let asset = deps.api.addr_validate(asset)?;
        registry::register(deps.storage, &resource_id, &asset)?;
    }

    // burnable assets must be among the registrations above
    for asset in &msg.burnable_assets {
        let asset = deps.api.addr_validate(asset)?;
        registry::set_burnable(deps.storage, &asset)?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("bridge", config.bridge)
        .add_attribute("admin", config.admin)
        .add_attribute("address_prefix", config.address_prefix)
        .add_attribute("resource_count", msg.initial_resource_ids.len().to_string())
        .add_attribute("burnable_count", msg.burnable_assets.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Bridge entry points
        ExecuteMsg::Deposit {
            resource_id,
            destination_chain_id,
            deposit_nonce,
            depositor,
            data,
        } => execute_deposit(
            deps,
            env,
            info,
            resource_id,
            destination_chain_id,
            deposit_nonce,
            depositor,
            data,
        ),
        ExecuteMsg::ExecuteTransfer { resource_id, data } => {
            execute_transfer(deps, info, resource_id, data)
        }
        ExecuteMsg::ExecuteProposal { resource_id, data } => {
            execute_proposal(deps, info, resource_id, data)
        }
        ExecuteMsg::Withdraw {
            asset,
            recipient,
            amount,
        } => execute_withdraw(deps, info, asset, recipient, amount),
        ExecuteMsg::FundIn {
            asset,
            from,
            amount,
        } => execute_fund_in(deps, env, info, asset, from, amount),

        // Registry administration
        ExecuteMsg::SetResource { resource_id, asset } => {
            execute_set_resource(deps, info, resource_id, asset)
        }
        ExecuteMsg::SetBurnable { asset } => execute_set_burnable(deps, info, asset),
        ExecuteMsg::SetWhitelisted { asset, enabled } => {
            execute_set_whitelisted(deps, info, asset, enabled)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Asset calls are dispatched with `reply_on_error`, so this only runs when a
/// CW20 call failed. Returning an error aborts the whole transaction,
/// including the ledger update that preceded the call.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let call = AssetCall::from_id(msg.id).ok_or(ContractError::UnknownReplyId { id: msg.id })?;

    match msg.result {
        SubMsgResult::Err(reason) => Err(ContractError::ExternalAssetCallFailed {
            call: call.as_str().to_string(),
            reason,
        }),
        SubMsgResult::Ok(_) => Ok(Response::new()),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::DepositRecord {
            destination_chain_id,
            deposit_nonce,
        } => to_json_binary(&query_deposit_record(
            deps,
            destination_chain_id,
            deposit_nonce,
        )?),
        QueryMsg::Resolve { resource_id } => to_json_binary(&query_resolve(deps, resource_id)?),
        QueryMsg::Asset { asset } => to_json_binary(&query_asset(deps, asset)?),
        QueryMsg::Resources { start_after, limit } => {
            to_json_binary(&query_resources(deps, start_after, limit)?)
        }
        QueryMsg::LockedBalance { asset } => to_json_binary(&query_locked_balance(deps, asset)?),
        QueryMsg::BurnedBalance { asset } => to_json_binary(&query_burned_balance(deps, asset)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
