//! Resource registry administration.

use common::ResourceId;
use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::registry;
use crate::state::CONFIG;

/// Bind `resource_id` to `asset` and whitelist the asset.
pub fn execute_set_resource(
    deps: DepsMut,
    info: MessageInfo,
    resource_id: Binary,
    asset: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let resource_id = ResourceId::from_slice(&resource_id)?;
    let asset = deps.api.addr_validate(&asset)?;
    registry::register(deps.storage, &resource_id, &asset)?;

    Ok(Response::new()
        .add_attribute("method", "set_resource")
        .add_attribute("resource_id", resource_id.to_hex())
        .add_attribute("asset", asset))
}

/// Switch a registered asset to burn/mint.
pub fn execute_set_burnable(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let asset = deps.api.addr_validate(&asset)?;
    let entry = registry::set_burnable(deps.storage, &asset)?;

    Ok(Response::new()
        .add_attribute("method", "set_burnable")
        .add_attribute("asset", asset)
        .add_attribute("kind", entry.kind.as_str()))
}

pub fn execute_set_whitelisted(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let asset = deps.api.addr_validate(&asset)?;
    let entry = registry::set_whitelisted(deps.storage, &asset, enabled)?;

    Ok(Response::new()
        .add_attribute("method", "set_whitelisted")
        .add_attribute("asset", asset)
        .add_attribute("whitelisted", entry.whitelisted.to_string()))
}

fn ensure_admin(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.admin {
        return Err(ContractError::UnauthorizedAdmin);
    }
    Ok(())
}
