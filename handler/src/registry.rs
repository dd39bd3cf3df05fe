//! Resource registry
//!
//! Maps 32-byte resource ids to CW20 asset contracts and back, and keeps the
//! per-asset routing entry. All access goes through the functions below so
//! the one-to-one binding between ids and assets holds at every write.

use common::ResourceId;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::ContractError;

/// How value moves for an asset. Chosen at registration; an asset can be
/// promoted from `Custodied` to `Burnable` once and never back.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum AssetKind {
    /// Lock on deposit, release on execution
    Custodied,
    /// Burn on deposit, mint on execution
    Burnable,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Custodied => "custodied",
            AssetKind::Burnable => "burnable",
        }
    }
}

/// Routing entry for a registered asset
#[cw_serde]
pub struct AssetEntry {
    pub whitelisted: bool,
    pub kind: AssetKind,
}

/// resource id => asset contract
pub const RESOURCE_TO_ASSET: Map<&[u8], Addr> = Map::new("resource_to_asset");

/// asset contract => resource id
pub const ASSET_TO_RESOURCE: Map<&Addr, [u8; 32]> = Map::new("asset_to_resource");

/// asset contract => routing entry
pub const ASSETS: Map<&Addr, AssetEntry> = Map::new("assets");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

/// Bind `resource_id` to `asset` and whitelist the asset.
///
/// Last write wins for the resource id. Any older binding that would break
/// the one-to-one mapping (the id's previous asset, or the asset's previous
/// id) is dropped.
pub fn register(
    storage: &mut dyn Storage,
    resource_id: &ResourceId,
    asset: &Addr,
) -> StdResult<()> {
    if let Some(previous_asset) = RESOURCE_TO_ASSET.may_load(storage, resource_id.as_slice())?
    {
        if previous_asset != *asset {
            ASSET_TO_RESOURCE.remove(storage, &previous_asset);
        }
    }
    if let Some(previous_id) = ASSET_TO_RESOURCE.may_load(storage, asset)? {
        if previous_id != *resource_id.as_bytes() {
            RESOURCE_TO_ASSET.remove(storage, previous_id.as_slice());
        }
    }

    RESOURCE_TO_ASSET.save(storage, resource_id.as_slice(), asset)?;
    ASSET_TO_RESOURCE.save(storage, asset, resource_id.as_bytes())?;

    let kind = ASSETS
        .may_load(storage, asset)?
        .map(|entry| entry.kind)
        .unwrap_or(AssetKind::Custodied);
    ASSETS.save(
        storage,
        asset,
        &AssetEntry {
            whitelisted: true,
            kind,
        },
    )
}

/// Mark a registered asset as burn/mint. Idempotent.
pub fn set_burnable(
    storage: &mut dyn Storage,
    asset: &Addr,
) -> Result<AssetEntry, ContractError> {
    let mut entry = load_entry(storage, asset)?;
    entry.kind = AssetKind::Burnable;
    ASSETS.save(storage, asset, &entry)?;
    Ok(entry)
}

/// Toggle bridging eligibility of a registered asset.
pub fn set_whitelisted(
    storage: &mut dyn Storage,
    asset: &Addr,
    enabled: bool,
) -> Result<AssetEntry, ContractError> {
    let mut entry = load_entry(storage, asset)?;
    entry.whitelisted = enabled;
    ASSETS.save(storage, asset, &entry)?;
    Ok(entry)
}

/// Look up the asset bound to `resource_id`. `None` means unresolved.
pub fn resolve(storage: &dyn Storage, resource_id: &ResourceId) -> StdResult<Option<Addr>> {
    RESOURCE_TO_ASSET.may_load(storage, resource_id.as_slice())
}

/// Resolve and require the asset to be whitelisted.
///
/// Unresolved ids and non-whitelisted assets are the same failure.
pub fn resolve_whitelisted(
    storage: &dyn Storage,
    resource_id: &ResourceId,
) -> Result<(Addr, AssetEntry), ContractError> {
    let rejected = || ContractError::UnknownOrUnwhitelistedAsset {
        resource_id: resource_id.to_hex(),
    };

    let asset = resolve(storage, resource_id)?.ok_or_else(rejected)?;
    match ASSETS.may_load(storage, &asset)? {
        Some(entry) if entry.whitelisted => Ok((asset, entry)),
        _ => Err(rejected()),
    }
}

pub fn resource_id_of(storage: &dyn Storage, asset: &Addr) -> StdResult<Option<ResourceId>> {
    Ok(ASSET_TO_RESOURCE
        .may_load(storage, asset)?
        .map(ResourceId::new))
}

pub fn entry_of(storage: &dyn Storage, asset: &Addr) -> StdResult<Option<AssetEntry>> {
    ASSETS.may_load(storage, asset)
}

/// Page through resource bindings in key order.
pub fn list(
    storage: &dyn Storage,
    start_after: Option<&ResourceId>,
    limit: Option<u32>,
) -> StdResult<Vec<(ResourceId, Addr)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(|id| Bound::exclusive(id.as_slice()));

    RESOURCE_TO_ASSET
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, asset) = item?;
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&key);
            Ok((ResourceId::new(bytes), asset))
        })
        .collect()
}

fn load_entry(storage: &dyn Storage, asset: &Addr) -> Result<AssetEntry, ContractError> {
    ASSETS
        .may_load(storage, asset)?
        .ok_or_else(|| ContractError::AssetNotRegistered {
            asset: asset.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    const R1: ResourceId = ResourceId::new([1u8; 32]);
    const R2: ResourceId = ResourceId::new([2u8; 32]);

    #[test]
    fn test_register_and_resolve() {
        let mut storage = MockStorage::new();
        let asset = Addr::unchecked("cw20-a");

        assert_eq!(resolve(&storage, &R1).unwrap(), None);

        register(&mut storage, &R1, &asset).unwrap();

        assert_eq!(resolve(&storage, &R1).unwrap(), Some(asset.clone()));
        assert_eq!(resource_id_of(&storage, &asset).unwrap(), Some(R1));
        let entry = entry_of(&storage, &asset).unwrap().unwrap();
        assert!(entry.whitelisted);
        assert_eq!(entry.kind, AssetKind::Custodied);
    }

    #[test]
    fn test_reregister_resource_is_last_write_wins() {
        let mut storage = MockStorage::new();
        let first = Addr::unchecked("cw20-a");
        let second = Addr::unchecked("cw20-b");

        register(&mut storage, &R1, &first).unwrap();
        register(&mut storage, &R1, &second).unwrap();

        assert_eq!(resolve(&storage, &R1).unwrap(), Some(second.clone()));
        assert_eq!(resource_id_of(&storage, &second).unwrap(), Some(R1));
        // the old asset no longer claims the id
        assert_eq!(resource_id_of(&storage, &first).unwrap(), None);
    }

    #[test]
    fn test_rebinding_asset_drops_old_resource() {
        let mut storage = MockStorage::new();
        let asset = Addr::unchecked("cw20-a");

        register(&mut storage, &R1, &asset).unwrap();
        register(&mut storage, &R2, &asset).unwrap();

        assert_eq!(resolve(&storage, &R1).unwrap(), None);
        assert_eq!(resolve(&storage, &R2).unwrap(), Some(asset.clone()));
        assert_eq!(resource_id_of(&storage, &asset).unwrap(), Some(R2));
    }

    #[test]
    fn test_burnable_is_sticky() {
        let mut storage = MockStorage::new();
        let asset = Addr::unchecked("cw20-a");

        let err = set_burnable(&mut storage, &asset).unwrap_err();
        assert!(matches!(err, ContractError::AssetNotRegistered { .. }));

        register(&mut storage, &R1, &asset).unwrap();
        set_burnable(&mut storage, &asset).unwrap();
        set_burnable(&mut storage, &asset).unwrap();
        assert_eq!(
            entry_of(&storage, &asset).unwrap().unwrap().kind,
            AssetKind::Burnable
        );

        // re-registration keeps the chosen kind
        register(&mut storage, &R2, &asset).unwrap();
        assert_eq!(
            entry_of(&storage, &asset).unwrap().unwrap().kind,
            AssetKind::Burnable
        );
    }

    #[test]
    fn test_resolve_whitelisted() {
        let mut storage = MockStorage::new();
        let asset = Addr::unchecked("cw20-a");

        let err = resolve_whitelisted(&storage, &R1).unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnknownOrUnwhitelistedAsset { .. }
        ));

        register(&mut storage, &R1, &asset).unwrap();
        let (resolved, _) = resolve_whitelisted(&storage, &R1).unwrap();
        assert_eq!(resolved, asset);

        set_whitelisted(&mut storage, &asset, false).unwrap();
        assert!(resolve_whitelisted(&storage, &R1).is_err());

        set_whitelisted(&mut storage, &asset, true).unwrap();
        assert!(resolve_whitelisted(&storage, &R1).is_ok());
    }

    #[test]
    fn test_list_pages_in_key_order() {
        let mut storage = MockStorage::new();
        register(&mut storage, &R2, &Addr::unchecked("cw20-b")).unwrap();
        register(&mut storage, &R1, &Addr::unchecked("cw20-a")).unwrap();

        let page = list(&storage, None, Some(1)).unwrap();
        assert_eq!(page, vec![(R1, Addr::unchecked("cw20-a"))]);

        let page = list(&storage, Some(&R1), None).unwrap();
        assert_eq!(page, vec![(R2, Addr::unchecked("cw20-b"))]);
    }
}
