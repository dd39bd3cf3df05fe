//! Resource registry integration tests.
//!
//! Covers instantiation-time registration, the admin-gated registry
//! mutators and the registry queries.

use cosmwasm_std::{Addr, Binary};
use cw_multi_test::{App, ContractWrapper, Executor};

use token_handler::msg::{
    AssetResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ResolveResponse,
    ResourcesResponse,
};
use token_handler::{AssetKind, ResourceId};

fn contract_handler() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        token_handler::contract::execute,
        token_handler::contract::instantiate,
        token_handler::contract::query,
    )
    .with_reply(token_handler::contract::reply);
    Box::new(contract)
}

fn id(byte: u8) -> Binary {
    Binary::from(ResourceId::new([byte; 32]).as_slice())
}

fn instantiate(app: &mut App, msg: &InstantiateMsg) -> anyhow::Result<Addr> {
    let code_id = app.store_code(contract_handler());
    app.instantiate_contract(
        code_id,
        Addr::unchecked("terra1creator"),
        msg,
        &[],
        "token-handler",
        None,
    )
}

fn base_msg() -> InstantiateMsg {
    InstantiateMsg {
        bridge: "terra1bridge".to_string(),
        admin: None,
        address_prefix: None,
        initial_resource_ids: vec![id(1), id(2), id(3)],
        initial_asset_addresses: vec![
            "terra1tokena".to_string(),
            "terra1tokenb".to_string(),
            "terra1tokenc".to_string(),
        ],
        burnable_assets: vec!["terra1tokenb".to_string()],
    }
}

fn resolve(app: &App, handler: &Addr, resource_id: Binary) -> ResolveResponse {
    app.wrap()
        .query_wasm_smart(handler, &QueryMsg::Resolve { resource_id })
        .unwrap()
}

fn asset(app: &App, handler: &Addr, asset: &str) -> AssetResponse {
    app.wrap()
        .query_wasm_smart(
            handler,
            &QueryMsg::Asset {
                asset: asset.to_string(),
            },
        )
        .unwrap()
}

// ============================================================================
// Instantiation
// ============================================================================

#[test]
fn test_instantiate_registers_initial_resources() {
    let mut app = App::default();
    let handler = instantiate(&mut app, &base_msg()).unwrap();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&handler, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.bridge, Addr::unchecked("terra1bridge"));
    assert_eq!(config.admin, Addr::unchecked("terra1bridge"));
    assert_eq!(config.address_prefix, "terra");

    let a = resolve(&app, &handler, id(1));
    assert_eq!(a.asset, Some(Addr::unchecked("terra1tokena")));
    assert!(a.whitelisted);
    assert_eq!(a.kind, Some(AssetKind::Custodied));

    let b = resolve(&app, &handler, id(2));
    assert_eq!(b.kind, Some(AssetKind::Burnable));

    let unknown = resolve(&app, &handler, id(9));
    assert_eq!(unknown.asset, None);
    assert!(!unknown.whitelisted);
    assert_eq!(unknown.kind, None);
}

#[test]
fn test_instantiate_list_length_mismatch() {
    let mut app = App::default();
    let mut msg = base_msg();
    msg.initial_asset_addresses.pop();
    msg.burnable_assets.clear();

    let err_str = instantiate(&mut app, &msg)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(
        err_str.contains("Resource list mismatch: 3 resource ids, 2 asset addresses"),
        "unexpected error: {}",
        err_str
    );
}

#[test]
fn test_instantiate_rejects_short_resource_id() {
    let mut app = App::default();
    let mut msg = base_msg();
    msg.initial_resource_ids[0] = Binary::from(vec![1u8; 31]);

    let err_str = instantiate(&mut app, &msg)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(
        err_str.contains("invalid resource id length"),
        "unexpected error: {}",
        err_str
    );
}

#[test]
fn test_instantiate_custom_prefix_and_admin() {
    let mut app = App::default();
    let mut msg = base_msg();
    msg.admin = Some("terra1admin".to_string());
    msg.address_prefix = Some("cosmos".to_string());
    let handler = instantiate(&mut app, &msg).unwrap();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&handler, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, Addr::unchecked("terra1admin"));
    assert_eq!(config.address_prefix, "cosmos");

    let mut msg = base_msg();
    msg.address_prefix = Some("Bad Prefix".to_string());
    assert!(instantiate(&mut app, &msg).is_err());
}

#[test]
fn test_instantiate_prefix_must_fit_account_address() {
    let mut app = App::default();

    let mut msg = base_msg();
    msg.address_prefix = Some("a".repeat(52));
    let err_str = instantiate(&mut app, &msg)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(
        err_str.contains("Invalid address prefix length: 52"),
        "unexpected error: {}",
        err_str
    );

    let mut msg = base_msg();
    msg.address_prefix = Some("a".repeat(51));
    let handler = instantiate(&mut app, &msg).unwrap();
    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&handler, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.address_prefix.len(), 51);
}

// ============================================================================
// Registry Mutators
// ============================================================================

#[test]
fn test_set_resource_rebinds_one_to_one() {
    let mut app = App::default();
    let bridge = Addr::unchecked("terra1bridge");
    let handler = instantiate(&mut app, &base_msg()).unwrap();

    // point resource 1 at token b: b's old id (2) stops resolving
    app.execute_contract(
        bridge.clone(),
        handler.clone(),
        &ExecuteMsg::SetResource {
            resource_id: id(1),
            asset: "terra1tokenb".to_string(),
        },
        &[],
    )
    .unwrap();

    assert_eq!(
        resolve(&app, &handler, id(1)).asset,
        Some(Addr::unchecked("terra1tokenb"))
    );
    assert_eq!(resolve(&app, &handler, id(2)).asset, None);

    let b = asset(&app, &handler, "terra1tokenb");
    assert_eq!(b.resource_id, Some(id(1)));
    assert_eq!(b.kind, Some(AssetKind::Burnable));

    // token a lost its binding but keeps its entry
    let a = asset(&app, &handler, "terra1tokena");
    assert!(a.registered);
    assert_eq!(a.resource_id, None);
}

#[test]
fn test_registry_mutators_gated_by_admin() {
    let mut app = App::default();
    let mut msg = base_msg();
    msg.admin = Some("terra1admin".to_string());
    let handler = instantiate(&mut app, &msg).unwrap();

    let set = ExecuteMsg::SetWhitelisted {
        asset: "terra1tokena".to_string(),
        enabled: false,
    };

    // the bridge is not the registry admin here
    let err_str = app
        .execute_contract(Addr::unchecked("terra1bridge"), handler.clone(), &set, &[])
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(
        err_str.contains("only admin"),
        "unexpected error: {}",
        err_str
    );

    app.execute_contract(Addr::unchecked("terra1admin"), handler.clone(), &set, &[])
        .unwrap();
    let a = asset(&app, &handler, "terra1tokena");
    assert!(!a.whitelisted);
    assert!(!resolve(&app, &handler, id(1)).whitelisted);
}

#[test]
fn test_set_burnable_requires_registration() {
    let mut app = App::default();
    let bridge = Addr::unchecked("terra1bridge");
    let handler = instantiate(&mut app, &base_msg()).unwrap();

    let err_str = app
        .execute_contract(
            bridge.clone(),
            handler.clone(),
            &ExecuteMsg::SetBurnable {
                asset: "terra1stranger".to_string(),
            },
            &[],
        )
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(
        err_str.contains("Asset not registered"),
        "unexpected error: {}",
        err_str
    );

    app.execute_contract(
        bridge,
        handler.clone(),
        &ExecuteMsg::SetBurnable {
            asset: "terra1tokenc".to_string(),
        },
        &[],
    )
    .unwrap();
    assert_eq!(
        asset(&app, &handler, "terra1tokenc").kind,
        Some(AssetKind::Burnable)
    );
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_resources_pagination() {
    let mut app = App::default();
    let handler = instantiate(&mut app, &base_msg()).unwrap();

    let page: ResourcesResponse = app
        .wrap()
        .query_wasm_smart(
            &handler,
            &QueryMsg::Resources {
                start_after: None,
                limit: Some(2),
            },
        )
        .unwrap();
    let ids: Vec<Binary> = page.resources.iter().map(|r| r.resource_id.clone()).collect();
    assert_eq!(ids, vec![id(1), id(2)]);

    let page: ResourcesResponse = app
        .wrap()
        .query_wasm_smart(
            &handler,
            &QueryMsg::Resources {
                start_after: Some(id(2)),
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(page.resources.len(), 1);
    assert_eq!(page.resources[0].asset, Addr::unchecked("terra1tokenc"));
}
