use cosmwasm_std::{coin, coins, Uint128};
use cw_multi_test::Executor;
use cw_utils::PaymentError;
use drop_sale::error::ContractError;
use drop_sale::msg::{Phase, PhaseDetails, QueryMsg};
use drop_sale::state::Config;

use crate::helpers::mock_messages::collection_mock_messages::return_collection_instantiate_msg;
use crate::helpers::mock_messages::sale_mock_messages::{
    return_sale_instantiate_msg, DENOM, PER_USER_QUOTA, PHASE_DURATION, PHASE_SUPPLY,
    SALE_SUPPLY, WAITLIST_PRICE, WAITLIST_START,
};
use crate::helpers::setup::{setup, setup_drop};
use crate::helpers::utils::{assert_error, set_height};

#[test]
fn test_sale_instantiation() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let collection = res
        .app
        .instantiate_contract(
            res.collection_code_id,
            admin.clone(),
            &return_collection_instantiate_msg(None),
            &[],
            "collection",
            None,
        )
        .unwrap();

    let error = res
        .app
        .instantiate_contract(
            res.sale_code_id,
            admin.clone(),
            &return_sale_instantiate_msg(collection.to_string()),
            &coins(1_000, DENOM),
            "sale",
            None,
        )
        .unwrap_err();
    assert_error(error, ContractError::PaymentError(PaymentError::NonPayable {}));

    let sale = res
        .app
        .instantiate_contract(
            res.sale_code_id,
            admin.clone(),
            &return_sale_instantiate_msg(collection.to_string()),
            &[],
            "sale",
            None,
        )
        .unwrap();

    // Ceiling comes from the collection's non-airdrop supply
    let config: Config = res
        .app
        .wrap()
        .query_wasm_smart(&sale, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, admin);
    assert_eq!(config.collection, collection);
    assert_eq!(config.mint_denom, DENOM);
    assert_eq!(config.per_user_quota, 5);
    assert_eq!(config.max_supply, SALE_SUPPLY);

    // Every phase closed until configured
    let phases: Vec<(Phase, PhaseDetails)> = res
        .app
        .wrap()
        .query_wasm_smart(&sale, &QueryMsg::Phases {})
        .unwrap();
    assert_eq!(phases.len(), 3);
    for (_, details) in phases {
        assert_eq!(details.duration, 0);
        assert_eq!(details.supply, 0);
        assert_eq!(details.merkle_root, None);
    }
    let active: Option<Phase> = res
        .app
        .wrap()
        .query_wasm_smart(&sale, &QueryMsg::ActivePhase {})
        .unwrap();
    assert_eq!(active, None);
}

#[test]
fn test_configured_phases() {
    let mut res = setup();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    let waitlist: PhaseDetails = app
        .wrap()
        .query_wasm_smart(
            &drop.sale,
            &QueryMsg::Phase {
                phase: Phase::Waitlist,
            },
        )
        .unwrap();
    assert_eq!(waitlist.start_block, WAITLIST_START);
    assert_eq!(waitlist.duration, PHASE_DURATION);
    assert_eq!(waitlist.mint_price, coin(WAITLIST_PRICE, DENOM));
    assert_eq!(waitlist.supply, PHASE_SUPPLY);
    assert_eq!(waitlist.mint_price.amount, Uint128::new(2_000_000));

    let config: Config = app
        .wrap()
        .query_wasm_smart(&drop.sale, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.per_user_quota, PER_USER_QUOTA);

    let expected = [
        (999, None),
        (1_000, Some(Phase::Whitelist)),
        (1_099, Some(Phase::Whitelist)),
        (1_100, Some(Phase::Waitlist)),
        (1_250, Some(Phase::Public)),
        (1_300, None),
    ];
    for (height, phase) in expected {
        set_height(&mut app, height);
        let active: Option<Phase> = app
            .wrap()
            .query_wasm_smart(&drop.sale, &QueryMsg::ActivePhase {})
            .unwrap();
        assert_eq!(active, phase, "height {height}");
    }
}
