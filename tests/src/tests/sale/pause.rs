use cosmwasm_std::coins;
use cw_multi_test::Executor;
use cw_utils::PaymentError;
use drop_sale::error::ContractError;
use drop_sale::msg::{ExecuteMsg, QueryMsg};
use pauser::PauseError;

use crate::helpers::mock_messages::sale_mock_messages::{DENOM, WHITELIST_PRICE};
use crate::helpers::setup::{setup, setup_drop};
use crate::helpers::utils::{assert_error, proof_for, query_denom_balance};

#[test]
fn test_paused_sale_rejects_mints() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let bob = res.test_accounts.bob.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;
    let mint_msg = ExecuteMsg::MintWhitelisted {
        quantity: 1,
        proof: proof_for(&drop.tree, &bob),
    };

    let error = app
        .execute_contract(bob.clone(), drop.sale.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap_err();
    assert_error(error, ContractError::NotAuthorized {});

    for msg in [ExecuteMsg::Pause {}, ExecuteMsg::Unpause {}] {
        let error = app
            .execute_contract(admin.clone(), drop.sale.clone(), &msg, &coins(1_000, DENOM))
            .unwrap_err();
        assert_error(error, ContractError::PaymentError(PaymentError::NonPayable {}));
    }
    assert_eq!(query_denom_balance(&app, &drop.sale, DENOM), 0);

    app.execute_contract(admin.clone(), drop.sale.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap();
    let is_paused: bool = app
        .wrap()
        .query_wasm_smart(&drop.sale, &QueryMsg::IsPaused {})
        .unwrap();
    assert!(is_paused);

    let error = app
        .execute_contract(
            bob.clone(),
            drop.sale.clone(),
            &mint_msg,
            &coins(WHITELIST_PRICE, DENOM),
        )
        .unwrap_err();
    assert_error(error, ContractError::Pause(PauseError::Paused {}));

    app.execute_contract(admin.clone(), drop.sale.clone(), &ExecuteMsg::Unpause {}, &[])
        .unwrap();
    let error = app
        .execute_contract(admin.clone(), drop.sale.clone(), &ExecuteMsg::Unpause {}, &[])
        .unwrap_err();
    assert_error(error, ContractError::Pause(PauseError::NotPaused {}));

    app.execute_contract(
        bob.clone(),
        drop.sale.clone(),
        &mint_msg,
        &coins(WHITELIST_PRICE, DENOM),
    )
    .unwrap();
}

#[test]
fn test_paused_collection_reverts_sale() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let bob = res.test_accounts.bob.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    app.execute_contract(
        admin.clone(),
        drop.collection.clone(),
        &collection_types::ExecuteMsg::Pause {},
        &[],
    )
    .unwrap();

    let error = app
        .execute_contract(
            bob.clone(),
            drop.sale.clone(),
            &ExecuteMsg::MintWhitelisted {
                quantity: 2,
                proof: proof_for(&drop.tree, &bob),
            },
            &coins(WHITELIST_PRICE * 2, DENOM),
        )
        .unwrap_err();
    assert_error(
        error,
        drop_collection::error::ContractError::Pause(PauseError::Paused {}),
    );

    // Sale bookkeeping and payment rolled back with the collection failure
    let total: u32 = app
        .wrap()
        .query_wasm_smart(&drop.sale, &QueryMsg::TotalMinted {})
        .unwrap();
    assert_eq!(total, 0);
    let minted: u32 = app
        .wrap()
        .query_wasm_smart(
            &drop.sale,
            &QueryMsg::UserMinted {
                address: bob.to_string(),
            },
        )
        .unwrap();
    assert_eq!(minted, 0);
    assert_eq!(query_denom_balance(&app, &drop.sale, DENOM), 0);
    assert_eq!(query_denom_balance(&app, &bob, DENOM), 1_000_000_000);
}

#[test]
fn test_sale_without_minter_rights() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let bob = res.test_accounts.bob.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    // Collection now points at another minter
    app.execute_contract(
        admin.clone(),
        drop.collection.clone(),
        &collection_types::ExecuteMsg::UpdateSaleContract {
            address: admin.to_string(),
        },
        &[],
    )
    .unwrap();

    let error = app
        .execute_contract(
            bob.clone(),
            drop.sale.clone(),
            &ExecuteMsg::MintWhitelisted {
                quantity: 1,
                proof: proof_for(&drop.tree, &bob),
            },
            &coins(WHITELIST_PRICE, DENOM),
        )
        .unwrap_err();
    assert_error(error, drop_collection::error::ContractError::NotAuthorized {});
}
