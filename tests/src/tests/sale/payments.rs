use cosmwasm_std::{coin, coins, Uint128};
use cw_multi_test::Executor;
use cw_utils::PaymentError;
use drop_sale::error::ContractError;
use drop_sale::msg::{ExecuteMsg, QueryMsg};

use crate::helpers::mock_messages::sale_mock_messages::{
    DENOM, PUBLIC_PRICE, PUBLIC_START, WHITELIST_PRICE,
};
use crate::helpers::setup::{setup, setup_drop};
use crate::helpers::utils::{assert_error, proof_for, query_denom_balance, set_height};

#[test]
fn test_exact_payment_required() {
    let mut res = setup();
    let bob = res.test_accounts.bob.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    let mint_msg = ExecuteMsg::MintWhitelisted {
        quantity: 2,
        proof: proof_for(&drop.tree, &bob),
    };
    let cases = [
        (vec![], 0u128),
        (coins(WHITELIST_PRICE, DENOM), WHITELIST_PRICE),
        (coins(WHITELIST_PRICE * 3, DENOM), WHITELIST_PRICE * 3),
    ];
    for (funds, sent) in cases {
        let error = app
            .execute_contract(bob.clone(), drop.sale.clone(), &mint_msg, &funds)
            .unwrap_err();
        assert_error(
            error,
            ContractError::InvalidPayment {
                expected: Uint128::new(WHITELIST_PRICE * 2),
                sent: Uint128::new(sent),
            },
        );
    }

    let error = app
        .execute_contract(
            bob.clone(),
            drop.sale.clone(),
            &mint_msg,
            &coins(WHITELIST_PRICE * 2, "uatom"),
        )
        .unwrap_err();
    assert_error(
        error,
        ContractError::PaymentError(PaymentError::ExtraDenom("uatom".to_string())),
    );

    let error = app
        .execute_contract(
            bob.clone(),
            drop.sale.clone(),
            &mint_msg,
            &[coin(1, "uatom"), coin(WHITELIST_PRICE * 2, DENOM)],
        )
        .unwrap_err();
    assert_error(error, ContractError::PaymentError(PaymentError::MultipleDenoms {}));

    // Nothing was kept from the failed attempts
    assert_eq!(query_denom_balance(&app, &drop.sale, DENOM), 0);
    assert_eq!(query_denom_balance(&app, &bob, DENOM), 1_000_000_000);

    app.execute_contract(
        bob.clone(),
        drop.sale.clone(),
        &mint_msg,
        &coins(WHITELIST_PRICE * 2, DENOM),
    )
    .unwrap();
    assert_eq!(
        query_denom_balance(&app, &drop.sale, DENOM),
        WHITELIST_PRICE * 2
    );
}

#[test]
fn test_free_phase_takes_no_funds() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let sara = res.test_accounts.sara.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    app.execute_contract(
        admin.clone(),
        drop.sale.clone(),
        &ExecuteMsg::UpdateSalePrice {
            whitelist_price: Uint128::new(WHITELIST_PRICE),
            waitlist_price: Uint128::zero(),
            public_price: Uint128::zero(),
        },
        &[],
    )
    .unwrap();

    set_height(&mut app, PUBLIC_START);
    let error = app
        .execute_contract(
            sara.clone(),
            drop.sale.clone(),
            &ExecuteMsg::MintPublicSale { quantity: 1 },
            &coins(PUBLIC_PRICE, DENOM),
        )
        .unwrap_err();
    assert_error(
        error,
        ContractError::InvalidPayment {
            expected: Uint128::zero(),
            sent: Uint128::new(PUBLIC_PRICE),
        },
    );

    app.execute_contract(
        sara.clone(),
        drop.sale.clone(),
        &ExecuteMsg::MintPublicSale { quantity: 1 },
        &[],
    )
    .unwrap();
}

#[test]
fn test_withdraw() {
    let mut res = setup();
    let admin = res.test_accounts.admin.clone();
    let bob = res.test_accounts.bob.clone();
    let jane = res.test_accounts.jane.clone();
    let drop = setup_drop(&mut res);
    let mut app = res.app;

    // Nothing to send yet
    app.execute_contract(admin.clone(), drop.sale.clone(), &ExecuteMsg::Withdraw {}, &[])
        .unwrap();

    for buyer in [&bob, &jane] {
        app.execute_contract(
            buyer.clone(),
            drop.sale.clone(),
            &ExecuteMsg::MintWhitelisted {
                quantity: 2,
                proof: proof_for(&drop.tree, buyer),
            },
            &coins(WHITELIST_PRICE * 2, DENOM),
        )
        .unwrap();
    }
    assert_eq!(
        query_denom_balance(&app, &drop.sale, DENOM),
        WHITELIST_PRICE * 4
    );

    let error = app
        .execute_contract(bob.clone(), drop.sale.clone(), &ExecuteMsg::Withdraw {}, &[])
        .unwrap_err();
    assert_error(error, ContractError::NotAuthorized {});
    let error = app
        .execute_contract(
            admin.clone(),
            drop.sale.clone(),
            &ExecuteMsg::Withdraw {},
            &coins(1, DENOM),
        )
        .unwrap_err();
    assert_error(error, ContractError::PaymentError(PaymentError::NonPayable {}));

    let admin_before = query_denom_balance(&app, &admin, DENOM);
    app.execute_contract(admin.clone(), drop.sale.clone(), &ExecuteMsg::Withdraw {}, &[])
        .unwrap();
    assert_eq!(query_denom_balance(&app, &drop.sale, DENOM), 0);
    assert_eq!(
        query_denom_balance(&app, &admin, DENOM),
        admin_before + WHITELIST_PRICE * 4
    );

    // Sale keeps running after a withdraw
    let total: u32 = app
        .wrap()
        .query_wasm_smart(&drop.sale, &QueryMsg::TotalMinted {})
        .unwrap();
    assert_eq!(total, 4);
}
