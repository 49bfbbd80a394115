//! End-to-end rounds against a real bank module. Cards come from block
//! entropy, so the tests play until the situation they need comes up.

use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{Addr, Coin, Uint128};
use cw_multi_test::{App, ContractWrapper, Executor};
use house_blackjack::msg::{
    BankrollResponse, ExecuteMsg, GameResponse, HandId, InstantiateMsg, PayoutRatio, QueryMsg,
};
use house_blackjack::state::GameState;

const DENOM: &str = "uusd";
const BET: u128 = 100;
const MAX_ROUNDS: usize = 1000;

struct TestEnv {
    app: App,
    contract: Addr,
    owner: Addr,
    player: Addr,
}

fn default_instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        owner: None,
        denom: DENOM.to_string(),
        min_bet: Uint128::new(10),
        max_bet: Uint128::new(1_000),
        blackjack_payout: PayoutRatio {
            numerator: 3,
            denominator: 2,
        },
        insurance_payout: PayoutRatio {
            numerator: 2,
            denominator: 1,
        },
        standard_payout: PayoutRatio {
            numerator: 1,
            denominator: 1,
        },
        dealer_hits_soft_17: false,
    }
}

fn setup() -> TestEnv {
    setup_with_bankroll(100_000)
}

fn setup_with_bankroll(initial_bankroll: u128) -> TestEnv {
    let _ = env_logger::builder().is_test(true).try_init();

    let api = MockApi::default();
    let owner = api.addr_make("owner");
    let player = api.addr_make("player");

    let mut app = App::new(|router, _api, storage| {
        router
            .bank
            .init_balance(storage, &owner, vec![Coin::new(1_000_000u128, DENOM)])
            .unwrap();
        router
            .bank
            .init_balance(storage, &player, vec![Coin::new(1_000_000u128, DENOM)])
            .unwrap();
    });

    let code_id = app.store_code(Box::new(ContractWrapper::new(
        house_blackjack::contract::execute,
        house_blackjack::contract::instantiate,
        house_blackjack::contract::query,
    )));

    let funds: Vec<Coin> = if initial_bankroll > 0 {
        vec![Coin::new(initial_bankroll, DENOM)]
    } else {
        vec![]
    };

    let contract = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &default_instantiate_msg(),
            &funds,
            "house-blackjack",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        contract,
        owner,
        player,
    }
}

fn balance(env: &TestEnv, addr: &Addr) -> u128 {
    let coin = env.app.wrap().query_balance(addr, DENOM).unwrap();
    Uint128::try_from(coin.amount).unwrap().u128()
}

fn query_bankroll(env: &TestEnv) -> u128 {
    let resp: BankrollResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.contract, &QueryMsg::GetBankroll {})
        .unwrap();
    resp.balance.u128()
}

fn query_game(env: &TestEnv) -> GameResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.contract,
            &QueryMsg::GetGame {
                player: env.player.to_string(),
            },
        )
        .unwrap()
}

fn player_exec(env: &mut TestEnv, msg: ExecuteMsg, funds: u128) {
    let funds = if funds > 0 {
        vec![Coin::new(funds, DENOM)]
    } else {
        vec![]
    };
    env.app
        .execute_contract(env.player.clone(), env.contract.clone(), &msg, &funds)
        .unwrap();
}

/// Bets and deals a fresh round, clearing any finished one first.
fn deal_round(env: &mut TestEnv) -> GameResponse {
    if query_game(env).state == GameState::GameOver {
        player_exec(env, ExecuteMsg::ResetGame {}, 0);
    }
    env.app.update_block(|b| {
        b.height += 1;
        b.time = b.time.plus_seconds(5);
    });
    player_exec(env, ExecuteMsg::PlaceBet {}, BET);
    player_exec(env, ExecuteMsg::DealInitialCards {}, 0);
    query_game(env)
}

/// Stands every open hand so the dealer plays and the round settles.
fn stand_out(env: &mut TestEnv) {
    while query_game(env).state == GameState::PlayerTurn {
        let hand = if query_game(env).hand1_done {
            HandId::Second
        } else {
            HandId::First
        };
        player_exec(env, ExecuteMsg::Stand { hand }, 0);
    }
}

#[test]
fn test_rounds_keep_contract_balance_equal_to_bankroll() {
    let mut env = setup();
    let player_start = balance(&env, &env.player);

    for round in 0..50 {
        let game = deal_round(&mut env);
        if game.state == GameState::PlayerTurn {
            while query_game(&env).state == GameState::PlayerTurn {
                let game = query_game(&env);
                let msg = if game.hand1.value < 17 {
                    ExecuteMsg::Hit {
                        hand: HandId::First,
                    }
                } else {
                    ExecuteMsg::Stand {
                        hand: HandId::First,
                    }
                };
                player_exec(&mut env, msg, 0);
            }
        }

        let game = query_game(&env);
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(game.reserved, Uint128::zero());
        log::info!(
            "round {round}: player {} dealer {} -> {:?}",
            game.hand1.value,
            game.dealer_hand.value,
            game.results
        );

        // With no live game every coin the contract holds is free bankroll
        let contract_balance = balance(&env, &env.contract);
        assert_eq!(contract_balance, query_bankroll(&env));
        // Whatever the player lost, the house gained
        assert_eq!(
            contract_balance + balance(&env, &env.player),
            100_000 + player_start
        );
    }
}

#[test]
fn test_hit_until_bust() {
    let mut env = setup();

    for _ in 0..MAX_ROUNDS {
        let game = deal_round(&mut env);
        if game.state != GameState::PlayerTurn {
            continue;
        }
        let before = balance(&env, &env.player);
        while query_game(&env).state == GameState::PlayerTurn {
            player_exec(
                &mut env,
                ExecuteMsg::Hit {
                    hand: HandId::First,
                },
                0,
            );
        }

        let game = query_game(&env);
        if game.hand1.value > 21 {
            assert_eq!(game.state, GameState::GameOver);
            assert_eq!(game.results[0].outcome, "loss");
            assert_eq!(game.dealer_hand.cards.len(), 1);
            // Stake was already paid in; nothing comes back
            assert_eq!(balance(&env, &env.player), before);
            return;
        }
    }
    panic!("no bust within {MAX_ROUNDS} rounds");
}

#[test]
fn test_split_then_stand_both_hands() {
    let mut env = setup();

    for _ in 0..MAX_ROUNDS {
        let game = deal_round(&mut env);
        if game.state != GameState::PlayerTurn || game.hand1.cards[0] != game.hand1.cards[1] {
            stand_out(&mut env);
            continue;
        }

        let before = balance(&env, &env.player);
        player_exec(&mut env, ExecuteMsg::Split {}, BET);

        let game = query_game(&env);
        assert!(game.has_split);
        assert_eq!(game.hand1.cards.len(), 2);
        assert_eq!(game.hand2.cards.len(), 2);
        assert_eq!(game.bet2, Uint128::new(BET));
        assert_eq!(balance(&env, &env.player), before - BET);

        player_exec(
            &mut env,
            ExecuteMsg::Stand {
                hand: HandId::First,
            },
            0,
        );
        assert_eq!(query_game(&env).state, GameState::PlayerTurn);
        player_exec(
            &mut env,
            ExecuteMsg::Stand {
                hand: HandId::Second,
            },
            0,
        );

        let game = query_game(&env);
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(game.results.len(), 2);
        let paid: u128 = game.results.iter().map(|r| r.payout.u128()).sum();
        assert_eq!(balance(&env, &env.player), before - BET + paid);
        return;
    }
    panic!("no pair dealt within {MAX_ROUNDS} rounds");
}

#[test]
fn test_withdraw_after_game() {
    let mut env = setup();
    deal_round(&mut env);
    stand_out(&mut env);

    let bankroll = query_bankroll(&env);
    let owner_before = balance(&env, &env.owner);
    let owner = env.owner.clone();
    env.app
        .execute_contract(
            owner,
            env.contract.clone(),
            &ExecuteMsg::WithdrawAll {},
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env, &env.owner), owner_before + bankroll);
    assert_eq!(query_bankroll(&env), 0);
    assert_eq!(balance(&env, &env.contract), 0);
}

#[test]
fn test_withdraw_requires_owner() {
    let mut env = setup();
    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::WithdrawAll {},
            &[],
        )
        .unwrap_err();
    assert!(err.to_string().contains("only the owner may withdraw"));
}

#[test]
fn test_withdraw_empty_bankroll_fails() {
    let mut env = setup_with_bankroll(0);
    let owner = env.owner.clone();
    let err = env
        .app
        .execute_contract(
            owner,
            env.contract.clone(),
            &ExecuteMsg::WithdrawAll {},
            &[],
        )
        .unwrap_err();
    assert!(err.to_string().contains("nothing to withdraw"));
}

#[test]
fn test_second_bet_rejected_and_funds_kept() {
    let mut env = setup();
    player_exec(&mut env, ExecuteMsg::PlaceBet {}, BET);
    let before = balance(&env, &env.player);

    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::PlaceBet {},
            &[Coin::new(BET, DENOM)],
        )
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("cannot place bet: a game is already in progress"));
    assert_eq!(balance(&env, &env.player), before);
}

#[test]
fn test_reset_before_deal_refunds() {
    let mut env = setup();
    let start = balance(&env, &env.player);

    player_exec(&mut env, ExecuteMsg::PlaceBet {}, BET);
    assert_eq!(balance(&env, &env.player), start - BET);

    player_exec(&mut env, ExecuteMsg::ResetGame {}, 0);
    assert_eq!(balance(&env, &env.player), start);
    assert_eq!(query_bankroll(&env), 100_000);
    assert_eq!(query_game(&env).state, GameState::Idle);
}

#[test]
fn test_bet_larger_than_bankroll_can_cover() {
    let mut env = setup_with_bankroll(100);
    let err = env
        .app
        .execute_contract(
            env.player.clone(),
            env.contract.clone(),
            &ExecuteMsg::PlaceBet {},
            &[Coin::new(BET, DENOM)],
        )
        .unwrap_err();
    assert!(err.to_string().contains("insufficient bankroll"));
}

#[test]
fn test_fund_bankroll() {
    let mut env = setup_with_bankroll(0);
    player_exec(&mut env, ExecuteMsg::FundBankroll {}, 5_000);
    assert_eq!(query_bankroll(&env), 5_000);
    assert_eq!(balance(&env, &env.contract), 5_000);
}
