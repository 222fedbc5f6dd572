//! Convergence and bookkeeping properties of both trainers.

use imperfect_cfr::cfr::{
    expected_payoffs, regret_matching_strategy, CFRConfig, CFRSolver, Game, History,
    NormalFormConfig, NormalFormTrainer, RegretMatchingPlayer, SolverError,
};
use imperfect_cfr::games::kuhn::{Card, KuhnAction, KuhnDeal, KuhnPoker};
use imperfect_cfr::games::rock_paper_scissor::{
    AsymmetricRockPaperScissor, RockPaperScissor, RpsAction,
};

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tol, "{:?} is not within {} of {:?}", actual, tol, expected);
    }
}

#[test]
fn regret_matching_strategy_is_a_distribution() {
    let cases: [&[f64]; 5] = [
        &[1.0, 2.0, 3.0],
        &[-1.0, 4.0, 0.0],
        &[0.0, 0.0, 0.0],
        &[-5.0, -0.5, -2.0],
        &[1e-9, 0.0, -7.0],
    ];
    for regrets in cases {
        let strategy = regret_matching_strategy(regrets);
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(strategy.iter().all(|&p| p >= 0.0));
    }
    assert_eq!(regret_matching_strategy(&[-1.0, -2.0, -3.0]), vec![1.0 / 3.0; 3]);
}

#[test]
fn cfr_rock_paper_scissor_converges_to_uniform() {
    let mut solver = CFRSolver::new(RockPaperScissor, CFRConfig::default().with_seed(0));
    solver.train(10_000).unwrap();

    for player in 0..2 {
        let infostate = format!("P{}", player);
        assert!(solver.players()[player].storage().contains(&infostate));
        let strategy = solver.average_strategy(player, &infostate).unwrap();
        assert_close(&strategy, &[1.0 / 3.0; 3], 0.05);
    }
}

#[test]
fn cfr_asymmetric_rock_paper_scissor() {
    let mut solver = CFRSolver::new(AsymmetricRockPaperScissor, CFRConfig::default().with_seed(0));
    solver.train(10_000).unwrap();

    for player in 0..2 {
        let infostate = format!("P{}", player);
        let strategy = solver.average_strategy(player, &infostate).unwrap();
        assert_close(&strategy, &[0.4, 0.4, 0.2], 0.05);
    }
}

#[test]
fn cfr_kuhn_poker_value() {
    let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default().with_seed(7));
    solver.train(100_000).unwrap();

    let utilities = solver.average_utilities();
    assert!(
        (utilities[0] + 1.0 / 18.0).abs() < 0.02,
        "average utility {} should be near -1/18",
        utilities[0]
    );
    assert!((utilities[0] + utilities[1]).abs() < 1e-9);

    let exact = expected_payoffs(solver.game(), &solver.average_strategies()).unwrap();
    assert!((exact[0] + 1.0 / 18.0).abs() < 0.01);
}

#[test]
fn cfr_plus_kuhn_poker_value() {
    let config = CFRConfig::default()
        .with_seed(7)
        .with_cfr_plus(true)
        .with_linear_averaging(true);
    let mut solver = CFRSolver::new(KuhnPoker::new(), config);
    solver.train(50_000).unwrap();

    let exact = expected_payoffs(solver.game(), &solver.average_strategies()).unwrap();
    assert!((exact[0] + 1.0 / 18.0).abs() < 0.01);
    for player in solver.players() {
        for infostate in player.storage().infostates() {
            let regrets = player.storage().regrets(&infostate).unwrap();
            assert!(regrets.iter().all(|&r| r >= 0.0));
        }
    }
}

#[test]
fn cfr_train_zero_and_monotone_tables() {
    let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default().with_seed(5));
    solver.train(0).unwrap();
    assert_eq!(solver.num_info_sets(), 0);

    solver.train(100).unwrap();
    let first = solver.export_state();
    solver.train(0).unwrap();
    assert_eq!(solver.export_state().players, first.players);

    solver.train(100).unwrap();
    let second = solver.export_state();
    for (old, new) in first.players.iter().zip(&second.players) {
        // infostates are never dropped
        for key in old.regrets.keys() {
            assert!(new.regrets.contains_key(key));
        }
        for (key, sums) in &old.strategy_sums {
            let before: f64 = sums.iter().sum();
            let after: f64 = new.strategy_sums[key].iter().sum();
            assert!(after >= before);
        }
    }
}

#[test]
fn cfr_freeze_leaves_tables_unchanged() {
    let mut solver = CFRSolver::new(KuhnPoker::new(), CFRConfig::default().with_seed(13));
    solver.train(200).unwrap();
    let before = solver.export_state();

    solver.train_frozen(200, &[0]).unwrap();
    let after = solver.export_state();

    assert_eq!(
        serde_json::to_string(&before.players[0]).unwrap(),
        serde_json::to_string(&after.players[0]).unwrap()
    );
    assert_ne!(before.players[1], after.players[1]);
}

#[test]
fn regret_matching_freeze_leaves_regrets_unchanged() {
    let players = vec![
        RegretMatchingPlayer::new("RM0", 3),
        RegretMatchingPlayer::new("RM1", 3),
    ];
    let config = NormalFormConfig::default().with_seed(3);
    let mut trainer = NormalFormTrainer::new(RockPaperScissor, players, config).unwrap();
    trainer.train(100, &[]).unwrap();
    let frozen = trainer.players()[0].cum_regrets().to_vec();

    trainer.train(100, &[0]).unwrap();
    assert_eq!(trainer.players()[0].cum_regrets(), frozen.as_slice());
}

#[test]
fn payoffs_require_terminal_history() {
    let game = RockPaperScissor;
    let terminal = History::new().child(RpsAction::Rock).child(RpsAction::Scissor);
    assert_eq!(game.payoffs(&terminal).unwrap().len(), game.num_players());
    assert!(matches!(
        game.payoffs(&History::new()),
        Err(SolverError::NotTerminal { .. })
    ));

    let kuhn = KuhnPoker::new();
    let deal = KuhnDeal::new(Card::Q, Card::J);
    let open = History::with_chance(deal).child(KuhnAction::Bet);
    assert!(kuhn.payoffs(&open).is_err());
    let called = open.child(KuhnAction::Bet);
    assert_eq!(kuhn.payoffs(&called).unwrap(), vec![2.0, -2.0]);
}
