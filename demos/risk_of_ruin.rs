extern crate rs_poker_bankroll;

use rs_poker_bankroll::simulation::SimulationParametersBuilder;
use rs_poker_bankroll::simulation::simulate;
use rs_poker_bankroll::sizing::{
    DEFAULT_HANDS_PER_HOUR, RiskProfile, estimate_time_to_target, kelly_criterion,
};
use rs_poker_bankroll::trajectory::percentile_trajectories;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bankroll = 350.0;
    let target = 500.0;
    let winrate = 4.0;
    let stddev = 85.0;
    let big_blind = 0.10;

    let params = SimulationParametersBuilder::default()
        .starting_bankroll(bankroll)
        .winrate_bb_per_100(winrate)
        .stddev_bb_per_100(stddev)
        .hand_count(20_000)
        .simulation_count(1_000)
        .target_bankroll(target)
        .big_blind_size(big_blind)
        .build()
        .expect("Demo parameters should be valid.");

    let result = simulate(&params).expect("Demo parameters should be valid.");
    let summary = result.summary();

    println!("Risk of ruin        {:>8.2}%", summary.risk_of_ruin * 100.0);
    println!(
        "Reach ${target:<12} {:>8.2}%",
        summary.probability_reach_target * 100.0
    );
    println!("Expected final      {:>9.2}", summary.expected_final_bankroll);
    println!("Median final        {:>9.2}", summary.median_final_bankroll);
    println!(
        "5% / 95% final      {:>9.2} / {:.2}",
        summary.percentile_5, summary.percentile_95
    );
    println!("Median drawdown     {:>9.2}", summary.median_max_drawdown);

    let bands = percentile_trajectories(&result);
    for hand in (0..bands.len()).step_by(5_000) {
        println!(
            "hand {hand:>6}: p5 {:>8.2}  p50 {:>8.2}  p95 {:>8.2}",
            bands.p5[hand], bands.p50[hand], bands.p95[hand]
        );
    }

    let sizing = kelly_criterion(winrate, stddev).expect("Demo stddev is positive.");
    for profile in RiskProfile::ALL {
        println!("{profile:?}: {} buy-ins", sizing.buyins(profile));
    }

    let estimate =
        estimate_time_to_target(bankroll, target, winrate, DEFAULT_HANDS_PER_HOUR, big_blind)
            .expect("Demo pace is positive.");
    println!("{}", estimate.message());
}
