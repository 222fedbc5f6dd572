//! Regret matching and action sampling.
//!
//! [`regret_matching_strategy`] is shared by the normal-form regret-matching
//! player and every CFR player, and also turns strategy sums into average
//! strategies.

use rand::{Rng, RngCore};

/// Uniform distribution over `num_actions` actions.
pub fn uniform(num_actions: usize) -> Vec<f64> {
    vec![1.0 / num_actions as f64; num_actions]
}

/// Map a cumulative regret vector to an action distribution.
///
/// The strategy is proportional to the positive regrets. If no regret is
/// positive the uniform distribution is returned.
///
/// ```text
/// Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
/// ```
pub fn regret_matching_strategy(regrets: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = regrets.iter().map(|&r| r.max(0.0)).collect();
    let sum: f64 = positive.iter().sum();

    if sum > 0.0 {
        positive.iter().map(|&r| r / sum).collect()
    } else {
        uniform(regrets.len())
    }
}

/// Sample an action index according to a probability distribution.
pub fn sample_action(strategy: &[f64], rng: &mut dyn RngCore) -> usize {
    let r: f64 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &prob) in strategy.iter().enumerate() {
        cumsum += prob;
        if r < cumsum {
            return i;
        }
    }

    // Floating point slack: fall back to the last action with mass
    strategy
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(strategy.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_distribution(probs: &[f64]) {
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "sums to {}", sum);
        assert!(probs.iter().all(|&p| p >= 0.0), "negative entry in {:?}", probs);
    }

    #[test]
    fn test_positive_regrets_are_normalized() {
        let strategy = regret_matching_strategy(&[1.0, 3.0, -2.0]);
        assert_eq!(strategy, vec![0.25, 0.75, 0.0]);
    }

    #[test]
    fn test_zero_regrets_give_uniform() {
        let strategy = regret_matching_strategy(&[0.0, 0.0, 0.0]);
        assert_eq!(strategy, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn test_negative_regrets_give_uniform() {
        let strategy = regret_matching_strategy(&[-1.0, -0.5, -7.0]);
        assert_eq!(strategy, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn test_output_is_always_a_distribution() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let n = rng.gen_range(1..6);
            let regrets: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            assert_distribution(&regret_matching_strategy(&regrets));
        }
    }

    #[test]
    fn test_sample_action_respects_point_mass() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(sample_action(&[0.0, 1.0, 0.0], &mut rng), 1);
        }
    }

    #[test]
    fn test_sample_action_frequencies() {
        let mut rng = StdRng::seed_from_u64(5);
        let strategy = [0.2, 0.8];
        let n = 20_000;
        let hits = (0..n).filter(|_| sample_action(&strategy, &mut rng) == 1).count();
        let freq = hits as f64 / n as f64;
        assert!((freq - 0.8).abs() < 0.02, "frequency {} should be near 0.8", freq);
    }
}
