//! Reward sanitization.

/// Sanitize a single reward.
///
/// NaN, infinities and negative values become `0.0`; everything else is
/// returned unchanged.
pub fn sanitize_reward(reward: f64) -> f64 {
    if reward.is_finite() && reward > 0.0 {
        reward
    } else {
        0.0
    }
}

/// Sanitize a reward vector, returning the cleaned vector and the number of
/// entries that had to be replaced.
pub fn sanitize_rewards(rewards: &[f64]) -> (Vec<f64>, usize) {
    let mut replaced = 0;
    let cleaned = rewards
        .iter()
        .map(|&reward| {
            let clean = sanitize_reward(reward);
            if clean != reward {
                replaced += 1;
            }
            clean
        })
        .collect();
    (cleaned, replaced)
}
