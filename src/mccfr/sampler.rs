use crate::Probability;
use rand::Rng;

/// average-strategy (outcome) sampler: blends the current strategy with
/// uniform exploration at rate `epsilon`, and separately exposes the
/// `(tau, beta)` weighting used to compute the probe-corrected sample
/// weight for off-policy updates.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    epsilon: Probability,
    tau: f32,
    beta: f32,
}

impl Sampler {
    pub const fn new(epsilon: Probability, tau: f32, beta: f32) -> Self {
        Self { epsilon, tau, beta }
    }

    pub const fn default() -> Self {
        Self::new(crate::SAMPLER_EPSILON, crate::SAMPLER_TAU, crate::SAMPLER_BETA)
    }

    /// draws an action index from `strategy`, mixed with uniform exploration
    /// at rate `epsilon` so every action retains positive sampling
    /// probability even under a degenerate (all-mass-on-one-action)
    /// strategy.
    pub fn sample<R: Rng + ?Sized>(&self, strategy: &[f32], rng: &mut R) -> usize {
        let width = strategy.len();
        if rng.gen::<Probability>() < self.epsilon {
            return rng.gen_range(0..width);
        }
        let roll: Probability = rng.gen();
        let mut acc = 0.0;
        for (i, p) in strategy.iter().enumerate() {
            acc += p;
            if roll <= acc {
                return i;
            }
        }
        width - 1
    }

    /// the sample-probability actually used for an index, for importance
    /// weighting the off-policy regret estimate.
    pub fn reach(&self, strategy: &[f32], index: usize) -> Probability {
        let width = strategy.len() as Probability;
        self.epsilon / width + (1.0 - self.epsilon) * strategy[index]
    }

    /// blends a raw sample weight toward 1 as visit count `n` exceeds `tau`,
    /// capped by `beta` to keep the correction bounded for rarely visited
    /// information sets.
    pub fn importance(&self, n: f32, raw_weight: f32) -> f32 {
        let blend = (self.tau / (self.tau + n)).min(1.0);
        (blend * self.beta + (1.0 - blend)) * raw_weight / self.beta.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn sample_is_in_range() {
        let sampler = Sampler::default();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let strategy = [0.1, 0.2, 0.3, 0.4];
        for _ in 0..100 {
            let index = sampler.sample(&strategy, &mut rng);
            assert!(index < strategy.len());
        }
    }

    #[test]
    fn reach_is_never_zero() {
        let sampler = Sampler::default();
        let strategy = [1.0, 0.0, 0.0, 0.0];
        assert!(sampler.reach(&strategy, 1) > 0.0);
    }
}
