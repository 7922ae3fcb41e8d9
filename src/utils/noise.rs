//! Exploration noise for continuous-action agents
//!
//! Provides the Ornstein-Uhlenbeck process commonly used by DDPG-family
//! agents. The process is temporally correlated, so its state belongs to one
//! episode and is cleared by [`OrnsteinUhlenbeck::reset`].

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// Ornstein-Uhlenbeck noise process
///
/// Each call to [`sample`](Self::sample) advances the state by
/// ```text
/// dx = θ * (μ - x) + σ * N(0, 1)
/// x  = x + dx
/// ```
#[derive(Debug, Clone)]
pub struct OrnsteinUhlenbeck {
    mu: f32,
    theta: f32,
    sigma: f32,
    state: Vec<f32>,
    rng: StdRng,
}

impl OrnsteinUhlenbeck {
    /// Create a process with the usual DDPG parameters (μ = 0, θ = 0.15, σ = 0.2)
    ///
    /// # Arguments
    /// * `size` - Dimension of the action vector
    /// * `seed` - Seed for the Gaussian increments
    pub fn new(size: usize, seed: u64) -> Self {
        Self::with_params(size, seed, 0.0, 0.15, 0.2)
    }

    /// Create a process with explicit parameters
    pub fn with_params(size: usize, seed: u64, mu: f32, theta: f32, sigma: f32) -> Self {
        Self { mu, theta, sigma, state: vec![mu; size], rng: StdRng::seed_from_u64(seed) }
    }

    /// Reset the internal state to the mean
    pub fn reset(&mut self) {
        self.state.fill(self.mu);
    }

    /// Advance the process one step and return the new state
    pub fn sample(&mut self) -> &[f32] {
        for x in &mut self.state {
            let gaussian: f32 = self.rng.sample(StandardNormal);
            *x += self.theta * (self.mu - *x) + self.sigma * gaussian;
        }
        &self.state
    }

    /// Current state without advancing
    pub fn state(&self) -> &[f32] {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_mean() {
        let noise = OrnsteinUhlenbeck::with_params(3, 0, 0.5, 0.15, 0.2);
        assert_eq!(noise.state(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_reset_restores_mean() {
        let mut noise = OrnsteinUhlenbeck::new(4, 7);
        for _ in 0..10 {
            noise.sample();
        }
        assert!(noise.state().iter().any(|&x| x != 0.0));

        noise.reset();
        assert_eq!(noise.state(), &[0.0; 4]);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = OrnsteinUhlenbeck::new(2, 123);
        let mut b = OrnsteinUhlenbeck::new(2, 123);

        for _ in 0..5 {
            assert_eq!(a.sample().to_vec(), b.sample().to_vec());
        }
    }

    #[test]
    fn test_zero_sigma_decays_toward_mean() {
        let mut noise = OrnsteinUhlenbeck::with_params(1, 0, 0.0, 0.5, 0.0);
        noise.state[0] = 1.0;

        noise.sample();
        assert!((noise.state()[0] - 0.5).abs() < 1e-6);
        noise.sample();
        assert!((noise.state()[0] - 0.25).abs() < 1e-6);
    }
}
