//! Drive a MADDPG coordinator with synthetic transitions
//!
//! Two noise agents share one replay buffer. Observations follow a damped
//! random walk and agents are rewarded for staying near the origin, which is
//! enough to exercise warm-up, cadence and episode resets.
//!
//! Optional first argument: path to a JSON config file.
//!
//! ```text
//! RUST_LOG=debug cargo run --example shared_replay -- config.json
//! ```

use anyhow::Result;
use maddpg_rl::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

const NUM_AGENTS: usize = 2;
const STATE_SIZE: usize = 8;
const ACTION_SIZE: usize = 2;
const EPISODES: usize = 20;
const MAX_STEPS: usize = 100;
const SEED: u64 = 2;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => MaddpgConfig::from_json_file(path)?,
        None => MaddpgConfig::new().buffer_size(10_000).batch_size(128),
    };

    let mut coordinator = MultiAgentCoordinator::with_config(
        NUM_AGENTS,
        STATE_SIZE,
        ACTION_SIZE,
        SEED,
        config,
        |init| Ok(NoiseAgent::new(init)),
    )?;
    let mut env_rng = StdRng::seed_from_u64(SEED);

    for episode in 0..EPISODES {
        coordinator.reset();
        let mut states: Vec<Vec<f32>> = (0..NUM_AGENTS)
            .map(|_| (0..STATE_SIZE).map(|_| env_rng.gen_range(-1.0..1.0)).collect())
            .collect();
        let mut episode_reward = vec![0.0_f32; NUM_AGENTS];

        for t in 0..MAX_STEPS {
            let actions = coordinator.act(&states, true)?;

            let next_states: Vec<Vec<f32>> = states
                .iter()
                .zip(&actions)
                .map(|(state, action)| {
                    state
                        .iter()
                        .enumerate()
                        .map(|(i, &x)| {
                            let drift = 0.1 * action[i % ACTION_SIZE];
                            0.9 * x + drift + env_rng.gen_range(-0.05..0.05)
                        })
                        .collect()
                })
                .collect();
            let rewards: Vec<f32> = next_states
                .iter()
                .map(|s| -s.iter().map(|x| x * x).sum::<f32>().sqrt())
                .collect();
            let done = t == MAX_STEPS - 1;
            let dones = vec![done; NUM_AGENTS];

            coordinator.step(t, &states, &actions, &rewards, &next_states, &dones)?;

            for (total, r) in episode_reward.iter_mut().zip(&rewards) {
                *total += r;
            }
            states = next_states;
        }

        let best = episode_reward.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        tracing::info!(
            "Episode {} | Buffer: {} | Best agent reward: {:.3} | Learn cycles: {}",
            episode + 1,
            coordinator.memory().len(),
            best,
            coordinator.stats().learn_cycles
        );
    }

    let stats = coordinator.stats();
    for agent in coordinator.agents() {
        tracing::info!("Agent {} took {} learning steps", agent.id(), agent.updates());
    }
    tracing::info!(
        "Done: {} steps, {} learn cycles, {} agent updates",
        stats.total_steps,
        stats.learn_cycles,
        stats.agent_updates
    );

    Ok(())
}
