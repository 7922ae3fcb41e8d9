//! Multi-agent coordinator
//!
//! Owns the agent population and the shared replay buffer, records every
//! joint transition, and triggers per-agent learning on a fixed schedule.

use anyhow::{Result, bail};

use super::{
    agent::{Agent, AgentId, AgentInit},
    config::MaddpgConfig,
};
use crate::buffer::ReplayBuffer;

/// Seed for agent `index`, derived linearly from the base seed
///
/// Agent `i` receives `seed * (i + 1)` (wrapping on overflow), so agent 0
/// shares the base seed and every other agent gets a distinct multiple.
pub fn derive_agent_seed(seed: u64, index: AgentId) -> u64 {
    seed.wrapping_mul(index as u64 + 1)
}

/// Counters describing coordinator activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    /// Calls to `step`
    pub total_steps: usize,

    /// Steps on which learning fired
    pub learn_cycles: usize,

    /// Individual agent `step` invocations
    pub agent_updates: usize,
}

/// Drives a population of agents that learn from one shared replay buffer
///
/// # Learning schedule
///
/// Every call to [`step`](Self::step) stores the joint transition. Learning
/// fires only when both gates pass:
/// - cadence: `time_step % update_every_n_steps == 0`
/// - warm-up: the buffer holds more than `batch_size` transitions
///
/// A learning cycle runs `learn_updates_per_cycle` passes; each pass calls
/// `step` on every agent in index order, and each agent samples its own batch.
///
/// # Example
///
/// ```rust
/// use maddpg_rl::multi_agent::{MaddpgConfig, MultiAgentCoordinator, NoiseAgent};
///
/// let config = MaddpgConfig::new().buffer_size(100).batch_size(4);
/// let mut coordinator =
///     MultiAgentCoordinator::with_config(2, 3, 2, 7, config, |init| Ok(NoiseAgent::new(init)))
///         .unwrap();
///
/// let states = vec![vec![0.0; 3]; 2];
/// let actions = coordinator.act(&states, true).unwrap();
/// assert_eq!(actions.len(), 2);
/// ```
pub struct MultiAgentCoordinator<A: Agent> {
    num_agents: usize,
    state_size: usize,
    action_size: usize,
    seed: u64,
    config: MaddpgConfig,

    /// Shared replay memory; agents borrow it while learning
    memory: ReplayBuffer,

    agents: Vec<A>,
    stats: CoordinatorStats,
}

impl<A: Agent> MultiAgentCoordinator<A> {
    /// Create a coordinator with the default configuration
    ///
    /// # Arguments
    ///
    /// * `num_agents` - Number of agents
    /// * `state_size` - Observation width per agent
    /// * `action_size` - Action width per agent
    /// * `seed` - Base seed for the buffer and for agent seed derivation
    /// * `make_agent` - Factory called once per agent index
    pub fn new<F>(
        num_agents: usize,
        state_size: usize,
        action_size: usize,
        seed: u64,
        make_agent: F,
    ) -> Result<Self>
    where
        F: FnMut(AgentInit) -> Result<A>,
    {
        Self::with_config(
            num_agents,
            state_size,
            action_size,
            seed,
            MaddpgConfig::default(),
            make_agent,
        )
    }

    /// Create a coordinator with an explicit configuration
    pub fn with_config<F>(
        num_agents: usize,
        state_size: usize,
        action_size: usize,
        seed: u64,
        config: MaddpgConfig,
        mut make_agent: F,
    ) -> Result<Self>
    where
        F: FnMut(AgentInit) -> Result<A>,
    {
        config.validate()?;
        if num_agents == 0 {
            bail!("num_agents must be positive");
        }

        let memory =
            ReplayBuffer::new(num_agents, state_size, action_size, config.buffer_size, seed);

        let agents = (0..num_agents)
            .map(|index| {
                make_agent(AgentInit {
                    index,
                    state_size,
                    action_size,
                    batch_size: config.batch_size,
                    seed: derive_agent_seed(seed, index),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "MADDPG coordinator: {} agents, state {}, action {}, buffer {}, batch {}",
            num_agents,
            state_size,
            action_size,
            config.buffer_size,
            config.batch_size
        );

        Ok(Self {
            num_agents,
            state_size,
            action_size,
            seed,
            config,
            memory,
            agents,
            stats: CoordinatorStats::default(),
        })
    }

    /// Record a joint transition and, when scheduled, let every agent learn
    ///
    /// # Errors
    ///
    /// Fails if the transition does not match the configured agent count or
    /// widths (nothing is stored), or if any agent's learning step fails. An
    /// agent failure aborts the cycle; agents earlier in the order keep their
    /// update.
    pub fn step(
        &mut self,
        time_step: usize,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
        rewards: &[f32],
        next_states: &[Vec<f32>],
        dones: &[bool],
    ) -> Result<()> {
        self.memory.add(states, actions, rewards, next_states, dones)?;
        self.stats.total_steps += 1;

        if !self.should_learn(time_step) {
            return Ok(());
        }

        tracing::debug!(
            "time step {}: learning from {} stored transitions",
            time_step,
            self.memory.len()
        );

        for pass in 0..self.config.learn_updates_per_cycle {
            for (index, agent) in self.agents.iter_mut().enumerate() {
                tracing::trace!("pass {} agent {} step", pass, index);
                agent.step(&self.memory)?;
                self.stats.agent_updates += 1;
            }
        }
        self.stats.learn_cycles += 1;

        Ok(())
    }

    /// Whether a `step` at `time_step` would trigger learning right now
    ///
    /// Cadence and warm-up are independent conditions; both must hold.
    pub fn should_learn(&self, time_step: usize) -> bool {
        let on_cadence = time_step % self.config.update_every_n_steps == 0;
        let warmed_up = self.memory.len() > self.config.batch_size;
        on_cadence && warmed_up
    }

    /// Query every agent on its own observation
    ///
    /// Returns one action per agent, shape `[num_agents, action_size]`. The
    /// exploration flag applies to all agents.
    pub fn act(&mut self, states: &[Vec<f32>], explore: bool) -> Result<Vec<Vec<f32>>> {
        if states.len() != self.num_agents {
            bail!("expected {} observations, got {}", self.num_agents, states.len());
        }

        let mut actions = Vec::with_capacity(self.num_agents);
        for (index, (agent, observation)) in self.agents.iter_mut().zip(states).enumerate() {
            let action = agent.act(observation, explore)?;
            if action.len() != self.action_size {
                bail!(
                    "agent {} returned action width {}, expected {}",
                    index,
                    action.len(),
                    self.action_size
                );
            }
            actions.push(action);
        }
        Ok(actions)
    }

    /// Reset every agent's exploration state; the replay buffer is untouched
    pub fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.reset();
        }
    }

    // Getters

    /// Shared replay buffer
    pub fn memory(&self) -> &ReplayBuffer {
        &self.memory
    }

    /// All agents in index order
    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    /// Get agent by index
    pub fn agent(&self, index: AgentId) -> Option<&A> {
        self.agents.get(index)
    }

    /// Get mutable agent by index
    pub fn agent_mut(&mut self, index: AgentId) -> Option<&mut A> {
        self.agents.get_mut(index)
    }

    /// Active configuration
    pub fn config(&self) -> &MaddpgConfig {
        &self.config
    }

    /// Activity counters so far
    pub fn stats(&self) -> CoordinatorStats {
        self.stats
    }

    /// Number of agents
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Observation width per agent
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// Action width per agent
    pub fn action_size(&self) -> usize {
        self.action_size
    }

    /// Base seed used for the buffer and agent seeds
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
