//! Agent contract for shared-replay training
//!
//! The coordinator drives any type implementing [`Agent`]. Network
//! architecture and the optimisation step live behind this trait.

use anyhow::{Result, bail};

use crate::{buffer::ReplayBuffer, utils::noise::OrnsteinUhlenbeck};

/// Index of an agent within the coordinator
pub type AgentId = usize;

/// A single learner that acts on its own observations and learns from the
/// shared replay buffer
pub trait Agent {
    /// Choose an action for one observation, optionally with exploration noise
    fn act(&mut self, observation: &[f32], explore: bool) -> Result<Vec<f32>>;

    /// Sample from the shared buffer and update internal parameters
    ///
    /// The buffer is borrowed only for the duration of the call.
    fn step(&mut self, memory: &ReplayBuffer) -> Result<()>;

    /// Clear per-episode exploration state
    fn reset(&mut self);
}

/// Everything an agent factory needs to build agent `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentInit {
    /// Position of the agent in the coordinator
    pub index: AgentId,
    /// Observation width
    pub state_size: usize,
    /// Action width
    pub action_size: usize,
    /// Transitions the agent should sample per learning step
    pub batch_size: usize,
    /// Derived with [`derive_agent_seed`](super::derive_agent_seed)
    pub seed: u64,
}

/// Agent with a zero policy and Ornstein-Uhlenbeck exploration
///
/// It does not learn: `step` draws a batch from the shared buffer and counts
/// the update. Useful for warm-up collection and for exercising the
/// coordinator without a neural network backend.
#[derive(Debug, Clone)]
pub struct NoiseAgent {
    id: AgentId,
    state_size: usize,
    action_size: usize,
    batch_size: usize,
    noise: OrnsteinUhlenbeck,
    updates: usize,
}

impl NoiseAgent {
    /// Create a noise agent from its initialisation parameters
    pub fn new(init: AgentInit) -> Self {
        Self {
            id: init.index,
            state_size: init.state_size,
            action_size: init.action_size,
            batch_size: init.batch_size,
            noise: OrnsteinUhlenbeck::new(init.action_size, init.seed),
            updates: 0,
        }
    }

    /// Index this agent was built for
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Number of learning steps taken so far
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Agent for NoiseAgent {
    fn act(&mut self, observation: &[f32], explore: bool) -> Result<Vec<f32>> {
        if observation.len() != self.state_size {
            bail!(
                "agent {}: observation width {} does not match state_size {}",
                self.id,
                observation.len(),
                self.state_size
            );
        }

        let mut action = vec![0.0; self.action_size];
        if explore {
            for (a, n) in action.iter_mut().zip(self.noise.sample()) {
                *a += n;
            }
        }
        for a in &mut action {
            *a = a.clamp(-1.0, 1.0);
        }
        Ok(action)
    }

    fn step(&mut self, memory: &ReplayBuffer) -> Result<()> {
        let batch = memory.sample(self.batch_size)?;
        self.updates += 1;
        tracing::trace!("NoiseAgent {} sampled {} rows", self.id, batch.len());
        Ok(())
    }

    fn reset(&mut self) {
        self.noise.reset();
    }
}
