//! Replay buffer storage
//!
//! Holds the bounded window of joint transitions and validates every
//! transition against the configured agent count and feature widths before it
//! is stored.

use std::{cell::RefCell, collections::VecDeque};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

use super::{
    error::{ReplayError, ReplayResult},
    sampling::Batch,
};

/// One joint environment step across every agent
///
/// All five sequences are indexed by agent and have exactly `num_agents`
/// entries. A transition is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    states: Vec<Vec<f32>>,
    actions: Vec<Vec<f32>>,
    rewards: Vec<f32>,
    next_states: Vec<Vec<f32>>,
    dones: Vec<bool>,
}

impl Transition {
    /// Create a transition from per-agent sequences
    pub fn new(
        states: Vec<Vec<f32>>,
        actions: Vec<Vec<f32>>,
        rewards: Vec<f32>,
        next_states: Vec<Vec<f32>>,
        dones: Vec<bool>,
    ) -> Self {
        Self { states, actions, rewards, next_states, dones }
    }

    /// Number of agents recorded in this transition
    pub fn num_agents(&self) -> usize {
        self.rewards.len()
    }

    // Getters for per-agent data

    /// Observations, one per agent
    pub fn states(&self) -> &[Vec<f32>] { &self.states }
    /// Actions, one per agent
    pub fn actions(&self) -> &[Vec<f32>] { &self.actions }
    /// Rewards, one per agent
    pub fn rewards(&self) -> &[f32] { &self.rewards }
    /// Next observations, one per agent
    pub fn next_states(&self) -> &[Vec<f32>] { &self.next_states }
    /// Episode termination flags, one per agent
    pub fn dones(&self) -> &[bool] { &self.dones }

    fn validate(
        &self,
        num_agents: usize,
        state_size: usize,
        action_size: usize,
    ) -> ReplayResult<()> {
        check_count("states", self.states.len(), num_agents)?;
        check_count("actions", self.actions.len(), num_agents)?;
        check_count("rewards", self.rewards.len(), num_agents)?;
        check_count("next_states", self.next_states.len(), num_agents)?;
        check_count("dones", self.dones.len(), num_agents)?;

        check_widths("states", &self.states, state_size)?;
        check_widths("actions", &self.actions, action_size)?;
        check_widths("next_states", &self.next_states, state_size)?;

        Ok(())
    }
}

fn check_count(field: &'static str, actual: usize, expected: usize) -> ReplayResult<()> {
    if actual != expected {
        return Err(ReplayError::AgentCountMismatch { field, expected, actual });
    }
    Ok(())
}

fn check_widths(field: &'static str, rows: &[Vec<f32>], expected: usize) -> ReplayResult<()> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(agent) => Err(ReplayError::DimensionMismatch {
            field,
            agent,
            expected,
            actual: rows[agent].len(),
        }),
        None => Ok(()),
    }
}

/// Fixed-capacity replay buffer shared by every agent
///
/// Transitions are stored once per timestep, not once per agent. When the
/// buffer is full the oldest transition is evicted first, so the buffer
/// always holds the most recent `capacity` transitions in insertion order.
///
/// Sampling is uniform without replacement and never mutates the stored
/// transitions. [`ReplayBuffer::sample`] draws from the buffer's own seeded
/// generator; [`ReplayBuffer::sample_with`] lets a caller bring its own.
///
/// # Example
///
/// ```rust
/// use maddpg_rl::buffer::ReplayBuffer;
///
/// // Two agents, 3D observations, 2D actions, room for 5 transitions
/// let mut buffer = ReplayBuffer::new(2, 3, 2, 5, 42);
///
/// for t in 0..3 {
///     let v = t as f32;
///     buffer
///         .add(
///             &[vec![v; 3], vec![-v; 3]],
///             &[vec![0.1; 2], vec![-0.1; 2]],
///             &[1.0, 0.0],
///             &[vec![v + 1.0; 3], vec![-v - 1.0; 3]],
///             &[false, false],
///         )
///         .unwrap();
/// }
///
/// let batch = buffer.sample(2).unwrap();
/// assert_eq!(batch.states_shape(), (4, 3));
/// ```
#[derive(Debug, Clone)]
pub struct ReplayBuffer {
    /// Number of agents per transition
    num_agents: usize,

    /// Observation width per agent
    state_size: usize,

    /// Action width per agent
    action_size: usize,

    /// Maximum number of transitions kept
    capacity: usize,

    /// Stored transitions, oldest at the front
    pub(super) memory: VecDeque<Transition>,

    /// Generator used by `sample`
    rng: RefCell<StdRng>,
}

impl ReplayBuffer {
    /// Create an empty replay buffer
    ///
    /// # Arguments
    ///
    /// * `num_agents` - Number of agents in every transition
    /// * `state_size` - Observation width per agent
    /// * `action_size` - Action width per agent
    /// * `capacity` - Maximum number of stored transitions
    /// * `seed` - Seed for the sampling generator
    pub fn new(
        num_agents: usize,
        state_size: usize,
        action_size: usize,
        capacity: usize,
        seed: u64,
    ) -> Self {
        Self {
            num_agents,
            state_size,
            action_size,
            capacity,
            memory: VecDeque::new(),
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Record one joint transition
    ///
    /// Each argument holds one entry per agent. Evicts the oldest transition
    /// when the buffer is at capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::AgentCountMismatch`] or
    /// [`ReplayError::DimensionMismatch`] when the inputs disagree with the
    /// buffer's agent count or feature widths. Nothing is stored in that case.
    pub fn add(
        &mut self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
        rewards: &[f32],
        next_states: &[Vec<f32>],
        dones: &[bool],
    ) -> ReplayResult<()> {
        self.push(Transition::new(
            states.to_vec(),
            actions.to_vec(),
            rewards.to_vec(),
            next_states.to_vec(),
            dones.to_vec(),
        ))
    }

    /// Record an already-built transition
    pub fn push(&mut self, transition: Transition) -> ReplayResult<()> {
        transition.validate(self.num_agents, self.state_size, self.action_size)?;

        if self.capacity == 0 {
            return Ok(());
        }
        if self.memory.len() == self.capacity {
            self.memory.pop_front();
        }
        self.memory.push_back(transition);
        Ok(())
    }

    /// Sample a batch using the buffer's seeded generator
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InsufficientData`] if fewer than `batch_size`
    /// transitions are stored.
    pub fn sample(&self, batch_size: usize) -> ReplayResult<Batch> {
        let mut rng = self.rng.borrow_mut();
        self.sample_with(&mut *rng, batch_size)
    }

    /// Sample a batch using a caller-provided generator
    ///
    /// Draws `batch_size` distinct transitions uniformly at random and
    /// reshapes them so every (transition, agent) pair becomes one row.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> ReplayResult<Batch> {
        if batch_size == 0 {
            return Err(ReplayError::InvalidBatchSize);
        }
        if !self.can_sample(batch_size) {
            return Err(ReplayError::InsufficientData {
                requested: batch_size,
                available: self.memory.len(),
            });
        }

        let indices = index::sample(rng, self.memory.len(), batch_size).into_vec();
        Ok(Batch::gather(self, indices))
    }

    /// Whether at least `batch_size` transitions are stored
    pub fn can_sample(&self, batch_size: usize) -> bool {
        self.memory.len() >= batch_size
    }

    /// Number of stored transitions
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Maximum number of stored transitions
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored transitions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.memory.iter()
    }

    /// Transition at `index` in insertion order (0 is the oldest)
    pub fn get(&self, index: usize) -> Option<&Transition> {
        self.memory.get(index)
    }

    /// Drop every stored transition
    pub fn clear(&mut self) {
        self.memory.clear();
    }

    // Getters for buffer dimensions

    /// Number of agents per transition
    pub fn num_agents(&self) -> usize { self.num_agents }
    /// Observation width per agent
    pub fn state_size(&self) -> usize { self.state_size }
    /// Action width per agent
    pub fn action_size(&self) -> usize { self.action_size }
}
