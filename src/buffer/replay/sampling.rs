//! Batch reshaping for per-agent training
//!
//! A sampled batch flattens the agent dimension into the leading axis: row
//! `i * num_agents + j` holds agent `j`'s slice of the `i`-th sampled
//! transition. Every array is stored row-major in a flat `Vec<f32>`.

use super::storage::ReplayBuffer;

/// Sampled transitions reshaped for per-agent networks
///
/// Shapes, with `rows = batch_size * num_agents`:
/// - `states`, `next_states`: \[rows, state_size\]
/// - `actions`: \[rows, action_size\]
/// - `rewards`, `dones`: \[rows, 1\]
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Flattened observations \[rows, state_size\]
    pub states: Vec<f32>,

    /// Flattened actions \[rows, action_size\]
    pub actions: Vec<f32>,

    /// Per-agent rewards \[rows, 1\]
    pub rewards: Vec<f32>,

    /// Flattened next observations \[rows, state_size\]
    pub next_states: Vec<f32>,

    /// Per-agent done flags as 0.0 / 1.0 \[rows, 1\]
    pub dones: Vec<f32>,

    /// Buffer positions of the sampled transitions, in row order
    indices: Vec<usize>,

    num_agents: usize,
    state_size: usize,
    action_size: usize,
}

impl Batch {
    /// Gather the transitions at `indices` and flatten them per agent
    pub(super) fn gather(buffer: &ReplayBuffer, indices: Vec<usize>) -> Self {
        let num_agents = buffer.num_agents();
        let state_size = buffer.state_size();
        let action_size = buffer.action_size();
        let rows = indices.len() * num_agents;

        let mut states = Vec::with_capacity(rows * state_size);
        let mut actions = Vec::with_capacity(rows * action_size);
        let mut rewards = Vec::with_capacity(rows);
        let mut next_states = Vec::with_capacity(rows * state_size);
        let mut dones = Vec::with_capacity(rows);

        for &idx in &indices {
            let transition = &buffer.memory[idx];
            for agent in 0..num_agents {
                states.extend_from_slice(&transition.states()[agent]);
                actions.extend_from_slice(&transition.actions()[agent]);
                rewards.push(transition.rewards()[agent]);
                next_states.extend_from_slice(&transition.next_states()[agent]);
                dones.push(if transition.dones()[agent] { 1.0 } else { 0.0 });
            }
        }

        Self {
            states,
            actions,
            rewards,
            next_states,
            dones,
            indices,
            num_agents,
            state_size,
            action_size,
        }
    }

    /// Number of rows (`batch_size * num_agents`)
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Check if batch is empty
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Number of sampled transitions
    pub fn batch_size(&self) -> usize {
        self.indices.len()
    }

    /// Number of agents per sampled transition
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Buffer positions that were sampled, oldest-first numbering
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Shape of `states` and `next_states`
    pub fn states_shape(&self) -> (usize, usize) {
        (self.len(), self.state_size)
    }

    /// Shape of `actions`
    pub fn actions_shape(&self) -> (usize, usize) {
        (self.len(), self.action_size)
    }

    /// Shape of `rewards`
    pub fn rewards_shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }

    /// Shape of `dones`
    pub fn dones_shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }

    /// Observation row
    pub fn state(&self, row: usize) -> &[f32] {
        &self.states[row * self.state_size..(row + 1) * self.state_size]
    }

    /// Action row
    pub fn action(&self, row: usize) -> &[f32] {
        &self.actions[row * self.action_size..(row + 1) * self.action_size]
    }

    /// Next observation row
    pub fn next_state(&self, row: usize) -> &[f32] {
        &self.next_states[row * self.state_size..(row + 1) * self.state_size]
    }

    /// Reward for a row
    pub fn reward(&self, row: usize) -> f32 {
        self.rewards[row]
    }

    /// Done flag for a row
    pub fn done(&self, row: usize) -> bool {
        self.dones[row] > 0.5
    }

    /// Rows that belong to `agent`, one per sampled transition
    pub fn agent_rows(&self, agent: usize) -> impl Iterator<Item = usize> + '_ {
        debug_assert!(
            agent < self.num_agents,
            "agent {} >= num_agents {}",
            agent,
            self.num_agents
        );
        (0..self.batch_size()).map(move |i| i * self.num_agents + agent)
    }
}

/// Batch converted to libtorch tensors
#[cfg(feature = "tensor")]
#[derive(Debug)]
pub struct BatchTensors {
    /// \[rows, state_size\]
    pub states: tch::Tensor,
    /// \[rows, action_size\]
    pub actions: tch::Tensor,
    /// \[rows, 1\]
    pub rewards: tch::Tensor,
    /// \[rows, state_size\]
    pub next_states: tch::Tensor,
    /// \[rows, 1\]
    pub dones: tch::Tensor,
}

#[cfg(feature = "tensor")]
impl Batch {
    /// Move the batch onto `device` as float tensors of the documented shapes
    pub fn to_tensors(&self, device: tch::Device) -> BatchTensors {
        use tch::Tensor;

        let rows = self.len() as i64;
        let state_size = self.state_size as i64;
        let action_size = self.action_size as i64;

        BatchTensors {
            states: Tensor::from_slice(&self.states).view([rows, state_size]).to_device(device),
            actions: Tensor::from_slice(&self.actions).view([rows, action_size]).to_device(device),
            rewards: Tensor::from_slice(&self.rewards).view([rows, 1]).to_device(device),
            next_states: Tensor::from_slice(&self.next_states)
                .view([rows, state_size])
                .to_device(device),
            dones: Tensor::from_slice(&self.dones).view([rows, 1]).to_device(device),
        }
    }
}
