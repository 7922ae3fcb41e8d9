//! Shared replay buffer for multi-agent off-policy learning
//!
//! This module implements experience storage for MADDPG-style training:
//! - Joint transition storage (one entry per environment step, not per agent)
//! - Oldest-first eviction once the buffer reaches capacity
//! - Uniform sampling without replacement, reshaped for per-agent learners
//!
//! # Batch Layout
//!
//! Sampled batches flatten the agent dimension into the leading axis:
//! - `states` / `next_states`: `[batch_size * num_agents, state_size]`
//! - `actions`: `[batch_size * num_agents, action_size]`
//! - `rewards` / `dones`: `[batch_size * num_agents, 1]`
//!
//! Deferring the per-agent split to sampling time keeps storage independent of
//! how agents consume it.

mod error;
mod sampling;
mod storage;

#[cfg(test)]
mod tests;

pub use error::{ReplayError, ReplayResult};
#[cfg(feature = "tensor")]
pub use sampling::BatchTensors;
pub use sampling::Batch;
pub use storage::{ReplayBuffer, Transition};
