//! Experience storage for off-policy training
//!
//! The replay buffer keeps a bounded window of joint multi-agent transitions
//! and hands out uniformly sampled batches reshaped for per-agent learners.

pub mod replay;

pub use replay::{Batch, ReplayBuffer, ReplayError, Transition};
