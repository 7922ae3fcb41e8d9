//! # MADDPG-RL
//!
//! Shared experience replay and learning coordination for multi-agent
//! reinforcement learning.
//!
//! Several independent agents act on their own observations but learn from a
//! single replay buffer of joint transitions. The coordinator records each
//! environment step and, on a fixed cadence, lets every agent sample its own
//! batch and update.
//!
//! ## Quick Start
//!
//! ```rust
//! use maddpg_rl::prelude::*;
//!
//! let config = MaddpgConfig::new().buffer_size(1_000).batch_size(8);
//! let mut coordinator =
//!     MultiAgentCoordinator::with_config(2, 4, 2, 42, config, |init| Ok(NoiseAgent::new(init)))
//!         .unwrap();
//!
//! let states = vec![vec![0.0; 4]; 2];
//! for t in 0..16 {
//!     let actions = coordinator.act(&states, true).unwrap();
//!     coordinator.step(t, &states, &actions, &[0.0, 0.0], &states, &[false, false]).unwrap();
//! }
//! assert!(coordinator.stats().learn_cycles > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Shared replay buffer and batch sampling
pub mod buffer;

/// Agent contract and the multi-agent coordinator
pub mod multi_agent;

/// Utility functions and helpers
pub mod utils;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::buffer::{Batch, ReplayBuffer, ReplayError, Transition};
    pub use crate::multi_agent::{
        Agent, AgentInit, MaddpgConfig, MultiAgentCoordinator, NoiseAgent,
    };
}

/// Current version of maddpg-rl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
