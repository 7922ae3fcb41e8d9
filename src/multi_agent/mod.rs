//! Multi-agent training infrastructure
//!
//! This module coordinates several independent learners that share one
//! experience replay buffer, as in MADDPG.
//!
//! # Architecture
//!
//! The multi-agent system consists of:
//! - **MultiAgentCoordinator**: Owns the agents and the shared buffer, records
//!   joint transitions and schedules learning
//! - **Agent**: Trait implemented by each learner (act / step / reset)
//! - **MaddpgConfig**: Buffer capacity, batch size and learning cadence
//!
//! # Example
//!
//! ```rust,no_run
//! use maddpg_rl::multi_agent::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut coordinator =
//!     MultiAgentCoordinator::new(2, 24, 2, 0, |init| Ok(NoiseAgent::new(init)))?;
//!
//! let states = vec![vec![0.0; 24]; 2];
//! let actions = coordinator.act(&states, true)?;
//! coordinator.step(0, &states, &actions, &[0.0, 0.0], &states, &[false, false])?;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod coordinator;

pub use agent::{Agent, AgentId, AgentInit, NoiseAgent};
pub use config::MaddpgConfig;
pub use coordinator::{CoordinatorStats, MultiAgentCoordinator, derive_agent_seed};
