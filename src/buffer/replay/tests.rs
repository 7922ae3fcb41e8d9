//! Scenario tests for the shared replay buffer

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};

use super::*;

const NUM_AGENTS: usize = 2;
const STATE_SIZE: usize = 3;
const ACTION_SIZE: usize = 2;

/// Transition `t` where every value encodes (t, agent) so sampled rows can be
/// traced back to their source
fn tagged_transition(t: usize) -> Transition {
    let tag = |agent: usize| (t * 10 + agent) as f32;
    Transition::new(
        (0..NUM_AGENTS).map(|j| vec![tag(j); STATE_SIZE]).collect(),
        (0..NUM_AGENTS).map(|j| vec![tag(j) + 0.25; ACTION_SIZE]).collect(),
        (0..NUM_AGENTS).map(|j| tag(j) + 0.5).collect(),
        (0..NUM_AGENTS).map(|j| vec![tag(j) + 0.75; STATE_SIZE]).collect(),
        (0..NUM_AGENTS).map(|j| (t + j) % 2 == 0).collect(),
    )
}

fn filled_buffer(capacity: usize, count: usize, seed: u64) -> ReplayBuffer {
    let mut buffer = ReplayBuffer::new(NUM_AGENTS, STATE_SIZE, ACTION_SIZE, capacity, seed);
    for t in 0..count {
        buffer.push(tagged_transition(t)).unwrap();
    }
    buffer
}

#[test]
fn test_capacity_never_exceeded() {
    let mut buffer = ReplayBuffer::new(NUM_AGENTS, STATE_SIZE, ACTION_SIZE, 4, 0);

    for t in 0..10 {
        buffer.push(tagged_transition(t)).unwrap();
        assert!(buffer.len() <= buffer.capacity());
    }
    assert_eq!(buffer.len(), 4);

    // Most recent four, oldest first
    let kept: Vec<_> = buffer.iter().cloned().collect();
    let expected: Vec<_> = (6..10).map(tagged_transition).collect();
    assert_eq!(kept, expected);
}

#[test]
fn test_oldest_transition_evicted() {
    let buffer = filled_buffer(2, 3, 0);

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.get(0), Some(&tagged_transition(1)));
    assert_eq!(buffer.get(1), Some(&tagged_transition(2)));
    assert!(buffer.iter().all(|t| *t != tagged_transition(0)));
}

#[test]
fn test_sample_shapes() {
    let buffer = filled_buffer(100, 20, 7);
    let batch = buffer.sample(8).unwrap();

    let rows = 8 * NUM_AGENTS;
    assert_eq!(batch.len(), rows);
    assert_eq!(batch.batch_size(), 8);
    assert_eq!(batch.states_shape(), (rows, STATE_SIZE));
    assert_eq!(batch.actions_shape(), (rows, ACTION_SIZE));
    assert_eq!(batch.rewards_shape(), (rows, 1));
    assert_eq!(batch.dones_shape(), (rows, 1));

    assert_eq!(batch.states.len(), rows * STATE_SIZE);
    assert_eq!(batch.actions.len(), rows * ACTION_SIZE);
    assert_eq!(batch.rewards.len(), rows);
    assert_eq!(batch.next_states.len(), rows * STATE_SIZE);
    assert_eq!(batch.dones.len(), rows);
}

#[test]
fn test_sample_interleaves_agents_without_replacement() {
    let buffer = filled_buffer(5, 3, 42);
    assert_eq!(buffer.len(), 3);

    let batch = buffer.sample(2).unwrap();

    let unique: HashSet<_> = batch.indices().iter().copied().collect();
    assert_eq!(unique.len(), 2, "a transition was sampled twice");
    assert!(batch.indices().iter().all(|&i| i < 3));

    for (i, &idx) in batch.indices().iter().enumerate() {
        let source = buffer.get(idx).unwrap();
        for agent in 0..NUM_AGENTS {
            let row = i * NUM_AGENTS + agent;
            assert_eq!(batch.state(row), source.states()[agent].as_slice());
            assert_eq!(batch.action(row), source.actions()[agent].as_slice());
            assert_eq!(batch.reward(row), source.rewards()[agent]);
            assert_eq!(batch.next_state(row), source.next_states()[agent].as_slice());
            assert_eq!(batch.done(row), source.dones()[agent]);
        }
    }
}

#[test]
fn test_full_draw_is_a_permutation() {
    let buffer = filled_buffer(10, 6, 3);
    let batch = buffer.sample(6).unwrap();

    let mut seen = batch.indices().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..6).collect::<Vec<_>>());
}

#[test]
fn test_agent_rows() {
    let buffer = filled_buffer(10, 5, 11);
    let batch = buffer.sample(3).unwrap();

    let rows: Vec<_> = batch.agent_rows(1).collect();
    assert_eq!(rows, vec![1, 3, 5]);

    // Agent 1's tag always ends in 1
    for row in rows {
        let tag = batch.state(row)[0] as usize;
        assert_eq!(tag % 10, 1);
    }
}

#[test]
fn test_insufficient_data() {
    let buffer = filled_buffer(10, 3, 0);

    let err = buffer.sample(4).unwrap_err();
    assert_eq!(err, ReplayError::InsufficientData { requested: 4, available: 3 });
    assert!(!buffer.can_sample(4));
    assert!(buffer.can_sample(3));
}

#[test]
fn test_zero_batch_size_rejected() {
    let buffer = filled_buffer(10, 3, 0);
    assert_eq!(buffer.sample(0).unwrap_err(), ReplayError::InvalidBatchSize);
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let a = filled_buffer(50, 30, 1234);
    let b = filled_buffer(50, 30, 1234);

    for _ in 0..5 {
        assert_eq!(a.sample(4).unwrap(), b.sample(4).unwrap());
    }
}

#[test]
fn test_sample_with_external_rng() {
    let buffer = filled_buffer(50, 30, 0);

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let first = buffer.sample_with(&mut rng_a, 5).unwrap();
    let second = buffer.sample_with(&mut rng_b, 5).unwrap();

    assert_eq!(first.indices(), second.indices());
    assert_eq!(buffer.len(), 30, "sampling must not consume transitions");
}
