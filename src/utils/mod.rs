//! Utility functions and helpers

pub mod noise;

pub use noise::OrnsteinUhlenbeck;
