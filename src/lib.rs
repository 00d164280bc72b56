//! # TD Connect Four
//!
//! Connect Four matches between interchangeable players, some of which
//! improve through self-play reinforcement learning. The value learners
//! score afterstates with a linear function over open-line features and
//! train either online (TD(0)) or from batched experience replay.
//!
//! ## Modules
//!
//! - [`game`] — Board engine: grid, move legality, win detection, state ids
//! - [`ai`] — Player trait, random/human players, features, TD learners
//! - [`arena`] — Match orchestrator and reward protocol
//! - [`training`] — Self-play session driver and rolling statistics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
