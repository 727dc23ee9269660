//! State module for tracking cycle progress
//!
//! # Components
//!
//! - `CycleState`: where a single driver invocation is (settling, extracting,
//!   persisting, paginating) and how it ended

mod cycle_state;

pub use cycle_state::CycleState;
