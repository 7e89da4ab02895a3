pub mod clear;

pub use clear::{ClearAction, ClearOutcome, Interaction};
