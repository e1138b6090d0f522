//! Query resolution over a term index.

pub mod engine;

pub use engine::{QueryEngine, TermMatch};
