//! Steps and the chains that compose them.
//!
//! A [`Step`] turns one [`Value`](crate::value::Value) into a tri-state
//! [`StepResult`]: continue with a value, stop early with a value, or fail.
//! A [`Chain`] is an immutable, persistent sequence of steps. Extending a
//! chain with [`Chain::then`] returns a new chain that shares every earlier
//! stage with its parent, so branching never disturbs sibling chains.

mod report;
mod stage;
mod step;

pub use report::{ChainReport, DEFAULT_LABEL, Label};
pub use stage::Chain;
pub use step::{
    Step, StepResult, array_of, by_default, converting_step, fallible_step, identity, optional,
    stop_when_missing, validation_step,
};
