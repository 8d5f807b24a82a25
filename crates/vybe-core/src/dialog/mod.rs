//! Multi-step dialog: flows, the step table, terminal actions, and the
//! state machine that ties them together.

pub mod action;
mod flow;
mod machine;
mod step;

pub use flow::Flow;
pub use machine::{Dialog, DialogBuilder, Incoming};
pub use step::{CrossCheck, StepDefinition, StepId, Transition, Validator};
