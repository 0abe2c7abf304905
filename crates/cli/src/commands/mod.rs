//! Command implementations.

mod compare;
mod info;
mod synth;
mod validate;

pub use compare::run_compare;
pub use info::run_info;
pub use synth::run_synth;
pub use validate::run_validate;
