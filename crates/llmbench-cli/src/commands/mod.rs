//! CLI command implementations

mod list;
mod run;
mod validate;

pub use list::list;
pub use run::{RunOptions, run};
pub use validate::validate;
