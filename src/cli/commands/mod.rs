//! CLI command implementations.

mod config;
mod doctor;
mod fetch;
mod list;
mod reduce;
mod serve;
mod summarize;

pub use config::run_config;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use list::run_list;
pub use reduce::run_reduce;
pub use serve::run_serve;
pub use summarize::run_summarize;
