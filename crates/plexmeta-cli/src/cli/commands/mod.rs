//! CLI command handlers, one file per command.

mod completions;
mod download;
mod libraries;

pub use completions::run_completions;
pub use download::run_download;
pub use libraries::run_libraries_list;

#[cfg(test)]
pub(crate) use download::{execute, render_plan, render_report};
#[cfg(test)]
pub(crate) use libraries::render_libraries;
