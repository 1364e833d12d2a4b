//! Series tracker application library.
//!
//! Exposes the building blocks (config, shell, store, id policy) so
//! integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod ids;
pub mod shell;
pub mod store;

pub use config::AppConfig;
pub use shell::{AppShell, ShellError, ShellResult};
pub use store::{SeriesStore, StoreMode};
