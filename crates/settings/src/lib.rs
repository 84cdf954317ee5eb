//! In-memory editor preferences mirrored to local storage.

mod context;
mod merge;
pub mod panel;
mod provider;

pub use context::{SettingsContext, parse_font_size};
pub use merge::merge_with_defaults;
pub use provider::SettingsProvider;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("settings accessed before SettingsProvider::init; the consumer was composed without an initialized provider")]
    Uninitialized,
    #[error("font size `{0}` is not a number")]
    InvalidFontSize(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
