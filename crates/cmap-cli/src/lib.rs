//! Library components for the `cmap` command.

pub mod chat;
pub mod logging;
pub mod output;
pub mod settings;
