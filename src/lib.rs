pub mod announce;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod index;
pub mod lifecycle;
pub mod output;
pub mod store;
pub mod ui;

pub use error::{DocVersionsError, Result};
