//! Core of plexmeta: enumerate Plex library sections and download their
//! artwork into Kometa-style asset folders.

pub mod config;
pub mod logging;

pub mod downloader;
pub mod enumerator;
pub mod error;
pub mod http;
pub mod model;
pub mod naming;
pub mod orchestrator;
pub mod report;
pub mod request;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
