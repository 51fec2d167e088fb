// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hookbar Store
//!
//! Everything hookbar keeps on disk.
//!
//! This crate provides:
//!
//! - **Settings**: User preferences loaded from `settings.json`
//! - **Status sinks**: The status file and the terminal title
//! - **Persistence**: Atomic file and JSON helpers
//!
//! ## Usage
//!
//! ```ignore
//! use hookbar_store::{Settings, StatusFile, StatusSink, default_settings_path};
//!
//! let settings = Settings::load_or_default(&default_settings_path()).await;
//! let sink = StatusFile::new(&settings.status_file);
//! sink.publish(&line).await?;
//! ```

pub mod error;
pub mod persistence;
pub mod settings;
pub mod status;

pub use error::StoreError;
pub use persistence::{
    config_root, default_config_dir, default_settings_path, default_status_path, load_json,
    load_json_or_default, save_json, write_text,
};
pub use settings::Settings;
pub use status::{StatusFile, StatusSink, TerminalTitle};
