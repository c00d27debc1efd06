//! File-backed record store under the `.cadence/` data directory.
//!
//! One pretty-printed JSON document per record, named by its natural key.
//! All writes go through advisory file locks so concurrent CLI invocations
//! serialize at the persistence boundary.

pub mod activities;
pub mod config;
pub mod data_dir;
pub mod evidence;
pub mod locking;
pub mod mechanisms;

pub use config::{load_config, store_config, Config};
pub use data_dir::DataDir;
pub use locking::StoreLock;
