//! vigil-core library.
//!
//! Tracks per-user last-activity timestamps, evaluates which tagged members
//! have gone silent, and packs report text into bounded pages.

pub mod config;
pub mod db;
pub mod error;
pub mod evaluate;
pub mod ledger;
pub mod report;
pub mod schedule;
pub mod snapshot;
