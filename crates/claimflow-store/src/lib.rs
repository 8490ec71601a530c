//! Claimflow Store - shared entity storage
//!
//! The only shared mutable resource in the system:
//! - One collection per entity type (customers, policies, surveyors, claims)
//! - One `tokio::sync::Mutex` per collection (single writer)
//! - Optional JSON persistence, one array file per collection
//! - Monotonic claim id allocation
//!
//! # Example
//!
//! ```rust,ignore
//! use claimflow_store::{JsonStore, RecordStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonStore::open("./data").await?;
//! let roster = store.list_surveyors().await?;
//! println!("{} surveyors on roster", roster.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod json;
pub mod store;

pub use error::{EntityKind, StoreError};
pub use json::JsonStore;
pub use store::{ClaimFactory, ClaimMutator, PolicyMutator, RecordStore, SurveyorSelector};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
