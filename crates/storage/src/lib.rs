//! Persistence adapters for the roadmap tracker.
//!
//! Remote tables (completions, projects, daily journals) sit behind
//! `async_trait` repository contracts with an in-memory implementation for
//! tests and a PostgREST-style HTTP implementation for the hosted store.
//! The per-goal checklist cache is purely local and file-backed.

#![forbid(unsafe_code)]

pub mod goal_cache;
pub mod repository;
pub mod rest;

pub use goal_cache::{CacheError, GoalChecklistStore};
pub use repository::{
    CompletionRepository, InMemoryRepository, JournalRepository, ProjectRepository, Storage,
    SyncError,
};
pub use rest::{RestConfig, RestInitError, RestRepository};
