//! Storage module for persisting collected pages
//!
//! Each page is persisted as one JSON file named by its page number,
//! written atomically so that an interrupted run never leaves a
//! half-written page behind. The module also answers the existence and
//! enumeration queries the orchestrator needs for resumption.

mod json_store;
mod traits;

pub use json_store::JsonPageStore;
pub use traits::{PageStore, StoreError, StoreResult};
