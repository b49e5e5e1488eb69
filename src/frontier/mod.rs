//! Frontier module: the shared coordination point of a crawl
//!
//! This module contains:
//! - A bounded-wait, multi-producer/multi-consumer work queue
//! - The frontier store (seen set, queues, discovered index, counters, shutdown)

mod queue;
mod store;

pub use queue::WorkQueue;
pub use store::{FrontierStore, StoreSnapshot};
