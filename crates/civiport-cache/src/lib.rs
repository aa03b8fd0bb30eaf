//! # civiport-cache
//!
//! Single-process implementation of the [`CounterStore`] trait plus a
//! background purge task. The trackers built on this store are scoped to
//! one running instance; a multi-instance deployment must swap in a
//! shared-store implementation to keep failure counting correct.
//!
//! [`CounterStore`]: civiport_core::traits::CounterStore

pub mod memory;
pub mod purge;

pub use memory::MemoryCounterStore;
pub use purge::spawn_purge;
