//! Core traits defined in `civiport-core` and implemented by other crates.

pub mod counter;

pub use counter::CounterStore;
