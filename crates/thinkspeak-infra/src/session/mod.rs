//! Session authority implementations.

mod memory;

pub use memory::InMemorySessionStore;
