//! Blog storage implementations.

mod memory;
mod seed;

pub use memory::MemoryStore;
pub use seed::{SeedOptions, seed};

#[cfg(test)]
mod tests;
