//! Service layer for astra-api.

pub mod history;

pub use history::InMemoryHistory;
