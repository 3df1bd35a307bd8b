//! Source data loading.

pub mod loader;

pub use loader::load_csv;
