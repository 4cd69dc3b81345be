//! Stack definitions and definition file loading

mod data;
pub mod loader;

pub use data::{distinct_services, Definition, ResourceSpec, Service};
pub use loader::{load_default_definitions, load_definitions, load_definitions_from_reader};
