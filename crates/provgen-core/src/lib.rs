pub mod artifact;
pub mod collect;
pub mod config;
pub mod error;
pub mod generate;
pub mod io;
pub mod params;
pub mod publish;
pub mod regions;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod service;
pub mod types;
pub mod workflow;

pub use error::{ProvgenError, Result};
