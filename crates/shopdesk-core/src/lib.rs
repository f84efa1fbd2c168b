//! Shopdesk Core - Catalog types, form inputs, configuration and error handling

pub mod config;
pub mod error;
pub mod form;
pub mod inputs;
pub mod types;

pub use config::ShopdeskConfig;
pub use error::{Error, Result};
pub use form::{FormData, FormField, ImageFile};
pub use inputs::*;
pub use types::*;
