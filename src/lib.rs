//! Swagger 2 documents to typed TypeScript request functions.
//!
//! [`transform`] resolves a [`SwaggerDocument`] into endpoint and interface
//! descriptors; a [`generators::Generator`] renders those into source text.

pub mod config;
pub mod generators;
pub mod interface_processor;
pub mod naming;
pub mod operation_processor;
pub mod parsers;
pub mod schema_processor;
pub mod transform;

pub use parsers::SwaggerDocument;
pub use schema_processor::TypeDescriptor;
pub use transform::{transform, TransformedModel};
