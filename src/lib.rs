//! Generate typed Angular API clients from Swagger/OpenAPI specifications.
//!
//! The [`generation`] domain turns a parsed specification into model and
//! resource descriptors and renders them through templates. The
//! [`infrastructure`] layer supplies loaders, the template engine and
//! filesystem output; [`application`] wires them into use cases.
#![deny(unsafe_code)]

pub mod application;
pub mod generation;
pub mod infrastructure;
