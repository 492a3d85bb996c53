//! Core domain logic for the Pictor image service.
//!
//! This crate holds the pure, I/O-free pieces shared by the server and the
//! storage backends: the upload validation policy (content-type allow-list
//! and size ceiling) and the stored-name generator that turns a client
//! filename into a collision-resistant storage address.

pub mod error;
pub mod name;
pub mod policy;

pub use error::UploadError;
pub use name::{sanitize_extension, stored_name};
pub use policy::UploadPolicy;
