/* src/lib.rs */

//! Apache-style directory index pages for static file servers.
//!
//! The host decides that a request targets a directory, then hands the
//! path, query string and [`Options`] to [`list`] and sends back the HTML.

pub mod context;
pub mod error;
pub mod listing;
pub mod options;
pub mod page;
pub mod path;
pub mod render;
pub mod resource;
pub mod sort;

pub use context::PageContext;
pub use error::Error;
pub use listing::{list, list_with_context};
pub use options::Options;
pub use resource::Resource;
