//! Media type parsing with structured access to its parts.
//!
//! This crate provides:
//! - Media type normalization with parameters (RFC 2045, RFC 2616, RFC 2231)
//! - Decomposition of a type into main type, registration trees, sub-type
//!   and structured-syntax suffix (RFC 6838)
//!
//! ```
//! use mediatype::{parse, MediaType};
//!
//! let media_type = parse("application/vnd.criticalstack.swift.plus.v1").unwrap();
//! assert_eq!(media_type.trees(), ["vnd", "criticalstack", "swift", "plus"]);
//! assert_eq!(media_type.sub_type(), "v1");
//! ```

pub mod error;
pub mod grammar;
pub mod media_type;
pub mod normalize;

// Re-export commonly used types
pub use error::{Error, Result};
pub use media_type::{
    parse, MediaType, ParsedMediaType, MAIN_SUB_SEPARATOR, SUFFIX_SEPARATOR, TREE_SEPARATOR,
};
pub use normalize::parse_media_type;
