//! Structured access to media types.
//!
//! A media type such as `application/vnd.api+json` breaks down into a main
//! type (`application`), registration trees (`vnd`), a sub-type (`api`) and a
//! structured-syntax suffix (`json`).

use crate::error::{Error, Result};
use crate::normalize::parse_media_type;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::trace;

/// Separates the main type from the sub-type.
pub const MAIN_SUB_SEPARATOR: char = '/';

/// Introduces a structured-syntax suffix.
pub const SUFFIX_SEPARATOR: char = '+';

/// Separates registration trees from each other and from the sub-type.
pub const TREE_SEPARATOR: char = '.';

/// Read access to the parts of a media type.
pub trait MediaType {
    /// The normalized `main/sub` string.
    fn full_type(&self) -> &str;

    /// The parameters given alongside the type.
    fn parameters(&self) -> &HashMap<String, String>;

    /// The top-level type, e.g. `application`.
    fn main_type(&self) -> &str;

    /// The sub-type with trees and suffix removed.
    fn sub_type(&self) -> &str;

    /// Registration trees preceding the sub-type, in order.
    fn trees(&self) -> &[String];

    /// The suffix following `+`, or an empty string.
    fn suffix(&self) -> &str;

    /// The first tree, or an empty string when there are none.
    fn prefix(&self) -> &str {
        self.trees().first().map(String::as_str).unwrap_or("")
    }
}

/// A media type parsed from a string.
///
/// The type string is split into its parts on first access to any of them.
/// The split happens at most once, including when the value is shared
/// between threads.
///
/// # Examples
///
/// ```
/// use mediatype::{parse, MediaType};
///
/// let media_type = parse("application/vnd.api+json; charset=utf-8").unwrap();
/// assert_eq!(media_type.main_type(), "application");
/// assert_eq!(media_type.prefix(), "vnd");
/// assert_eq!(media_type.sub_type(), "api");
/// assert_eq!(media_type.suffix(), "json");
/// assert_eq!(media_type.parameters()["charset"], "utf-8");
/// ```
#[derive(Debug, Clone)]
pub struct ParsedMediaType {
    full_type: String,
    params: HashMap<String, String>,
    split: OnceCell<Split>,
}

#[derive(Debug, Clone, Default)]
struct Split {
    main_type: String,
    sub_type: String,
    trees: Vec<String>,
    suffix: String,
}

impl Split {
    fn new(full_type: &str) -> Self {
        let mut split = Split::default();

        let (main_type, sub) = match full_type.split_once(MAIN_SUB_SEPARATOR) {
            Some((main_type, sub)) => (main_type, Some(sub)),
            None => (full_type, None),
        };
        split.main_type = main_type.to_string();

        let Some(sub) = sub else {
            return split;
        };

        // Anything after a second '+' is dropped
        let mut suffix_parts = sub.split(SUFFIX_SEPARATOR);
        let unsuffixed = suffix_parts.next().unwrap_or_default();
        split.suffix = suffix_parts.next().unwrap_or_default().to_string();

        let mut trees: Vec<String> = unsuffixed.split(TREE_SEPARATOR).map(str::to_string).collect();
        split.sub_type = trees.pop().unwrap_or_default();
        split.trees = trees;

        split
    }
}

impl ParsedMediaType {
    /// Creates a media type from an already normalized `main/sub` string and
    /// its parameters.
    ///
    /// Nothing is validated here; see [`parse`] for raw input.
    pub fn new(full_type: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            full_type: full_type.into(),
            params,
            split: OnceCell::new(),
        }
    }

    /// Reports whether the type string has been split into its parts yet.
    pub fn is_split(&self) -> bool {
        self.split.get().is_some()
    }

    fn split(&self) -> &Split {
        self.split.get_or_init(|| {
            trace!(full_type = %self.full_type, "splitting media type");
            Split::new(&self.full_type)
        })
    }
}

impl MediaType for ParsedMediaType {
    fn full_type(&self) -> &str {
        &self.full_type
    }

    fn parameters(&self) -> &HashMap<String, String> {
        &self.params
    }

    fn main_type(&self) -> &str {
        &self.split().main_type
    }

    fn sub_type(&self) -> &str {
        &self.split().sub_type
    }

    fn trees(&self) -> &[String] {
        &self.split().trees
    }

    fn suffix(&self) -> &str {
        &self.split().suffix
    }
}

impl FromStr for ParsedMediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parses a raw media type string, parameters included.
///
/// The string is normalized with [`parse_media_type`]; when that fails the
/// error is returned and no media type is produced.
///
/// # Examples
///
/// ```
/// use mediatype::{parse, MediaType};
///
/// let media_type = parse("Text/Plain").unwrap();
/// assert_eq!(media_type.full_type(), "text/plain");
///
/// assert!(parse("text/").is_err());
/// ```
pub fn parse(raw: &str) -> Result<ParsedMediaType> {
    let (full_type, params) = parse_media_type(raw)?;
    Ok(ParsedMediaType::new(full_type, params))
}
