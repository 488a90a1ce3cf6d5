//! Front-matter parsing.
//!
//! This module provides:
//! - A tagged value type for front-matter fields
//! - An insertion-ordered mapping of those values
//! - A lenient, line-oriented parser that never fails

pub mod parser;
pub mod types;

pub use parser::{DELIMITER, parse, split};
pub use types::{Frontmatter, FrontmatterValue};
