//! Method keys
//!
//! A method key names a generator as `type.member`, where the type part may
//! itself be dot-qualified (`com.example.Generator.build`).

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GenerationError, Result};

const IDENTIFIER: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

static METHOD_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({id}(?:\.{id})*)\.({id})$",
        id = IDENTIFIER
    ))
    .expect("method key pattern is valid")
});

static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{IDENTIFIER}$")).expect("identifier pattern is valid"));

/// Whether `segment` is a single identifier, the grammar used for each
/// dot-separated part of a method key or package.
pub fn is_identifier(segment: &str) -> bool {
    SEGMENT.is_match(segment)
}

/// A parsed method key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    type_name: String,
    member_name: String,
}

impl MethodKey {
    /// Parse `key`, which must consist of at least two dot-separated
    /// identifiers.
    pub fn parse(key: &str) -> Result<Self> {
        let captures = METHOD_KEY
            .captures(key)
            .ok_or_else(|| GenerationError::MalformedKey {
                key: key.to_string(),
            })?;

        Ok(Self {
            type_name: captures[1].to_string(),
            member_name: captures[2].to_string(),
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.member_name)
    }
}

impl FromStr for MethodKey {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
