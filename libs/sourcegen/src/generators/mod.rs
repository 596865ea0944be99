//! Generators shipped with this crate
//!
//! [`rust`] renders Rust source from a small struct description and
//! [`builtin`] exposes it as generators callable through the registry.

pub mod builtin;
pub mod rust;

/// Configuration options for rendered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,
    /// Whether to generate serde derive macros (for serialization)
    pub generate_serde: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            generate_serde: true,
        }
    }
}
