//! Rust code generator for plain data structs

mod types;

use serde::Deserialize;

use crate::artifact::SourceFile;
use crate::generators::GeneratorConfig;

/// Description of one struct to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructSpec {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Description of one struct field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    /// Rust type of the field, copied into the output verbatim.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

impl StructSpec {
    /// A struct with no fields.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }
}

/// Rust code generator
#[derive(Debug, Clone, Default)]
pub struct RustGenerator {
    config: GeneratorConfig,
}

impl RustGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render `spec` as a standalone module in `package`.
    pub fn generate(&self, package: &str, spec: &StructSpec) -> SourceFile {
        SourceFile::new(package, spec.name.clone(), self.generate_module(package, spec))
    }

    fn generate_module(&self, package: &str, spec: &StructSpec) -> String {
        let mut code = String::new();

        // Header comment
        code.push_str(&format!("//! {} type definition\n", spec.name));
        if !package.is_empty() {
            code.push_str(&format!("//! Package: {}\n", package));
        }
        code.push_str("//!\n//! @generated by sourcegen. Do not edit by hand.\n\n");

        if self.config.generate_serde {
            code.push_str("use serde::{Deserialize, Serialize};\n\n");
        }

        code.push_str(&types::generate_struct(spec, &self.config));
        code.push('\n');

        code
    }
}
