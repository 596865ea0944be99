//! Built-in generators
//!
//! Registered under [`STRUCTS_TYPE`]:
//!
//! - `unit`: parameter `pkg.path.TypeName`, emits one unit struct.
//! - `from_json`: parameter is a JSON document describing structs in one
//!   package, emits one file per struct.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::artifact::SourceFile;
use crate::generators::rust::{RustGenerator, StructSpec};
use crate::generators::GeneratorConfig;
use crate::key::is_identifier;
use crate::registry::{GeneratorRegistry, TypeEntry};

pub const STRUCTS_TYPE: &str = "sourcegen.builtin.Structs";

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(
        STRUCTS_TYPE,
        TypeEntry::new()
            .generator("unit", unit)
            .generator("from_json", from_json),
    );
}

/// `pkg.path.TypeName` → one unit struct `TypeName` in `pkg.path`.
pub fn unit(parameter: &str) -> Result<Vec<SourceFile>> {
    let (package, name) = match parameter.rsplit_once('.') {
        Some((package, name)) => (package, name),
        None => ("", parameter),
    };

    validate_type_name(name)?;
    validate_package(package)?;

    let generator = RustGenerator::default();
    Ok(vec![generator.generate(package, &StructSpec::unit(name))])
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StructsDocument {
    #[serde(default)]
    package: String,
    #[serde(default = "default_true")]
    docs: bool,
    #[serde(default = "default_true")]
    serde: bool,
    structs: Vec<StructSpec>,
}

fn default_true() -> bool {
    true
}

/// Render every struct described by the JSON document in `parameter`.
///
/// ```json
/// {
///   "package": "demo.model",
///   "structs": [
///     { "name": "Person", "fields": [ { "name": "givenName", "type": "String" } ] }
///   ]
/// }
/// ```
pub fn from_json(parameter: &str) -> Result<Vec<SourceFile>> {
    let document: StructsDocument =
        serde_json::from_str(parameter).context("parsing struct description")?;

    validate_package(&document.package)?;
    for spec in &document.structs {
        validate_type_name(&spec.name)?;
        for field in &spec.fields {
            if field.name.is_empty() || field.ty.trim().is_empty() {
                bail!("struct {} has a field without a name or type", spec.name);
            }
        }
    }

    let generator = RustGenerator::new(GeneratorConfig {
        generate_docs: document.docs,
        generate_serde: document.serde,
    });

    Ok(document
        .structs
        .iter()
        .map(|spec| generator.generate(&document.package, spec))
        .collect())
}

/// An empty package is the root; otherwise every segment must be an identifier.
fn validate_package(package: &str) -> Result<()> {
    if !package.is_empty() && !package.split('.').all(is_identifier) {
        bail!("invalid package '{}'", package);
    }
    Ok(())
}

fn validate_type_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => bail!("type name must not be empty"),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            bail!("type name '{}' must start with a letter or '_'", name)
        }
        _ => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("type name '{}' contains invalid characters", name);
    }
    Ok(())
}
