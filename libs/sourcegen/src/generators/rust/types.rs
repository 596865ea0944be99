//! Type generation for Rust structs

use super::{FieldSpec, StructSpec};
use crate::generators::GeneratorConfig;
use heck::ToSnakeCase;

/// Generate a Rust struct for a struct description
pub fn generate_struct(spec: &StructSpec, config: &GeneratorConfig) -> String {
    let mut code = String::new();

    if config.generate_docs {
        let doc = spec.doc.as_deref().unwrap_or(&spec.name);
        for line in doc.lines() {
            code.push_str(&format!("/// {}\n", line));
        }
    }

    // Generate derive macros
    code.push_str("#[derive(Debug, Clone, PartialEq");
    if config.generate_serde {
        code.push_str(", Serialize, Deserialize");
    }
    code.push_str(")]\n");

    if spec.fields.is_empty() {
        code.push_str(&format!("pub struct {};", spec.name));
        return code;
    }

    // Add serde rename_all for camelCase
    if config.generate_serde {
        code.push_str("#[serde(rename_all = \"camelCase\")]\n");
    }

    code.push_str(&format!("pub struct {} {{\n", spec.name));
    for field in &spec.fields {
        code.push_str(&generate_field(field, config));
    }
    code.push('}');

    code
}

/// Generate a field
fn generate_field(field: &FieldSpec, config: &GeneratorConfig) -> String {
    let mut code = String::new();

    if config.generate_docs {
        if let Some(doc) = &field.doc {
            for line in doc.lines() {
                code.push_str(&format!("    /// {}\n", line));
            }
        }
    }

    if config.generate_serde {
        if field.optional {
            code.push_str("    #[serde(skip_serializing_if = \"Option::is_none\")]\n");
        }

        // keyword fields are renamed in Rust; keep the wire name
        if is_rust_keyword(&field.name.to_snake_case()) {
            code.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
        }
    }

    let field_type = if field.optional {
        format!("Option<{}>", field.ty)
    } else {
        field.ty.clone()
    };

    code.push_str(&format!(
        "    pub {}: {},\n",
        sanitize_field_name(&field.name),
        field_type
    ));

    code
}

/// Sanitize a field name to be a valid Rust identifier
fn sanitize_field_name(name: &str) -> String {
    let snake = name.to_snake_case();

    if is_path_keyword(&snake) {
        // cannot be raw identifiers
        format!("{}_", snake)
    } else if is_rust_keyword(&snake) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

fn is_path_keyword(s: &str) -> bool {
    matches!(s, "crate" | "self" | "Self" | "super")
}

/// Check if a string is a Rust keyword
fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "crate"
            | "self"
            | "Self"
            | "super"
            | "continue"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
            | "gen"
    )
}
