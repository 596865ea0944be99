//! Generated source files

use std::path::PathBuf;

use heck::ToSnakeCase;

/// One generated source file: a package-qualified type and its rendered code.
///
/// The pipeline does not look at the contents; it only asks where the file
/// goes and hands it to a writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    package: String,
    type_name: String,
    contents: String,
}

impl SourceFile {
    /// `package` is dot-separated and may be empty for a top-level file.
    pub fn new(
        package: impl Into<String>,
        type_name: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            contents: contents.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// `package.TypeName`, or just `TypeName` without a package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }

    /// Path of this file relative to the output directory: one directory per
    /// package segment, then the snake-cased type name as a `.rs` module.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.rs", self.type_name.to_snake_case()));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn package_segments_become_directories() {
        let file = SourceFile::new("io.example.model", "TestClass", "");
        assert_eq!(
            file.relative_path(),
            Path::new("io").join("example").join("model").join("test_class.rs")
        );
        assert_eq!(file.qualified_name(), "io.example.model.TestClass");
    }

    #[test]
    fn empty_package_writes_at_root() {
        let file = SourceFile::new("", "HttpClient", "");
        assert_eq!(file.relative_path(), Path::new("http_client.rs"));
        assert_eq!(file.qualified_name(), "HttpClient");
    }
}
