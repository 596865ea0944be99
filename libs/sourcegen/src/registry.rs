//! Generator registry and dynamic invocation
//!
//! Generators are looked up by [`MethodKey`]: the type part selects a
//! [`TypeEntry`], the member part selects a callable on it. Only static
//! members taking a single string parameter can be invoked; anything else
//! with a matching name is treated as absent.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::anyhow;

use crate::artifact::SourceFile;
use crate::error::{GenerationError, Result};
use crate::key::MethodKey;

/// Files produced by a generator, possibly lazily.
pub type Artifacts = Box<dyn Iterator<Item = SourceFile>>;

type UnaryFn = Arc<dyn Fn(&str) -> anyhow::Result<Artifacts> + Send + Sync>;
type NullaryFn = Arc<dyn Fn() -> anyhow::Result<Artifacts> + Send + Sync>;

/// The shape of a registered member.
#[derive(Clone)]
pub enum Callable {
    Nullary(NullaryFn),
    Unary(UnaryFn),
}

impl Callable {
    pub fn unary<F, I>(f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator<Item = SourceFile>,
        I::IntoIter: 'static,
    {
        Callable::Unary(Arc::new(move |parameter: &str| {
            f(parameter).map(|files| Box::new(files.into_iter()) as Artifacts)
        }))
    }

    pub fn nullary<F, I>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator<Item = SourceFile>,
        I::IntoIter: 'static,
    {
        Callable::Nullary(Arc::new(move || {
            f().map(|files| Box::new(files.into_iter()) as Artifacts)
        }))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Nullary(_) => f.write_str("Callable::Nullary"),
            Callable::Unary(_) => f.write_str("Callable::Unary"),
        }
    }
}

/// Whether a member needs an instance to be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Static,
    Instance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    receiver: Receiver,
    callable: Callable,
}

impl Member {
    fn as_generator(&self) -> Option<&UnaryFn> {
        match (&self.callable, self.receiver) {
            (Callable::Unary(function), Receiver::Static) => Some(function),
            _ => None,
        }
    }
}

/// A named type and the members registered on it.
#[derive(Debug, Clone, Default)]
pub struct TypeEntry {
    visibility: Visibility,
    members: Vec<Member>,
}

impl TypeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the type as inaccessible; resolving any of its members fails with
    /// [`GenerationError::AccessDenied`].
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Register a static generator taking one string parameter.
    pub fn generator<F, I>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator<Item = SourceFile>,
        I::IntoIter: 'static,
    {
        self.member(name, Receiver::Static, Callable::unary(f))
    }

    /// Register an arbitrary member. Names may repeat.
    pub fn member(mut self, name: impl Into<String>, receiver: Receiver, callable: Callable) -> Self {
        self.members.push(Member {
            name: name.into(),
            receiver,
            callable,
        });
        self
    }

    fn find_generator(&self, name: &str) -> Option<&UnaryFn> {
        self.members
            .iter()
            .filter(|member| member.name == name)
            .find_map(Member::as_generator)
    }
}

/// Registry of every type generators can be resolved from.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    types: HashMap<String, TypeEntry>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the generators shipped with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::generators::builtin::register(&mut registry);
        registry
    }

    /// Add or replace a type. Returns the entry previously registered under
    /// that name.
    pub fn register(&mut self, type_name: impl Into<String>, entry: TypeEntry) -> Option<TypeEntry> {
        self.types.insert(type_name.into(), entry)
    }

    pub fn with_type(mut self, type_name: impl Into<String>, entry: TypeEntry) -> Self {
        self.register(type_name, entry);
        self
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Keys of every invocable generator, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .types
            .iter()
            .filter(|(_, entry)| entry.visibility == Visibility::Public)
            .flat_map(|(type_name, entry)| {
                entry
                    .members
                    .iter()
                    .filter(|member| member.as_generator().is_some())
                    .map(move |member| format!("{}.{}", type_name, member.name))
            })
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Find the generator named by `key`.
    pub fn resolve(&self, key: &MethodKey) -> Result<Generator<'_>> {
        let entry = self
            .types
            .get(key.type_name())
            .ok_or_else(|| GenerationError::TypeNotFound {
                type_name: key.type_name().to_string(),
            })?;

        let function =
            entry
                .find_generator(key.member_name())
                .ok_or_else(|| GenerationError::MemberNotFound {
                    type_name: key.type_name().to_string(),
                    member_name: key.member_name().to_string(),
                })?;

        if entry.visibility == Visibility::Private {
            return Err(GenerationError::AccessDenied {
                key: key.to_string(),
            });
        }

        tracing::debug!(key = %key, "resolved generator");

        Ok(Generator {
            key: key.to_string(),
            function,
        })
    }

    /// Resolve `key` and call it with `parameter`.
    pub fn invoke(&self, key: &MethodKey, parameter: &str) -> Result<Vec<SourceFile>> {
        self.resolve(key)?.invoke(parameter)
    }
}

/// A resolved generator, ready to be called.
pub struct Generator<'r> {
    key: String,
    function: &'r UnaryFn,
}

impl Generator<'_> {
    /// Call the generator and drain everything it returns.
    ///
    /// Errors and panics raised by the generator, including while its
    /// iterator is being consumed, become [`GenerationError::InvocationFailed`].
    pub fn invoke(&self, parameter: &str) -> Result<Vec<SourceFile>> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            (self.function)(parameter).map(|files| files.collect::<Vec<_>>())
        }));

        let source = match outcome {
            Ok(Ok(files)) => {
                tracing::debug!(key = %self.key, files = files.len(), "generator returned");
                return Ok(files);
            }
            Ok(Err(source)) => source,
            Err(payload) => anyhow!("panicked: {}", panic_message(payload.as_ref())),
        };

        Err(GenerationError::InvocationFailed {
            key: self.key.clone(),
            source,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn file(name: &str) -> SourceFile {
        SourceFile::new("p", name, "")
    }

    fn registry() -> GeneratorRegistry {
        GeneratorRegistry::new()
            .with_type(
                "test.Factory",
                TypeEntry::new()
                    .generator("named", |name: &str| Ok(vec![file(name)]))
                    .generator("failing", |_: &str| -> anyhow::Result<Vec<SourceFile>> {
                        anyhow::bail!("no name given")
                    })
                    .generator("panicking", |_: &str| -> anyhow::Result<Vec<SourceFile>> {
                        panic!("boom")
                    })
                    .generator("lazy", |parameter: &str| {
                        let owned = parameter.to_string();
                        Ok((0..3).map(move |i| file(&format!("{owned}{i}"))))
                    })
                    .member("nullary", Receiver::Static, Callable::nullary(|| Ok(Vec::new())))
                    .member(
                        "instance",
                        Receiver::Instance,
                        Callable::unary(|_: &str| Ok(Vec::new())),
                    )
                    .member("overloaded", Receiver::Static, Callable::nullary(|| Ok(Vec::new())))
                    .generator("overloaded", |_: &str| Ok(vec![file("Overloaded")])),
            )
            .with_type(
                "test.Hidden",
                TypeEntry::new()
                    .private()
                    .generator("named", |name: &str| Ok(vec![file(name)])),
            )
    }

    fn invoke_kind(key: &str, parameter: &str) -> ErrorKind {
        let key = MethodKey::parse(key).unwrap();
        registry().invoke(&key, parameter).unwrap_err().kind()
    }

    #[test]
    fn invokes_unary_static_member() {
        let key = MethodKey::parse("test.Factory.named").unwrap();
        let files = registry().invoke(&key, "TestClass").unwrap();
        assert_eq!(files, vec![file("TestClass")]);
    }

    #[test]
    fn unknown_type() {
        assert_eq!(invoke_kind("NoSuch.Class.method", ""), ErrorKind::TypeNotFound);
    }

    #[test]
    fn unknown_or_mismatched_member_is_not_found() {
        assert_eq!(invoke_kind("test.Factory.missing", ""), ErrorKind::MemberNotFound);
        assert_eq!(invoke_kind("test.Factory.nullary", ""), ErrorKind::MemberNotFound);
        assert_eq!(invoke_kind("test.Factory.instance", ""), ErrorKind::MemberNotFound);
    }

    #[test]
    fn overload_with_matching_signature_is_chosen() {
        let key = MethodKey::parse("test.Factory.overloaded").unwrap();
        let files = registry().invoke(&key, "").unwrap();
        assert_eq!(files, vec![file("Overloaded")]);
    }

    #[test]
    fn generator_errors_and_panics_are_invocation_failures() {
        assert_eq!(invoke_kind("test.Factory.failing", ""), ErrorKind::InvocationFailed);
        assert_eq!(invoke_kind("test.Factory.panicking", ""), ErrorKind::InvocationFailed);
    }

    #[test]
    fn panic_message_is_kept() {
        let key = MethodKey::parse("test.Factory.panicking").unwrap();
        let err = registry().invoke(&key, "").unwrap_err();
        assert!(err.to_string().contains("panicked: boom"), "{err}");
    }

    #[test]
    fn private_type_is_access_denied() {
        assert_eq!(invoke_kind("test.Hidden.named", "X"), ErrorKind::AccessDenied);
    }

    #[test]
    fn lazy_results_are_materialised_in_order() {
        let key = MethodKey::parse("test.Factory.lazy").unwrap();
        let names: Vec<String> = registry()
            .invoke(&key, "T")
            .unwrap()
            .iter()
            .map(|f| f.type_name().to_string())
            .collect();
        assert_eq!(names, vec!["T0", "T1", "T2"]);
    }

    #[test]
    fn keys_lists_invocable_generators_only() {
        let keys = registry().keys();
        assert_eq!(
            keys,
            vec![
                "test.Factory.failing",
                "test.Factory.lazy",
                "test.Factory.named",
                "test.Factory.overloaded",
                "test.Factory.panicking",
            ]
        );
    }

    #[test]
    fn builtin_registry_exposes_struct_generators() {
        let registry = GeneratorRegistry::builtin();
        assert!(registry.contains_type(crate::generators::builtin::STRUCTS_TYPE));
        assert!(!registry.keys().is_empty());
    }
}
