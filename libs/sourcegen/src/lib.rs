//! Source Generation Adapter
//!
//! Runs named source generators and writes the files they return into an
//! output directory, typically as a build step.
//!
//! ## Architecture
//!
//! A run takes an output path and a map from method key (`type.member`) to a
//! single string parameter:
//! 1. **Output directory**: validated or created once; failure ends the run
//! 2. **Registry**: each key is parsed and resolved to a generator, which is
//!    called with its parameter
//! 3. **Writer**: every returned [`SourceFile`] is written below the output
//!    directory
//!
//! Failures are never short-circuited between entries or files. They are
//! accumulated with [`Validation`] and returned as one list.
//!
//! ```no_run
//! use sourcegen::{GenerateConfig, GenerateSources, GeneratorRegistry, MethodParameters};
//!
//! let mut methods = MethodParameters::new();
//! methods.insert(
//!     "sourcegen.builtin.Structs.unit".to_string(),
//!     "demo.model.Marker".to_string(),
//! );
//!
//! let generate = GenerateSources::new(GeneratorRegistry::builtin());
//! let errors = generate
//!     .run(GenerateConfig::new("src/generated", methods))
//!     .expect("all arguments supplied");
//! assert!(errors.is_empty());
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod generators;
pub mod key;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod validation;
pub mod writer;

pub use artifact::SourceFile;
pub use config::{ConfigError, GenerateConfig, MethodParameters, DEFAULT_OUTPUT_PATH};
pub use error::{ContractViolation, ErrorKind, GenerationError, Result};
pub use key::MethodKey;
pub use output::OutputDirectory;
pub use pipeline::GenerateSources;
pub use registry::{Callable, GeneratorRegistry, Receiver, TypeEntry, Visibility};
pub use validation::{Accumulate, Errors, Validation};
pub use writer::{ArtifactWriter, FsWriter};
