//! docsmith generates a static HTML documentation site from a doclet dump.
//!
//! The input is the JSON doclet collection a documentation parser produces:
//! one record per documented symbol, plus optional narrative tutorials and a
//! readme. [`publish`] runs the whole batch in one synchronous pass and
//! writes class, module, namespace, mixin, external and interface pages, a
//! navigation sidebar shared by every page, pretty-printed source listings,
//! tutorial pages, and the home and globals pages.
//!
//! ```no_run
//! use docsmith::{publish, PublishOptions, Tutorial};
//!
//! # fn main() -> Result<(), docsmith::PublishError> {
//! let doclets = serde_json::from_str(&std::fs::read_to_string("doclets.json")?)?;
//! let options = PublishOptions {
//!     destination: "docs/api".into(),
//!     ..PublishOptions::default()
//! };
//! let report = publish(doclets, &options, Tutorial::root())?;
//! println!("wrote {} pages", report.pages);
//! # Ok(())
//! # }
//! ```
//!
//! The member crates carry the pieces: `docsmith-model` holds the doclet and
//! tutorial records, `docsmith-store` the queryable collection,
//! `docsmith-links` the URL registry and inline-tag resolution,
//! `docsmith-render` the signature, navigation and markdown formatting, and
//! `docsmith-templates` the handlebars view layer. This crate owns the
//! options, the publish pass itself, the tutorials loader and the CLI.

pub mod assets;
pub mod config;
pub mod error;
pub mod publish;
pub mod tutorials;
pub mod viewmodel;

pub use config::{PublishOptions, TemplateConfig};
pub use error::PublishError;
pub use publish::{publish, PublishReport};
pub use tutorials::load_tutorials;

// The data types callers hand to `publish`.
pub use docsmith_model::{Doclet, DocletKind, Tutorial, TutorialFormat};
pub use docsmith_store::DocletStore;
