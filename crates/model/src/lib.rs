//! Data model for the docsmith documentation generator.
//!
//! This crate defines the in-memory representation of the records the
//! generator consumes:
//!
//! - [`Doclet`]: one documentation record describing a code entity, as
//!   produced by the host parser's JSON dump
//! - [`Tutorial`]: one node of the narrative documentation tree
//!
//! Doclets are free-form attribute bags in the host format; the struct keeps
//! every field optional (apart from `kind` and `longname`) and ignores
//! attributes it does not know about. The publish pipeline annotates doclets
//! in place through the `attribs`, `signature`, `id`, `ancestors` and
//! `shortpath` fields, which are never populated by the host.

pub mod doclet;
pub mod tutorial;

pub use doclet::{
    DocMeta, Doclet, DocletKind, Deprecation, Example, Param, ReturnDoc, Scope, TypeExpr,
};
pub use tutorial::{Tutorial, TutorialFormat};
