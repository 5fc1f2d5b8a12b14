//! The tutorial tree.
//!
//! Tutorials are narrative pages arranged in a hierarchy with at most one
//! parent per node. The generator receives a synthetic root whose children
//! are the top-level tutorials; the root itself is never rendered.

use serde::{Deserialize, Serialize};

/// The authoring format of a tutorial's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialFormat {
    Markdown,
    Html,
}

impl Default for TutorialFormat {
    fn default() -> Self {
        TutorialFormat::Markdown
    }
}

/// One node of the tutorial tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tutorial {
    /// The identifier used by `{@tutorial}` links and for the output filename.
    pub name: String,
    /// The display title; falls back to the name when no metadata names one.
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub format: TutorialFormat,
    #[serde(default)]
    pub children: Vec<Tutorial>,
}

impl Tutorial {
    pub fn new(name: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Tutorial {
            name: name.into(),
            title: title.into(),
            content: content.into(),
            format: TutorialFormat::Markdown,
            children: Vec::new(),
        }
    }

    /// An empty root node to hang top-level tutorials off.
    pub fn root() -> Self {
        Tutorial::default()
    }

    pub fn with_format(mut self, format: TutorialFormat) -> Self {
        self.format = format;
        self
    }

    /// Finds a tutorial by name anywhere in this subtree, including `self`.
    pub fn get_by_name(&self, name: &str) -> Option<&Tutorial> {
        if self.name == name && !self.name.is_empty() {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.get_by_name(name))
    }

    /// Total number of tutorials in this subtree, excluding the root itself.
    pub fn count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.count()).sum()
    }
}
