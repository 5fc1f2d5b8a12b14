// src/tutorials.rs
//! Loads the tutorial tree from a directory of narrative source files.
//!
//! A tutorial is any `.md`/`.markdown`/`.html`/`.htm` file; its name is the
//! file stem. A sibling `.json` file with the same stem may set the display
//! title and declare child tutorials by name. Tutorials nobody claims as a
//! child become children of the synthetic root.

use crate::error::PublishError;
use docsmith_model::{Tutorial, TutorialFormat};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default, Deserialize)]
struct TutorialMeta {
    title: Option<String>,
    #[serde(default)]
    children: Vec<String>,
}

/// Scans `dir` recursively and assembles the tutorial tree.
///
/// Two source files with the same stem are an error; a metadata child that
/// does not exist, or that another tutorial already claimed, is logged and
/// skipped.
pub fn load_tutorials(dir: &Path) -> Result<Tutorial, PublishError> {
    let mut order: Vec<String> = Vec::new();
    let mut pool: HashMap<String, Tutorial> = HashMap::new();
    let mut metas: Vec<(String, TutorialMeta)> = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let (Some(stem), Some(extension)) = (path.file_stem(), path.extension()) else {
            continue;
        };
        let name = stem.to_string_lossy().to_string();

        let format = match extension.to_string_lossy().to_ascii_lowercase().as_str() {
            "md" | "markdown" => TutorialFormat::Markdown,
            "html" | "htm" => TutorialFormat::Html,
            "json" => {
                let meta: TutorialMeta = serde_json::from_str(&fs::read_to_string(path)?)?;
                metas.push((name, meta));
                continue;
            }
            _ => continue,
        };

        if pool.contains_key(&name) {
            return Err(PublishError::Tutorial(format!(
                "duplicate tutorial name '{}' at {}",
                name,
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let tutorial = Tutorial::new(&name, &name, content).with_format(format);
        order.push(name.clone());
        pool.insert(name, tutorial);
    }

    // Metadata is applied after the scan so a .json file may precede its
    // source in walk order.
    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    let mut claimed: HashSet<String> = HashSet::new();
    for (name, meta) in metas {
        if !pool.contains_key(&name) {
            log::warn!("Tutorial metadata '{}' has no matching tutorial source", name);
            continue;
        }
        if let Some(title) = meta.title {
            if let Some(tutorial) = pool.get_mut(&name) {
                tutorial.title = title;
            }
        }
        let mut accepted = Vec::new();
        for child in meta.children {
            if !pool.contains_key(&child) {
                log::warn!("Missing child tutorial '{}' of '{}'", child, name);
                continue;
            }
            if !claimed.insert(child.clone()) {
                log::warn!(
                    "Tutorial '{}' is already a child of another tutorial; keeping the first parent",
                    child
                );
                continue;
            }
            accepted.push(child);
        }
        if !accepted.is_empty() {
            children_of.insert(name, accepted);
        }
    }

    let mut root = Tutorial::root();
    for name in &order {
        if !claimed.contains(name) {
            if let Some(tutorial) = assemble(name, &mut pool, &children_of) {
                root.children.push(tutorial);
            }
        }
    }

    // Claimed tutorials whose whole ancestry is claimed form a cycle and are
    // never reached from the root; surface them as top-level pages.
    for name in &order {
        if pool.contains_key(name) {
            log::warn!("Tutorial '{}' is part of a parent cycle; attaching it to the root", name);
            if let Some(tutorial) = assemble(name, &mut pool, &children_of) {
                root.children.push(tutorial);
            }
        }
    }

    Ok(root)
}

fn assemble(
    name: &str,
    pool: &mut HashMap<String, Tutorial>,
    children_of: &HashMap<String, Vec<String>>,
) -> Option<Tutorial> {
    let mut tutorial = pool.remove(name)?;
    if let Some(children) = children_of.get(name) {
        for child in children {
            if let Some(node) = assemble(child, pool, children_of) {
                tutorial.children.push(node);
            }
        }
    }
    Some(tutorial)
}
