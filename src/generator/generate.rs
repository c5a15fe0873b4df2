//! Model walker: directory creation, file naming and unit persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::model::{ElementId, ElementKind, ModelGraph};

use super::emit::emit_unit;
use super::options::GenOptions;

/// Generate source files for `id` and everything below it.
///
/// Packages become directories (failing when the directory already exists),
/// classifiers become `.php` files (overwriting existing files), all in
/// model ownership order. Elements with empty names are silently skipped.
/// Any filesystem failure aborts the whole run.
pub fn generate(
    graph: &ModelGraph,
    id: ElementId,
    base_path: &Path,
    options: &GenOptions,
) -> anyhow::Result<()> {
    let elem = graph.element(id);
    if elem.name.is_empty() {
        return Ok(());
    }
    match &elem.kind {
        ElementKind::Package => {
            let dir = base_path.join(&elem.name);
            fs::create_dir(&dir)
                .with_context(|| format!("failed to create package directory {dir:?}"))?;
            debug!(path = %dir.display(), "created package directory");
            for child in &elem.owned {
                generate(graph, *child, &dir, options)?;
            }
        }
        kind => {
            let suffix = match kind {
                ElementKind::Class { .. } => options.class_suffix.as_str(),
                ElementKind::Interface { .. } => options.interface_suffix.as_str(),
                _ => "",
            };
            let file = unit_file_path(base_path, &elem.name, suffix);
            let text = emit_unit(graph, id, options);
            fs::write(&file, text).with_context(|| format!("failed to write unit {file:?}"))?;
            info!(path = %file.display(), "generated unit");
        }
    }
    Ok(())
}

/// Target path of one generated unit: `<base>/<name><suffix>.php`.
pub fn unit_file_path(base_path: &Path, name: &str, suffix: &str) -> PathBuf {
    base_path.join(format!("{name}{suffix}.php"))
}
