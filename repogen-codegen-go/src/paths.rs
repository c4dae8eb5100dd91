//! Resolution of the model package path as seen from the repository package.
//!
//! Generated repositories import the generated models through the module
//! path, so the generator must know where the destination directory sits
//! relative to the module root. The module root is found by name: the
//! nearest directory, walking up from the destination, that is named like
//! the module's last path element.

use std::path::{Component, Path, PathBuf};

/// Directory name a module's root is expected to have.
///
/// Major version suffixes are skipped: `github.com/acme/billing/v2` is
/// anchored on `billing`.
pub fn module_anchor(module: &str) -> &str {
    let mut segments = module
        .trim_end_matches('/')
        .rsplit('/')
        .filter(|s| !s.is_empty());
    let last = segments.next().unwrap_or_default();
    if is_major_version(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Module-relative path of the model directory, resolved against the
/// process working directory.
///
/// Falls back to `model_subdir` alone when the working directory is
/// unavailable or the destination lies outside the module tree.
pub fn resolve_cross_reference(module: &str, destination: &Path, model_subdir: &str) -> String {
    match std::env::current_dir() {
        Ok(cwd) => resolve_cross_reference_from(&cwd, module, destination, model_subdir),
        Err(err) => {
            tracing::warn!(error = %err, "working directory unavailable; using model directory as is");
            trim_subdir(model_subdir).to_string()
        }
    }
}

/// Module-relative path of the model directory for a destination resolved
/// against `cwd`.
///
/// ```
/// use std::path::Path;
/// use repogen_codegen_go::resolve_cross_reference_from;
///
/// let path = resolve_cross_reference_from(
///     Path::new("/src/billing"),
///     "github.com/acme/billing",
///     Path::new("./internal"),
///     "model",
/// );
/// assert_eq!(path, "internal/model");
/// ```
pub fn resolve_cross_reference_from(
    cwd: &Path,
    module: &str,
    destination: &Path,
    model_subdir: &str,
) -> String {
    let subdir = trim_subdir(model_subdir);
    let anchor = module_anchor(module);
    let segments = segments(&cwd.join(destination));

    // Walk from the leaf upward; the first anchor hit is the module root.
    let Some(root) = segments.iter().rposition(|s| s == anchor) else {
        tracing::warn!(
            anchor,
            destination = %destination.display(),
            "destination is outside the module tree; model import may not resolve"
        );
        return subdir.to_string();
    };

    segments[root + 1..]
        .iter()
        .map(String::as_str)
        .chain((!subdir.is_empty()).then_some(subdir))
        .collect::<Vec<_>>()
        .join("/")
}

/// The module root containing `start`: the nearest ancestor (or `start`
/// itself) named like the module anchor.
pub fn find_module_root(start: &Path, module: &str) -> Option<PathBuf> {
    let anchor = module_anchor(module);
    let absolute = normalize(start);
    absolute
        .ancestors()
        .find(|dir| dir.file_name().is_some_and(|name| name == anchor))
        .map(Path::to_path_buf)
}

fn trim_subdir(subdir: &str) -> &str {
    let mut subdir = subdir.trim();
    while let Some(rest) = subdir.strip_prefix("./") {
        subdir = rest;
    }
    subdir.trim_matches('/')
}

/// Lexically normalized path: `.` dropped, `..` applied.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Directory names of the normalized path, root first.
fn segments(path: &Path) -> Vec<String> {
    normalize(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
