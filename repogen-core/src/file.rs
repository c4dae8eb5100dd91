use std::{
    cell::RefCell,
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

/// Side effects requested by the generator when writing units to disk.
///
/// Both operations must be idempotent: creating an existing directory is not
/// an error, and writing a file replaces any previous content.
pub trait Emitter {
    /// Make sure `path` exists as a directory.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Write `content` to `path`, overwriting any existing file.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Emitter backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEmitter;

impl Emitter for FsEmitter {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        tracing::debug!(path = %path.display(), bytes = content.len(), "writing file");
        std::fs::write(path, content)
    }
}

/// Emitter that keeps every written file in memory.
///
/// Used by tests and dry runs that want to inspect the emitted tree without
/// touching the disk.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    dirs: RefCell<Vec<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories requested so far, in request order.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().clone()
    }

    /// Written files sorted by path.
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.borrow().clone()
    }

    /// Content of a single written file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl Emitter for MemoryEmitter {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.borrow_mut();
        if !dirs.iter().any(|d| d == path) {
            dirs.push(path.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// One generated source file: its content plus where it goes.
///
/// `destination_subpath` is relative to the destination root of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    source_text: String,
    file_name: String,
    destination_subpath: String,
}

impl RenderedUnit {
    pub fn new(
        source_text: impl Into<String>,
        file_name: impl Into<String>,
        destination_subpath: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            file_name: file_name.into(),
            destination_subpath: destination_subpath.into(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn destination_subpath(&self) -> &str {
        &self.destination_subpath
    }

    /// Path relative to the destination root, always `/`-separated.
    pub fn relative_path(&self) -> String {
        if self.destination_subpath.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.destination_subpath, self.file_name)
        }
    }

    /// Directory this unit is written into.
    pub fn dir(&self, base: &Path) -> PathBuf {
        self.destination_subpath
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(base.to_path_buf(), |dir, segment| dir.join(segment))
    }

    /// Full path of the unit under `base`.
    pub fn path(&self, base: &Path) -> PathBuf {
        self.dir(base).join(&self.file_name)
    }

    /// Write the unit under `base`, creating its directory first.
    pub fn write(&self, base: &Path, emitter: &dyn Emitter) -> Result<PathBuf, EmitError> {
        let dir = self.dir(base);
        emitter.ensure_dir(&dir).map_err(|source| EmitError {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(&self.file_name);
        emitter
            .write_file(&path, &self.source_text)
            .map_err(|source| EmitError {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// A failed directory creation or file write, with the offending path.
#[derive(Debug)]
pub struct EmitError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to write '{}'", self.path.display())
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
