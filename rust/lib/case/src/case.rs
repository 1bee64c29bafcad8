use std::collections::HashMap;
use std::collections::hash_map::Entry as CacheEntry;
use std::path::{Component, Path, PathBuf};

use foamdesk_dict::DictionaryDocument;
use tracing::{debug, info, warn};

use crate::defaults;
use crate::error::CaseError;
use crate::file::FileStore;
use crate::traits::CaseStore;

pub const CONTROL_DICT: &str = "system/controlDict";
pub const FV_SCHEMES: &str = "system/fvSchemes";
pub const FV_SOLUTION: &str = "system/fvSolution";

/// CaseDirectory is one OpenFOAM case on disk plus a cache of the
/// dictionaries read or written through it.
///
/// ```text
/// case/
/// ├── 0/              initial conditions (first time directory)
/// ├── constant/       mesh, physical properties
/// └── system/         controlDict, fvSchemes, fvSolution, ...
/// ```
///
/// Cache entries are keyed by path and replaced on every write through this
/// instance. Changes made to the files by anything else are not noticed until
/// the entry is invalidated.
pub struct CaseDirectory<S: CaseStore = FileStore> {
    root: PathBuf,
    system_dir: PathBuf,
    constant_dir: PathBuf,
    time_dirs: Vec<String>,
    cache: HashMap<PathBuf, DictionaryDocument>,
    store: S,
}

impl CaseDirectory<FileStore> {
    /// Point at a case on the local filesystem. The directory need not exist.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CaseError> {
        Self::with_store(root, FileStore)
    }
}

impl<S: CaseStore> CaseDirectory<S> {
    /// Point at a case reached through `store`. Relative roots are made
    /// absolute against the current directory.
    pub fn with_store(root: impl AsRef<Path>, store: S) -> Result<Self, CaseError> {
        let root = root.as_ref();
        let root = std::path::absolute(root).map_err(|e| CaseError::io(root, e))?;
        Ok(Self {
            system_dir: root.join("system"),
            constant_dir: root.join("constant"),
            root,
            time_dirs: Vec::new(),
            cache: HashMap::new(),
            store,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn system_dir(&self) -> &Path {
        &self.system_dir
    }

    pub fn constant_dir(&self) -> &Path {
        &self.constant_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Materialize the minimal case skeleton: `system/`, `constant/`, `0/`
    /// and default `controlDict`, `fvSchemes`, `fvSolution`.
    ///
    /// Existing default dictionaries are overwritten. A failure part way
    /// through leaves whatever was already written.
    pub fn create(&mut self) -> Result<(), CaseError> {
        info!("creating OpenFOAM case at {}", self.root.display());

        let dirs = [
            self.root.clone(),
            self.system_dir.clone(),
            self.constant_dir.clone(),
            self.root.join("0"),
        ];
        for dir in &dirs {
            self.store
                .create_dir_all(dir)
                .map_err(|e| CaseError::io(dir, e))?;
        }

        self.write_dictionary(defaults::control_dict(), CONTROL_DICT)?;
        self.write_dictionary(defaults::fv_schemes(), FV_SCHEMES)?;
        self.write_dictionary(defaults::fv_solution(), FV_SOLUTION)?;

        self.refresh_time_dirs()?;
        Ok(())
    }

    /// Dictionary at `relative_path`, from the cache or read and parsed.
    pub fn get_dictionary(
        &mut self,
        relative_path: impl AsRef<Path>,
    ) -> Result<&mut DictionaryDocument, CaseError> {
        let path = self.resolve(relative_path.as_ref())?;
        match self.cache.entry(path) {
            CacheEntry::Occupied(entry) => {
                debug!("cache hit for {}", entry.key().display());
                Ok(entry.into_mut())
            }
            CacheEntry::Vacant(entry) => {
                let path = entry.key();
                let text = self
                    .store
                    .read(path)
                    .map_err(|e| CaseError::read(path.clone(), e))?;
                let doc = DictionaryDocument::parse(&text).inspect_err(|e| {
                    warn!("failed to parse {}: {}", path.display(), e);
                })?;
                debug!("loaded {} ({} entries)", path.display(), doc.len());
                Ok(entry.insert(doc))
            }
        }
    }

    /// Write `doc` to `relative_path` and make it the cached value.
    ///
    /// Parent directories are created; the header object is set to the file
    /// name. Documents that would not read back unchanged are refused before
    /// anything is written. On any failure the cached copy is dropped, so the
    /// next read comes from the store.
    pub fn write_dictionary(
        &mut self,
        mut doc: DictionaryDocument,
        relative_path: impl AsRef<Path>,
    ) -> Result<(), CaseError> {
        let path = self.resolve(relative_path.as_ref())?;
        match self.store_document(&path, &mut doc) {
            Ok(()) => {
                self.cache.insert(path, doc);
                Ok(())
            }
            Err(e) => {
                if self.cache.remove(&path).is_some() {
                    warn!("dropped cached {} after failed write", path.display());
                }
                Err(e)
            }
        }
    }

    /// Persist the cached copy of `relative_path`, loading it first if needed.
    pub fn save_dictionary(&mut self, relative_path: impl AsRef<Path>) -> Result<(), CaseError> {
        let relative_path = relative_path.as_ref();
        let doc = self.get_dictionary(relative_path)?.clone();
        self.write_dictionary(doc, relative_path)
    }

    /// Drop the cached copy of `relative_path`. Returns whether one existed.
    pub fn invalidate(&mut self, relative_path: impl AsRef<Path>) -> bool {
        match self.resolve(relative_path.as_ref()) {
            Ok(path) => self.cache.remove(&path).is_some(),
            Err(_) => false,
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn is_cached(&self, relative_path: impl AsRef<Path>) -> bool {
        self.resolve(relative_path.as_ref())
            .is_ok_and(|path| self.cache.contains_key(&path))
    }

    /// The `application` entry of `system/controlDict`: the solver to run.
    pub fn application(&mut self) -> Result<String, CaseError> {
        let path = self.root.join(CONTROL_DICT);
        self.get_dictionary(CONTROL_DICT)?
            .scalar("application")
            .map(str::to_string)
            .ok_or(CaseError::MissingEntry {
                path,
                key: "application".into(),
            })
    }

    /// Rescan the root for time directories (names that parse as numbers),
    /// sorted by time. A root that does not exist yet has none.
    pub fn refresh_time_dirs(&mut self) -> Result<&[String], CaseError> {
        let names = match self.store.list_dirs(&self.root) {
            Ok(names) => names,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("case root {} does not exist yet", self.root.display());
                Vec::new()
            }
            Err(e) => return Err(CaseError::io(&self.root, e)),
        };

        let mut times: Vec<(f64, String)> = names
            .into_iter()
            .filter_map(|name| {
                let t = name.parse::<f64>().ok().filter(|t| t.is_finite())?;
                Some((t, name))
            })
            .collect();
        times.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.time_dirs = times.into_iter().map(|(_, name)| name).collect();
        Ok(&self.time_dirs)
    }

    /// Time directories found by the last `refresh_time_dirs`.
    pub fn time_dirs(&self) -> &[String] {
        &self.time_dirs
    }

    pub fn latest_time(&self) -> Option<&str> {
        self.time_dirs.last().map(String::as_str)
    }

    fn store_document(&self, path: &Path, doc: &mut DictionaryDocument) -> Result<(), CaseError> {
        doc.check_values()?;
        if let Some(parent) = path.parent() {
            self.store
                .create_dir_all(parent)
                .map_err(|e| CaseError::io(parent, e))?;
        }
        if let Some(name) = path.file_name() {
            doc.set_header_object(name.to_string_lossy());
        }

        self.store
            .write(path, &doc.serialize())
            .map_err(|e| CaseError::io(path, e))?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Join a case-relative path onto the root. Absolute paths and `..` are
    /// rejected so every file stays inside the case.
    fn resolve(&self, relative_path: &Path) -> Result<PathBuf, CaseError> {
        let valid = relative_path.components().next().is_some()
            && relative_path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !valid {
            return Err(CaseError::InvalidPath(relative_path.to_path_buf()));
        }
        Ok(self.root.join(relative_path))
    }
}
