//! Type universe loading.
//!
//! A [`ClasspathIndex`] reads every class file of a set of classpath entries
//! (JARs or exploded class directories), converts them to [`TypeDef`] stubs
//! and serves them through [`InspectionProvider`].

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use thiserror::Error;

use jot_classfile::ClassFile;
use jot_types::{InspectionProvider, TypeDef, TypeTable};

#[derive(Debug, Error)]
pub enum ClasspathError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unreadable archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("malformed class file {entry}: {source}")]
    ClassFile {
        entry: String,
        #[source]
        source: jot_classfile::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClasspathEntry {
    ClassDir(PathBuf),
    Jar(PathBuf),
}

impl ClasspathEntry {
    /// Classify `path`: directories are class roots, anything else an archive.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ClasspathEntry::ClassDir(path)
        } else {
            ClasspathEntry::Jar(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClasspathEntry::ClassDir(p) | ClasspathEntry::Jar(p) => p,
        }
    }
}

fn is_ignored_class(internal_name: &str) -> bool {
    internal_name == "module-info"
        || internal_name == "package-info"
        || internal_name.ends_with("/package-info")
}

#[derive(Clone, Debug, Default)]
pub struct ClasspathIndex {
    table: TypeTable,
    /// Position of the entry each class was loaded from.
    origins: HashMap<String, usize>,
}

impl ClasspathIndex {
    /// Index `entries` in order. When a class appears in several entries the
    /// first one wins, mirroring JVM class loading.
    pub fn build(entries: &[ClasspathEntry]) -> Result<Self, ClasspathError> {
        let mut table = TypeTable::new();
        let mut origins = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            let defs = index_entry(entry)?;
            tracing::info!(
                target: "jot.classpath",
                path = %entry.path().display(),
                classes = defs.len(),
                "indexed classpath entry"
            );
            for def in defs {
                if table.contains(&def.binary_name) {
                    tracing::debug!(
                        target: "jot.classpath",
                        class = %def.binary_name,
                        "shadowed by an earlier classpath entry"
                    );
                    continue;
                }
                origins.insert(def.binary_name.clone(), position);
                table.insert(def);
            }
        }

        Ok(Self {
            table,
            origins,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Binary names of the classes that came from the `position`-th entry
    /// passed to [`build`](Self::build).
    pub fn class_names_from_entry(&self, position: usize) -> Vec<String> {
        self.table
            .iter()
            .map(|def| &def.binary_name)
            .filter(|name| self.origins.get(name.as_str()) == Some(&position))
            .cloned()
            .collect()
    }

    /// Binary names of every class in `package` or one of its sub-packages.
    /// An empty package selects everything.
    pub fn class_names_in_package(&self, package: &str) -> Vec<String> {
        let package = package.trim_end_matches('.').replace('/', ".");
        if package.is_empty() {
            return self.table.type_names();
        }
        let prefix = format!("{package}.");
        self.table
            .iter()
            .map(|def| &def.binary_name)
            .filter(|name| name.starts_with(&prefix))
            .cloned()
            .collect()
    }
}

impl InspectionProvider for ClasspathIndex {
    fn lookup_type(&self, binary_name: &str) -> Option<&TypeDef> {
        self.table.lookup_type(binary_name)
    }

    fn type_names(&self) -> Vec<String> {
        self.table.type_names()
    }
}

fn index_entry(entry: &ClasspathEntry) -> Result<Vec<TypeDef>, ClasspathError> {
    match entry {
        ClasspathEntry::ClassDir(dir) => index_class_dir(dir),
        ClasspathEntry::Jar(path) => index_jar(path),
    }
}

fn parse_class(entry: &str, bytes: &[u8]) -> Result<Option<TypeDef>, ClasspathError> {
    let wrap = |source| ClasspathError::ClassFile {
        entry: entry.to_owned(),
        source,
    };
    let cf = ClassFile::parse(bytes).map_err(wrap)?;
    if is_ignored_class(&cf.this_class) {
        return Ok(None);
    }
    let def = TypeDef::from_classfile(&cf).map_err(wrap)?;
    tracing::debug!(target: "jot.classpath", class = %def.binary_name, "loaded class");
    Ok(Some(def))
}

fn index_class_dir(dir: &Path) -> Result<Vec<TypeDef>, ClasspathError> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("class")))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    let mut out = Vec::new();
    for file in files {
        let bytes = std::fs::read(&file)?;
        if let Some(def) = parse_class(&file.display().to_string(), &bytes)? {
            out.push(def);
        }
    }
    Ok(out)
}

fn index_jar(path: &Path) -> Result<Vec<TypeDef>, ClasspathError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let is_multi_release = jar_is_multi_release(&mut archive);

    // Multi-release JARs keep version-specific classes under
    // `META-INF/versions/<n>/`. The base class wins; otherwise the highest
    // version present is used.
    let mut best: HashMap<String, (u32, TypeDef)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if !file.is_file() {
            continue;
        }
        let name = file.name().to_owned();
        if !name.ends_with(".class") {
            continue;
        }

        let version = if let Some(rest) = name.strip_prefix("META-INF/versions/") {
            if !is_multi_release {
                continue;
            }
            match rest.split_once('/').map(|(v, _)| v.parse::<u32>()) {
                Some(Ok(v)) => v,
                _ => continue,
            }
        } else if name.starts_with("META-INF/") {
            continue;
        } else {
            0
        };

        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        let Some(def) = parse_class(&name, &bytes)? else {
            continue;
        };

        let key = def.binary_name.clone();
        match best.get(&key) {
            None => {
                order.push(key.clone());
                best.insert(key, (version, def));
            }
            Some((existing, _)) if *existing != 0 && (version == 0 || version > *existing) => {
                best.insert(key, (version, def));
            }
            Some(_) => {}
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|key| best.remove(&key).map(|(_, def)| def))
        .collect())
}

fn jar_is_multi_release<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> bool {
    let Ok(mut file) = archive.by_name("META-INF/MANIFEST.MF") else {
        return false;
    };

    let mut manifest = String::new();
    if file.read_to_string(&mut manifest).is_err() {
        return false;
    }

    manifest_is_multi_release(&manifest)
}

fn manifest_is_multi_release(manifest: &str) -> bool {
    manifest
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("Multi-Release"))
        .is_some_and(|(_, value)| value.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_flag() {
        assert!(manifest_is_multi_release(
            "Manifest-Version: 1.0\nMulti-Release: true\n"
        ));
        assert!(!manifest_is_multi_release("Manifest-Version: 1.0\n"));
        assert!(!manifest_is_multi_release("multi-release: false"));
    }

    #[test]
    fn ignores_module_and_package_info() {
        assert!(is_ignored_class("module-info"));
        assert!(is_ignored_class("com/zoo/package-info"));
        assert!(!is_ignored_class("com/zoo/Dog"));
    }
}
