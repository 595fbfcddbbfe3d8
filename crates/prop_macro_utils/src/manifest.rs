use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The invoking crate's `Cargo.toml`, used to find how generated code must
/// name another crate of this workspace.
///
/// ```rust
/// # use prop_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("prop_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` is named `::crate_name`. A renamed
///    dependency (`alias = { package = "crate_name" }`) is named `::alias`.
/// 2. A `prop_` crate reached through the `prop_core` facade is named
///    `::prop_core::short_name`, e.g. `prop_reflect` -> `::prop_core::reflect`.
/// 3. Steps 1 and 2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::crate_name`.
///
/// A crate that expands the macro on its own items needs
/// `extern crate self as crate_name;` at its root so that the absolute path
/// also resolves from inside.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "prop_core";
const CRATE_PREFIX: &str = "prop_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR should be defined by cargo");
        };
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn parse_path(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    /// The key under which `name` is declared, following `package` renames.
    fn dependency_key<'t>(deps: &'t Table, name: &str) -> Option<&'t str> {
        if deps.contains_key(name) {
            return Some(deps.key(name)?.get());
        }
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package")?.as_str()?;
            (package == name).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::parse_path(&format!("::{key}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::dependency_key(deps, FACADE_NAME)?;
        Some(Self::parse_path(&format!("::{facade}::{module}")))
    }

    /// Returns the path through which the invoking crate reaches `name`.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Runs `func` on the invoking crate's manifest.
    ///
    /// Parsed manifests are cached per path and reparsed only when the file
    /// changes on disk. Callers should still resolve paths once per macro
    /// invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path).unwrap_or(SystemTime::UNIX_EPOCH);

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_text(path: &syn::Path) -> String {
        path.segments
            .iter()
            .map(|seg| seg.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_and_facade_dependencies() {
        let direct = manifest("[dependencies]\nprop_reflect = \"0.0.1\"\n");
        assert_eq!(path_text(&direct.get_crate_path("prop_reflect")), "prop_reflect");

        let facade = manifest("[dependencies]\nprop_core = { path = \"..\" }\n");
        assert_eq!(path_text(&facade.get_crate_path("prop_reflect")), "prop_core::reflect");

        let renamed = manifest("[dev-dependencies]\nprops = { package = \"prop_core\", path = \"..\" }\n");
        assert_eq!(path_text(&renamed.get_crate_path("prop_reflect")), "props::reflect");
    }

    #[test]
    fn unknown_crates_fall_back_to_absolute_paths() {
        let empty = manifest("[package]\nname = \"demo\"\n");
        let path = empty.get_crate_path("prop_reflect");
        assert!(path.leading_colon.is_some());
        assert_eq!(path_text(&path), "prop_reflect");
    }
}
