use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// Generated code must name `vc_graph` items from inside the user's crate,
/// which may depend on `vc_graph` directly, under a renamed key, or only
/// through the `vc_clone_kit` facade.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_graph"));
/// ```
///
/// Reading the manifest is not cheap, callers should resolve a path once per
/// macro invocation and pass it around.
///
/// # Resolution rules
///
/// 1. If the requested crate is a key of `dependencies`, return `::crate_name`.
/// 2. If a dependency renames the requested crate (`foo = { package = "crate_name" }`),
///    return `::foo`.
/// 3. If the requested name begins with `vc_` and the caller depends on the
///    facade `vc_clone_kit`, return `::vc_clone_kit::short_name`
///    (e.g. `vc_graph` -> `::vc_clone_kit::graph`).
/// 4. Repeat steps 1-3 in `dev-dependencies`.
/// 5. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// A crate referring to itself through generated code needs
/// `extern crate self as crate_name;` in its root, so the absolute path
/// also works for its doc tests and unit tests.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_clone_kit";
const PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .unwrap_or_else(|| panic!("CARGO_MANIFEST_DIR should be auto-defined by cargo."));
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn parse_path(path: &str) -> syn::Path {
        syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
    }

    // The key of a dependency entry whose `package` field is `name`.
    fn renamed_key<'a>(deps: &'a Table, name: &str) -> Option<&'a str> {
        deps.iter().find_map(|(key, item)| {
            let package = match item {
                Item::Table(table) => table.get("package")?.as_str()?,
                Item::Value(value) => value.as_inline_table()?.get("package")?.as_str()?,
                _ => return None,
            };
            (package == name).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_path(&format!("::{name}")));
        }
        if let Some(key) = Self::renamed_key(deps, name) {
            return Some(Self::parse_path(&format!("::{key}")));
        }
        let module = name.strip_prefix(PREFIX)?;
        let facade = if deps.contains_key(FACADE_NAME) {
            FACADE_NAME
        } else {
            Self::renamed_key(deps, FACADE_NAME)?
        };
        Some(Self::parse_path(&format!("::{facade}::{module}")))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution
    /// order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }
        Self::parse_path(&format!("::{name}"))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// The parsed manifest is cached per path and refreshed when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .unwrap_or_else(|_| panic!("The Cargo.toml should have a modified time."));

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn resolve(text: &str, name: &str) -> String {
        manifest(text)
            .get_crate_path(name)
            .to_token_stream()
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let text = "[dependencies]\nvc_graph = { path = \"../vc_graph\" }\n";
        assert_eq!(resolve(text, "vc_graph"), "::vc_graph");
    }

    #[test]
    fn renamed_dependency() {
        let text = "[dependencies]\ngraph = { package = \"vc_graph\", version = \"0.0.1\" }\n";
        assert_eq!(resolve(text, "vc_graph"), "::graph");
    }

    #[test]
    fn facade_dependency() {
        let text = "[dev-dependencies]\nvc_clone_kit = \"0.0.1\"\n";
        assert_eq!(resolve(text, "vc_graph"), "::vc_clone_kit::graph");
    }

    #[test]
    fn fallback_is_absolute() {
        assert_eq!(resolve("[package]\nname = \"x\"\n", "vc_graph"), "::vc_graph");
    }
}
