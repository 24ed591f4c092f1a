use super::package::{normalize_name, Package};
use std::collections::HashMap;

/// Two manager-reported names that normalize to the same key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub normalized_key: String,
    /// The name that keeps the key in the name map
    pub kept: String,
    /// The later name that lost the key
    pub shadowed: String,
}

/// PackageCatalog aggregate holding every installed package of one environment
///
/// Packages are stored in inventory order, keyed by canonical name. An exact
/// canonical spelling always resolves to its own package; other spellings go
/// through the normalized-key map, where the first registration wins.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    packages: Vec<Package>,
    index: HashMap<String, usize>,
    normalized: HashMap<String, String>,
    collisions: Vec<NameCollision>,
}

impl PackageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let mut catalog = Self::new();
        for package in packages {
            catalog.insert(package);
        }
        catalog
    }

    /// Adds a package, replacing any earlier entry with the same canonical name.
    ///
    /// When the normalized key already belongs to a different canonical name,
    /// the first registration keeps the key and the collision is recorded.
    pub fn insert(&mut self, package: Package) {
        let canonical = package.canonical_name().to_string();
        let key = package.normalized_key().to_string();

        match self.normalized.get(&key) {
            Some(existing) if *existing != canonical => {
                log::warn!(
                    "Package names '{}' and '{}' both normalize to '{}'; only the exact name '{}' reaches the latter",
                    existing,
                    canonical,
                    key,
                    canonical
                );
                self.collisions.push(NameCollision {
                    normalized_key: key,
                    kept: existing.clone(),
                    shadowed: canonical.clone(),
                });
            }
            Some(_) => {}
            None => {
                self.normalized.insert(key, canonical.clone());
            }
        }

        match self.index.get(&canonical) {
            Some(&position) => self.packages[position] = package,
            None => {
                self.index.insert(canonical, self.packages.len());
                self.packages.push(package);
            }
        }
    }

    /// Resolves any spelling of a package name to its canonical name.
    ///
    /// Exact canonical names are matched before normalized keys. Returns
    /// `None` for packages that are not installed.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.index.get_key_value(name) {
            return Some(canonical.as_str());
        }
        self.normalized
            .get(&normalize_name(name))
            .map(String::as_str)
    }

    /// Canonical name owning a normalized key, as used by graph nodes.
    pub fn canonical_for_key(&self, key: &str) -> Option<&str> {
        self.normalized.get(key).map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        let canonical = self.canonical_name(name)?;
        self.index.get(canonical).map(|&position| &self.packages[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// Packages in inventory order
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Canonical names in inventory order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(Package::canonical_name)
    }

    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn package(name: &str, version: &str) -> Package {
        Package::new(
            name.to_string(),
            version.to_string(),
            "0".to_string(),
            "conda-forge".to_string(),
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_lookup_by_any_spelling() {
        let catalog = PackageCatalog::from_packages(vec![package("python-dateutil", "2.8.2")]);

        assert_eq!(catalog.canonical_name("python-dateutil"), Some("python-dateutil"));
        assert_eq!(catalog.canonical_name("python_dateutil"), Some("python-dateutil"));
        assert_eq!(catalog.canonical_name("Python.Dateutil"), Some("python-dateutil"));
        assert_eq!(catalog.canonical_name("pytz"), None);
        assert_eq!(catalog.get("PYTHON_DATEUTIL").unwrap().version(), "2.8.2");
    }

    #[test]
    fn test_preserves_inventory_order() {
        let catalog = PackageCatalog::from_packages(vec![
            package("zlib", "1.2.13"),
            package("numpy", "1.26.0"),
            package("bzip2", "1.0.8"),
        ]);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["zlib", "numpy", "bzip2"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut catalog = PackageCatalog::new();
        catalog.insert(package("numpy", "1.25.0"));
        catalog.insert(package("pandas", "2.1.0"));
        catalog.insert(package("numpy", "1.26.0"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("numpy").unwrap().version(), "1.26.0");
        assert_eq!(catalog.names().next(), Some("numpy"));
        assert!(catalog.collisions().is_empty());
    }

    #[test]
    fn test_name_collision_first_registration_wins() {
        let catalog = PackageCatalog::from_packages(vec![
            package("typing-extensions", "4.8.0"),
            package("typing_extensions", "4.8.0"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.canonical_name("typing.extensions"),
            Some("typing-extensions")
        );
        // Exact canonical spelling still reaches the shadowed package
        assert_eq!(
            catalog.canonical_name("typing_extensions"),
            Some("typing_extensions")
        );
        assert_eq!(catalog.get("typing_extensions").unwrap().canonical_name(), "typing_extensions");
        assert_eq!(
            catalog.collisions(),
            &[NameCollision {
                normalized_key: "typing_extensions".to_string(),
                kept: "typing-extensions".to_string(),
                shadowed: "typing_extensions".to_string(),
            }]
        );
    }

    #[test]
    fn test_exact_name_wins_over_earlier_alias() {
        let catalog = PackageCatalog::from_packages(vec![
            package("Foo-Bar", "1.0"),
            package("foo_bar", "2.0"),
        ]);

        assert_eq!(catalog.get("foo_bar").unwrap().version(), "2.0");
        assert_eq!(catalog.get("Foo-Bar").unwrap().version(), "1.0");
        assert_eq!(catalog.get("FOO.BAR").unwrap().version(), "1.0");
        assert_eq!(catalog.collisions().len(), 1);
        // The shared graph node belongs to the first registration
        assert_eq!(catalog.canonical_for_key("foo_bar"), Some("Foo-Bar"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PackageCatalog::new();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("numpy"));
    }
}
