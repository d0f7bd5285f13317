//! Named component registries.
//!
//! Components (verbs, build types) are linked into the binary as
//! [`LinkedModule`]s: a module path plus the symbols it exports, each symbol
//! being a constructor. A registry only knows component *names* and the
//! symbol to fetch; nothing is constructed until [`ComponentLoader::load`]
//! runs. Enumerating a registry never loads anything.
//!
//! Two registry shapes exist:
//!
//! | Type              | Lookup                         | Used for     |
//! |-------------------|--------------------------------|--------------|
//! | [`GroupRegistry`] | group-checked list + load      | verbs        |
//! | [`NamedRegistry`] | `resolve(None \| Some(name))`  | build types  |

use tracing::debug;

use crate::errors::RegistryError;

/// A symbol exported by a linked module.
pub struct Symbol<T: 'static> {
    pub name: &'static str,
    pub load: fn() -> T,
}

/// A module linked into the binary, addressable by its path.
pub struct LinkedModule<T: 'static> {
    pub path: &'static str,
    pub symbols: &'static [Symbol<T>],
}

impl<T: 'static> LinkedModule<T> {
    /// Fetch a symbol and construct it.
    pub fn getattr(&self, symbol: &str) -> Result<T, RegistryError> {
        self.symbols
            .iter()
            .find(|s| s.name == symbol)
            .map(|s| (s.load)())
            .ok_or_else(|| RegistryError::SymbolNotFound {
                module: self.path.to_string(),
                symbol: symbol.to_string(),
            })
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s.name == symbol)
    }
}

/// Locate a module in a link table by path.
pub fn import_module<T: 'static>(
    table: &'static [LinkedModule<T>],
    path: &str,
) -> Result<&'static LinkedModule<T>, RegistryError> {
    table
        .iter()
        .find(|m| m.path == path)
        .ok_or_else(|| RegistryError::ModuleNotFound {
            module: path.to_string(),
        })
}

/// Deferred reference to one component's implementation.
///
/// Created fresh by each lookup; `load` re-resolves every time.
pub struct ComponentLoader<T: 'static> {
    name: String,
    entry_point: &'static str,
    package: &'static str,
    table: &'static [LinkedModule<T>],
}

impl<T: 'static> ComponentLoader<T> {
    pub fn new(
        name: impl Into<String>,
        entry_point: &'static str,
        package: &'static str,
        table: &'static [LinkedModule<T>],
    ) -> Self {
        Self {
            name: name.into(),
            entry_point,
            package,
            table,
        }
    }

    /// Component name, e.g. `cmake`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbol fetched from the module, e.g. `CmakeBuildType`.
    pub fn entry_point(&self) -> &'static str {
        self.entry_point
    }

    /// Path of the module the component lives in, e.g. `build_types::cmake`.
    pub fn module_path(&self) -> String {
        format!("{}::{}", self.package, self.name)
    }

    /// Resolve the module and construct the entry point.
    pub fn load(&self) -> Result<T, RegistryError> {
        let module_path = self.module_path();
        debug!(module = %module_path, symbol = self.entry_point, "loading component");
        let module = import_module(self.table, &module_path)?;
        module.getattr(self.entry_point)
    }

    fn is_linked(&self) -> bool {
        import_module(self.table, &self.module_path())
            .map(|m| m.has_symbol(self.entry_point))
            .unwrap_or(false)
    }
}

impl<T: 'static> std::fmt::Debug for ComponentLoader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLoader")
            .field("name", &self.name)
            .field("entry_point", &self.entry_point)
            .field("module", &self.module_path())
            .finish()
    }
}

/// Result of [`NamedRegistry::resolve`].
#[derive(Debug)]
pub enum Selection<T: 'static> {
    /// No name given: every known component, in declaration order.
    All(Vec<ComponentLoader<T>>),
    One(ComponentLoader<T>),
}

/// Registry keyed by component name, mapping each to an entry-point symbol.
pub struct NamedRegistry<T: 'static> {
    kind: &'static str,
    package: &'static str,
    entries: &'static [(&'static str, &'static str)],
    table: &'static [LinkedModule<T>],
}

impl<T: 'static> NamedRegistry<T> {
    /// `entries` is an ordered `name -> entry point` mapping; `kind` names the
    /// component category in error messages.
    pub const fn new(
        kind: &'static str,
        package: &'static str,
        entries: &'static [(&'static str, &'static str)],
        table: &'static [LinkedModule<T>],
    ) -> Self {
        Self {
            kind,
            package,
            entries,
            table,
        }
    }

    /// Known names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn resolve(&self, name: Option<&str>) -> Result<Selection<T>, RegistryError> {
        match name {
            None => Ok(Selection::All(self.loaders())),
            Some(name) => self.loader(name).map(Selection::One),
        }
    }

    /// Loaders for every component, without loading any of them.
    pub fn loaders(&self) -> Vec<ComponentLoader<T>> {
        self.entries
            .iter()
            .map(|(name, entry_point)| {
                ComponentLoader::new(*name, *entry_point, self.package, self.table)
            })
            .collect()
    }

    pub fn loader(&self, name: &str) -> Result<ComponentLoader<T>, RegistryError> {
        let (name, entry_point) = self
            .entries
            .iter()
            .find(|(known, _)| *known == name)
            .ok_or_else(|| RegistryError::UnknownComponent {
                kind: self.kind,
                name: name.to_string(),
                valid: self.names().into_iter().map(String::from).collect(),
            })?;
        Ok(ComponentLoader::new(*name, *entry_point, self.package, self.table))
    }

    /// Shorthand for `loader(name)?.load()`.
    pub fn load(&self, name: &str) -> Result<T, RegistryError> {
        self.loader(name)?.load()
    }

    /// Names whose module or entry point is missing from the link table.
    pub fn unlinked(&self) -> Vec<String> {
        self.loaders()
            .into_iter()
            .filter(|l| !l.is_linked())
            .map(|l| l.name)
            .collect()
    }
}

/// Registry serving one named group of components that all export the same
/// descriptor symbol.
pub struct GroupRegistry<T: 'static> {
    kind: &'static str,
    group: &'static str,
    package: &'static str,
    symbol: &'static str,
    names: &'static [&'static str],
    table: &'static [LinkedModule<T>],
}

impl<T: 'static> GroupRegistry<T> {
    pub const fn new(
        kind: &'static str,
        group: &'static str,
        package: &'static str,
        symbol: &'static str,
        names: &'static [&'static str],
        table: &'static [LinkedModule<T>],
    ) -> Self {
        Self {
            kind,
            group,
            package,
            symbol,
            names,
            table,
        }
    }

    pub fn group(&self) -> &'static str {
        self.group
    }

    fn check_group(&self, group: &str) -> Result<(), RegistryError> {
        if group != self.group {
            return Err(RegistryError::UnsupportedGroup {
                group: group.to_string(),
                expected: self.group,
            });
        }
        Ok(())
    }

    /// Component names of `group`, in declaration order (not sorted).
    pub fn list_components(&self, group: &str) -> Result<Vec<&'static str>, RegistryError> {
        self.check_group(group)?;
        Ok(self.names.to_vec())
    }

    pub fn resolve(&self, name: &str, group: &str) -> Result<ComponentLoader<T>, RegistryError> {
        self.check_group(group)?;
        if !self.names.contains(&name) {
            return Err(RegistryError::UnknownComponent {
                kind: self.kind,
                name: name.to_string(),
                valid: self.names.iter().map(|n| n.to_string()).collect(),
            });
        }
        Ok(ComponentLoader::new(name, self.symbol, self.package, self.table))
    }

    /// Load the descriptor exported by component `name`.
    pub fn load_description(&self, name: &str, group: &str) -> Result<T, RegistryError> {
        self.resolve(name, group)?.load()
    }

    /// Names whose module or descriptor symbol is missing from the link table.
    pub fn unlinked(&self) -> Vec<String> {
        self.names
            .iter()
            .map(|name| ComponentLoader::new(*name, self.symbol, self.package, self.table))
            .filter(|l| !l.is_linked())
            .map(|l| l.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> u32 {
        1
    }

    fn two() -> u32 {
        2
    }

    const TABLE: &[LinkedModule<u32>] = &[
        LinkedModule {
            path: "numbers::one",
            symbols: &[Symbol { name: "One", load: one }],
        },
        LinkedModule {
            path: "numbers::two",
            symbols: &[Symbol { name: "Two", load: two }],
        },
        LinkedModule {
            path: "numbers::broken",
            symbols: &[Symbol { name: "Other", load: one }],
        },
    ];

    const NAMED: NamedRegistry<u32> = NamedRegistry::new(
        "number",
        "numbers",
        &[("one", "One"), ("two", "Two"), ("broken", "Broken"), ("ghost", "Ghost")],
        TABLE,
    );

    const GROUP: GroupRegistry<u32> = GroupRegistry::new(
        "number",
        "test.numbers",
        "numbers",
        "One",
        &["one", "two"],
        TABLE,
    );

    #[test]
    fn test_resolve_none_returns_all_loaders_in_order() {
        match NAMED.resolve(None).unwrap() {
            Selection::All(loaders) => {
                let names: Vec<_> = loaders.iter().map(|l| l.name()).collect();
                assert_eq!(names, vec!["one", "two", "broken", "ghost"]);
            }
            Selection::One(_) => panic!("Expected Selection::All"),
        }
    }

    #[test]
    fn test_resolve_name_loads_symbol() {
        match NAMED.resolve(Some("two")).unwrap() {
            Selection::One(loader) => {
                assert_eq!(loader.module_path(), "numbers::two");
                assert_eq!(loader.entry_point(), "Two");
                assert_eq!(loader.load().unwrap(), 2);
            }
            Selection::All(_) => panic!("Expected Selection::One"),
        }
    }

    #[test]
    fn test_unknown_name_lists_valid_names() {
        let err = NAMED.resolve(Some("three")).unwrap_err();
        match &err {
            RegistryError::UnknownComponent { name, valid, .. } => {
                assert_eq!(name, "three");
                assert_eq!(valid, &["one", "two", "broken", "ghost"]);
            }
            other => panic!("Expected UnknownComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(NAMED.loader("One").is_err());
    }

    #[test]
    fn test_load_failures_propagate() {
        let missing_symbol = NAMED.load("broken").unwrap_err();
        assert!(matches!(missing_symbol, RegistryError::SymbolNotFound { .. }));

        let missing_module = NAMED.load("ghost").unwrap_err();
        assert!(matches!(missing_module, RegistryError::ModuleNotFound { .. }));
        assert!(missing_module.is_load_error());
    }

    #[test]
    fn test_named_unlinked_reports_missing_entries() {
        assert_eq!(NAMED.unlinked(), vec!["broken", "ghost"]);
    }

    #[test]
    fn test_group_list_components_checks_group() {
        assert_eq!(GROUP.list_components("test.numbers").unwrap(), vec!["one", "two"]);
        let err = GROUP.list_components("other.group").unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedGroup { .. }));
        assert!(err.to_string().contains("test.numbers"));
    }

    #[test]
    fn test_group_load_description() {
        assert_eq!(GROUP.load_description("one", "test.numbers").unwrap(), 1);
        // module `numbers::two` exports `Two`, not the group symbol `One`
        let err = GROUP.load_description("two", "test.numbers").unwrap_err();
        assert!(matches!(err, RegistryError::SymbolNotFound { .. }));
        assert_eq!(GROUP.unlinked(), vec!["two"]);
    }

    #[test]
    fn test_group_rejects_unlisted_name() {
        let err = GROUP.load_description("broken", "test.numbers").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownComponent { .. }));
    }
}
