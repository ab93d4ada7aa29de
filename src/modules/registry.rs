use async_trait::async_trait;
use std::collections::BTreeMap;

use super::traits::{LoadError, ModuleLoader};
use super::types::Module;
use crate::scan::FileRecord;

/// Registry mapping root-relative file paths to the modules they export.
///
/// Keys use `/` separators and are relative to the scanned root, so the file
/// `app/users/[id]/+route.rs` under root `app` registers as
/// `users/[id]/+route.rs`. A leading `./` or `/` is ignored.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, path: impl AsRef<str>, module: Module) -> &mut Self {
        self.modules.insert(normalize(path.as_ref()), module);
        self
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, path: impl AsRef<str>, module: Module) -> Self {
        self.register(path, module);
        self
    }

    pub fn get(&self, path: &str) -> Result<&Module, LoadError> {
        let key = normalize(path);
        self.modules.get(&key).ok_or(LoadError::NotFound(key))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(&normalize(path))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl ModuleLoader for ModuleRegistry {
    async fn load(&self, record: &FileRecord) -> Result<Module, LoadError> {
        self.get(record.relative_path()).cloned()
    }
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut key = path.as_str();
    loop {
        if let Some(rest) = key.strip_prefix("./") {
            key = rest;
        } else if let Some(rest) = key.strip_prefix('/') {
            key = rest;
        } else {
            break;
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::handler;

    #[test]
    fn test_lookup_ignores_leading_dot_slash() {
        let registry = ModuleRegistry::new()
            .with("./users/+route.rs", Module::new().get(handler(|_req| async { "users" })));

        assert!(registry.contains("users/+route.rs"));
        assert!(registry.contains("/users/+route.rs"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_module_is_not_found() {
        let registry = ModuleRegistry::new();
        assert!(registry.is_empty());

        let err = registry.get("admin/+mw.rs").unwrap_err();
        assert!(matches!(err, LoadError::NotFound(ref key) if key == "admin/+mw.rs"));
    }

    #[test]
    fn test_register_replaces_existing_entry() {
        let mut registry = ModuleRegistry::new();
        registry.register("+route.rs", Module::new());
        registry.register("+route.rs", Module::new().post(handler(|_req| async { "" })));

        let module = registry.get("+route.rs").unwrap();
        assert_eq!(module.methods(), vec![axum::http::Method::POST]);
    }
}
