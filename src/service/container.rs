//! In-memory service container.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};

use crate::error::Error;
use crate::service::capability::{Handler, Middleware};
use crate::service::lookup::{Lookup, Service};

type Factory = Arc<dyn Fn(&Container) -> Result<Service, Error> + Send + Sync>;

#[derive(Clone)]
enum Entry {
    Shared(Service),
    Factory(Factory),
}

/// Container configuration.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Whether registering an existing key replaces the previous entry.
    pub allow_overrides: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            allow_overrides: true,
        }
    }
}

thread_local! {
    // (container id, key) pairs whose factories are running on this thread.
    static RESOLVING: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

struct ResolvingGuard {
    container: usize,
}

impl ResolvingGuard {
    fn enter(container: usize, key: &str) -> Result<Self, Error> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.iter().any(|(id, k)| *id == container && k == key) {
                let chain = stack
                    .iter()
                    .filter(|(id, _)| *id == container)
                    .map(|(_, k)| k.as_str())
                    .chain(std::iter::once(key))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(Error::Lookup {
                    key: key.to_string(),
                    reason: format!("circular dependency: {chain}"),
                });
            }
            stack.push((container, key.to_string()));
            Ok(Self { container })
        })
    }
}

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|(id, _)| *id == self.container) {
                stack.remove(pos);
            }
        });
    }
}

/// A shared, in-memory registry of services keyed by name.
///
/// Cloning a container shares its storage.
#[derive(Clone)]
pub struct Container {
    config: ContainerConfig,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl Container {
    /// Create an empty container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Create an empty container with the given configuration.
    pub fn with_config(config: ContainerConfig) -> Self {
        debug!("Creating service container (allow_overrides = {})", config.allow_overrides);
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The container configuration.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Register a handler under `key`.
    pub fn register_handler<H: Handler + 'static>(
        &self,
        key: impl Into<String>,
        handler: H,
    ) -> Result<(), Error> {
        self.insert(key.into(), Entry::Shared(Service::Handler(Arc::new(handler))))
    }

    /// Register a middleware under `key`.
    pub fn register_middleware<M: Middleware + 'static>(
        &self,
        key: impl Into<String>,
        middleware: M,
    ) -> Result<(), Error> {
        self.insert(key.into(), Entry::Shared(Service::Middleware(Arc::new(middleware))))
    }

    /// Register an arbitrary value under `key`.
    pub fn register_value<T: Any + Send + Sync>(
        &self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), Error> {
        self.insert(key.into(), Entry::Shared(Service::Value(Arc::new(value))))
    }

    /// Register an already-built service under `key`.
    pub fn register_service(&self, key: impl Into<String>, service: Service) -> Result<(), Error> {
        self.insert(key.into(), Entry::Shared(service))
    }

    /// Register a factory invoked on every lookup of `key`.
    ///
    /// The factory receives the container so it can look up its own dependencies.
    pub fn register_factory<F>(&self, key: impl Into<String>, factory: F) -> Result<(), Error>
    where
        F: Fn(&Container) -> Result<Service, Error> + Send + Sync + 'static,
    {
        self.insert(key.into(), Entry::Factory(Arc::new(factory)))
    }

    /// Remove the entry registered under `key`. Returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool, Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        let removed = entries.remove(key).is_some();
        debug!("Removed service {key}: {removed}");
        Ok(removed)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self
            .entries
            .read()
            .map(|entries| entries.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    fn insert(&self, key: String, entry: Entry) -> Result<(), Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned(&key))?;
        if !self.config.allow_overrides && entries.contains_key(&key) {
            warn!("Refusing to override service {key}");
            return Err(Error::AlreadyRegistered(key));
        }
        debug!("Registered service {key}");
        entries.insert(key, entry);
        Ok(())
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.entries) as *const () as usize
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for Container {
    fn get(&self, key: &str) -> Result<Service, Error> {
        // The lock is released before a factory runs, so factories may call back in.
        let entry = {
            let entries = self.entries.read().map_err(|_| poisoned(key))?;
            entries.get(key).cloned()
        };

        match entry {
            Some(Entry::Shared(service)) => {
                trace!("Looked up service {key}");
                Ok(service)
            }
            Some(Entry::Factory(factory)) => {
                let _guard = ResolvingGuard::enter(self.id(), key)?;
                trace!("Building service {key} from factory");
                factory(self)
            }
            None => {
                trace!("Service {key} not found");
                Err(Error::NotFound(key.to_string()))
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

fn poisoned(key: &str) -> Error {
    Error::Lookup {
        key: key.to_string(),
        reason: "service registry lock poisoned".to_string(),
    }
}
