#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use unitload::{Bootstrap, Handle, Loader, UnitName};

pub fn name(name: &str) -> UnitName {
    UnitName::try_from_str(name).unwrap()
}

/// A bootstrap loader that defines a unit for each of the specified names, using the name as the definition.
pub fn bootstrap(builtins: &[&str]) -> Arc<dyn Loader> {
    let mut bootstrap = Bootstrap::new();
    for builtin in builtins {
        bootstrap.define(name(builtin), builtin.as_bytes()).unwrap();
    }
    bootstrap.into_shared()
}

/// A loader that counts how many times it was asked to resolve a name before forwarding to another loader.
#[derive(Debug)]
pub struct CountingLoader {
    inner: Arc<dyn Loader>,
    calls: AtomicUsize,
}

impl CountingLoader {
    pub fn new(inner: Arc<dyn Loader>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Loader for CountingLoader {
    fn label(&self) -> &str {
        "counting"
    }

    fn parent(&self) -> Option<&Arc<dyn Loader>> {
        Some(&self.inner)
    }

    fn resolve(&self, name: &UnitName) -> unitload::Result<Handle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(name)
    }
}
