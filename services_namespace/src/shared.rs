//! Serialized access to one namespace from many sessions
//!
//! Every operation runs under a single lock, so each call observes and
//! mutates the namespace as one step. Lock poisoning is ignored: namespace
//! operations validate before they mutate, so a panicking caller cannot leave
//! a half-applied change behind.

use crate::namespace::Namespace;
use std::sync::{Arc, Mutex, PoisonError};

/// A cloneable handle to a namespace behind a mutex
#[derive(Debug, Clone)]
pub struct SharedNamespace {
    inner: Arc<Mutex<Namespace>>,
}

impl SharedNamespace {
    /// Wraps a namespace for sharing
    pub fn new(namespace: Namespace) -> Self {
        Self {
            inner: Arc::new(Mutex::new(namespace)),
        }
    }

    /// Runs `f` with exclusive access to the namespace
    ///
    /// Group several operations in one closure to make them atomic together.
    pub fn with<R>(&self, f: impl FnOnce(&mut Namespace) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Recovers the namespace if this is the last handle
    pub fn try_into_inner(self) -> Result<Namespace, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl From<Namespace> for SharedNamespace {
    fn from(namespace: Namespace) -> Self {
        Self::new(namespace)
    }
}
