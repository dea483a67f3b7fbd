// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits for the network-wide services a
//! `VoltageLevel` depends on, and a simple in-memory identity registry.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::Error;

/**
The network-wide registry of identifiers.

Every bus and switch a `VoltageLevel` creates is registered here, and
deregistered when it is removed, so that identifiers stay unique across all the
voltage levels of a network.

<details>
<summary>Example implementation backed by a network object store:</summary>

```ignore
impl bus_breaker_topology::IdentityRegistry for NetworkObjectStore {
    fn check_and_add(&self, id: &str, type_description: &str) -> Result<(), Error> {
        let mut objects = self.objects.write()?;
        if let Some(existing) = objects.get(id) {
            return Err(duplicate_error(id, existing, type_description));
        }
        objects.insert(id.to_string(), type_description.to_string());
        Ok(())
    }

    fn remove(&self, id: &str) {
        self.objects.write().remove(id);
    }
}
```

</details>
*/
pub trait IdentityRegistry: Send + Sync {
    /// Registers `id`, failing with a `Duplicate` error if it is already in
    /// use anywhere in the network.
    fn check_and_add(&self, id: &str, type_description: &str) -> Result<(), Error>;
    /// Deregisters `id`.
    fn remove(&self, id: &str);
}

/// A service that maintains a network-wide index of connected components.
///
/// It is notified every time a `VoltageLevel` drops a topology cache, so that
/// it can drop its own index in turn.
pub trait ConnectedComponentsIndex: Send + Sync {
    fn invalidate(&self);
}

/// An in-memory [`IdentityRegistry`].
#[derive(Default, Debug)]
pub struct ObjectStore {
    objects: Mutex<HashMap<String, String>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityRegistry for ObjectStore {
    fn check_and_add(&self, id: &str, type_description: &str) -> Result<(), Error> {
        let mut objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = objects.get(id) {
            return Err(Error::duplicate(format!(
                "{type_description} '{id}': the network already contains an object '{existing}' with the same id."
            )));
        }
        objects.insert(id.to_string(), type_description.to_string());
        Ok(())
    }

    fn remove(&self, id: &str) {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}
