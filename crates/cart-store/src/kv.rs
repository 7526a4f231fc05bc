//! Typed key-value store with automatic serialization.

use serde::{de::DeserializeOwned, Serialize};

use crate::{KeyValueBackend, StoreError};

/// Type-safe store over a [`KeyValueBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Writes always replace the full value.
#[derive(Debug, Clone)]
pub struct Store<B> {
    backend: B,
}

impl<B: KeyValueBackend> Store<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartItem>> = store.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw bytes stored under a key.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.get(key)
    }

    /// Set a value in the store, replacing any previous value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("@RocketShoes:cart", &cart.items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)?;
        tracing::trace!(key, bytes = bytes.len(), "store write");
        Ok(())
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        amount: u32,
    }

    #[test]
    fn test_get_missing_key() {
        let store = Store::new(MemoryBackend::new());
        let value: Option<Vec<Line>> = store.get("missing").unwrap();
        assert!(value.is_none());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let store = Store::new(MemoryBackend::new());
        store
            .set("cart", &vec![Line { id: 1, amount: 2 }, Line { id: 2, amount: 1 }])
            .unwrap();
        store.set("cart", &vec![Line { id: 3, amount: 5 }]).unwrap();

        let value: Vec<Line> = store.get("cart").unwrap().unwrap();
        assert_eq!(value, vec![Line { id: 3, amount: 5 }]);
    }

    #[test]
    fn test_get_unparseable_value() {
        let backend = MemoryBackend::new();
        backend.set("cart", b"{not json").unwrap();
        let store = Store::new(backend);

        let result: Result<Option<Vec<Line>>, _> = store.get("cart");
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
        assert_eq!(store.get_raw("cart").unwrap().unwrap(), b"{not json".to_vec());
    }

    #[test]
    fn test_delete() {
        let store = Store::new(MemoryBackend::new());
        store.set("cart", &Vec::<Line>::new()).unwrap();
        assert!(store.exists("cart").unwrap());

        store.delete("cart").unwrap();
        assert!(!store.exists("cart").unwrap());
    }
}
