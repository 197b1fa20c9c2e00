//! Key-value persistence used for prediction history and endpoint settings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key holding the JSON array of history entries.
pub const HISTORY_KEY: &str = "prediction_history";

/// Storage key holding the prediction endpoint URL.
pub const ENDPOINT_KEY: &str = "pond_predictor_api_url";

/// String-keyed, string-valued storage with last-write-wins semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove_item(key)
    }
}

/// In-memory store. Clones share the same map, so a clone can stand in for
/// the device storage surviving an app restart.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
