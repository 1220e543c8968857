//! Ordered collections of models returned by builders and relations.

use serde::Serialize;
use serde_json::Value as Json;

use crate::support::model::Model;

/// An ordered list of models, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Model>,
}

impl Collection {
    /// Create a collection from models.
    #[must_use]
    pub fn new(items: Vec<Model>) -> Self {
        Self { items }
    }

    /// The first model, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Model> {
        self.items.first()
    }

    /// Take the first model, dropping the rest.
    #[must_use]
    pub fn into_first(self) -> Option<Model> {
        self.items.into_iter().next()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Model> {
        self.items.get(index)
    }

    /// Returns true if this collection has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this collection.
    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.items.iter()
    }

    /// Map every model to another value.
    pub fn map<U, F: FnMut(&Model) -> U>(&self, f: F) -> Vec<U> {
        self.items.iter().map(f).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Model> {
        self.items
    }
}

impl std::ops::Index<usize> for Collection {
    type Output = Model;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl FromIterator<Model> for Collection {
    fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = Model;
    type IntoIter = std::vec::IntoIter<Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A collection used as a filter or payload is a plain JSON array.
impl From<Collection> for Json {
    fn from(collection: Collection) -> Self {
        Json::Array(collection.items.iter().map(Model::to_json).collect())
    }
}
