//! Raw request header mapping.
//!
//! Header names are kept exactly as the client sent them. There is no case
//! normalization and no accumulation of repeated names: inserting a name that
//! is already present replaces its value.

use std::collections::HashMap;
use std::collections::hash_map::Iter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning the value it replaced.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> Option<String> {
        self.inner.insert(name.into(), value.into())
    }

    /// Case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Lookup ignoring ASCII case. When several spellings are present the
    /// result is any one of them.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| self.inner.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
