use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Substring → category label rules, applied in insertion order.
///
/// Order matters: when several keys match the same text, the one applied last
/// decides the label. A hash map would lose that, so pairs are kept in a `Vec`
/// and JSON objects are read in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: Vec<(String, String)>
}

impl CategoryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. Re-inserting an existing key replaces its label in place.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, label)| (key.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CategoryMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();

        for (key, label) in iter {
            mapping.insert(key, label);
        }

        mapping
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = CategoryMapping;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of substring to category label")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>
    {
        let mut mapping = CategoryMapping::new();

        while let Some((key, label)) = access.next_entry::<String, String>()? {
            mapping.insert(key, label);
        }

        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for CategoryMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MappingVisitor)
    }
}
