//! The in-memory collection of registered animals.

use std::path::Path;

use crate::{
    domain::animal::{Animal, Kind, UnknownKindError},
    storage::flat_file::{self, SkippedLine},
};

/// An ordered collection of animals.
///
/// Insertion order is preserved and names need not be unique.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registry {
    animals: Vec<Animal>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            animals: Vec::new(),
        }
    }

    /// Registers a new animal of the named kind.
    ///
    /// The name and attribute are trimmed before being stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `kind` is neither a cat nor a dog. The registry is
    /// left unchanged in that case.
    pub fn register(
        &mut self,
        kind: &str,
        name: &str,
        age: u32,
        attribute: &str,
    ) -> Result<&Animal, UnknownKindError> {
        let kind: Kind = kind.parse()?;
        let animal = Animal::new(kind, name.to_string(), age, attribute.to_string());
        tracing::debug!(%kind, name = animal.name(), "registered animal");
        Ok(self.push(animal))
    }

    /// Appends an already constructed animal.
    pub fn push(&mut self, animal: Animal) -> &Animal {
        let index = self.animals.len();
        self.animals.push(animal);
        &self.animals[index]
    }

    /// Iterates over every animal in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter()
    }

    /// Iterates over every animal whose name matches `name`, ignoring case.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Animal> {
        self.animals
            .iter()
            .filter(move |animal| animal.name_matches(name))
    }

    /// The number of registered animals.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether no animals are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Writes every animal to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), flat_file::Error> {
        flat_file::save(path, &self.animals)
    }

    /// Replaces the contents of the registry with the animals in `path`.
    ///
    /// Malformed lines are skipped and returned so the caller can report
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read. The registry
    /// keeps its previous contents in that case.
    pub fn load(&mut self, path: &Path) -> Result<Vec<SkippedLine>, flat_file::Error> {
        let loaded = flat_file::load(path)?;
        self.animals = loaded.animals;
        Ok(loaded.skipped)
    }
}

impl FromIterator<Animal> for Registry {
    fn from_iter<T: IntoIterator<Item = Animal>>(iter: T) -> Self {
        Self {
            animals: iter.into_iter().collect(),
        }
    }
}
