use std::{fmt, str::FromStr};

/// The two kinds of animal the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A cat, described by its fur colour.
    Cat,
    /// A dog, described by its breed.
    Dog,
}

impl Kind {
    /// The label used for this kind's specific attribute when displaying or
    /// prompting.
    #[must_use]
    pub const fn attribute_label(self) -> &'static str {
        match self {
            Self::Cat => "Fur colour",
            Self::Dog => "Breed",
        }
    }

    /// The canonical name, as written to the data file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "Cat",
            Self::Dog => "Dog",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKindError;

    /// Parses a kind case-insensitively.
    ///
    /// `gato` and `cachorro` are accepted alongside `cat` and `dog` so that
    /// older data files remain readable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "cat" | "gato" => Ok(Self::Cat),
            "dog" | "cachorro" => Ok(Self::Dog),
            _ => Err(UnknownKindError(trimmed.to_string())),
        }
    }
}

/// Error returned when a string does not name a known kind of animal.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown kind of animal '{0}': expected 'cat' or 'dog'")]
pub struct UnknownKindError(pub String);

/// The kind-specific part of an animal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Species {
    /// A cat and its fur colour.
    Cat {
        /// Colour of the cat's fur.
        fur_colour: String,
    },
    /// A dog and its breed.
    Dog {
        /// The dog's breed.
        breed: String,
    },
}

impl Species {
    /// Builds the species payload for `kind` from its attribute value.
    #[must_use]
    pub const fn new(kind: Kind, attribute: String) -> Self {
        match kind {
            Kind::Cat => Self::Cat {
                fur_colour: attribute,
            },
            Kind::Dog => Self::Dog { breed: attribute },
        }
    }

    /// The kind tag of this species.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Cat { .. } => Kind::Cat,
            Self::Dog { .. } => Kind::Dog,
        }
    }

    /// The kind-specific attribute (fur colour or breed).
    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            Self::Cat { fur_colour } => fur_colour,
            Self::Dog { breed } => breed,
        }
    }
}

/// A registered animal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    name: String,
    age: u32,
    species: Species,
}

impl Animal {
    /// Creates an animal of the given kind.
    ///
    /// Surrounding whitespace is stripped from the name and attribute, as it
    /// would be when the animal is read back from the data file.
    #[must_use]
    pub fn new(kind: Kind, name: String, age: u32, attribute: String) -> Self {
        Self {
            name: trimmed(name),
            age,
            species: Species::new(kind, trimmed(attribute)),
        }
    }

    /// Creates a cat.
    #[must_use]
    pub fn cat(name: impl Into<String>, age: u32, fur_colour: impl Into<String>) -> Self {
        Self::new(Kind::Cat, name.into(), age, fur_colour.into())
    }

    /// Creates a dog.
    #[must_use]
    pub fn dog(name: impl Into<String>, age: u32, breed: impl Into<String>) -> Self {
        Self::new(Kind::Dog, name.into(), age, breed.into())
    }

    /// The animal's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in whole years.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Whether this is a cat or a dog.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.species.kind()
    }

    /// The kind-specific payload.
    #[must_use]
    pub const fn species(&self) -> &Species {
        &self.species
    }

    /// The fur colour for a cat, the breed for a dog.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.species.attribute()
    }

    /// Whether this animal's name matches `name`, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(name.trim().chars().flat_map(char::to_lowercase))
    }
}

/// Strips surrounding whitespace in place.
fn trimmed(mut value: String) -> String {
    let end = value.trim_end().len();
    value.truncate(end);
    let start = value.len() - value.trim_start().len();
    value.drain(..start);
    value
}

/// Two-line human readable description.
impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}, Age: {}", self.name, self.age)?;
        write!(f, "{}: {}", self.kind().attribute_label(), self.attribute())
    }
}
