//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`Id`] type used for node and edge identifiers.
//! Identifiers arriving as integers are normalized to their decimal string form,
//! so `7` and `"7"` name the same node.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<T>(f: impl FnOnce(&mut DefaultStringInterner) -> T) -> T {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Canonical identifier of a graph node or edge
///
/// Two `Id`s are equal exactly when their string forms are equal. The type is
/// `Copy` and cheap to hash, which makes it suitable as an adjacency map key.
///
/// # Examples
///
/// ```
/// use stratum_core::identifier::Id;
///
/// let from_text = Id::new("42");
/// let from_number = Id::from(42u64);
///
/// assert_eq!(from_text, from_number);
/// assert_eq!(from_number, "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the canonical string form of this identifier.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<u64> for Id {
    /// Normalizes a numeric identifier to its decimal string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum_core::identifier::Id;
    ///
    /// assert_eq!(Id::from(7u64), "7");
    /// ```
    fn from(value: u64) -> Self {
        Self::new(&value.to_string())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::new(&value.to_string())
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Id, E> {
        Ok(Id::new(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Id, E> {
        Ok(Id::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Id, E> {
        Ok(Id::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Id, E> {
        float_id_text(value)
            .map(|text| Id::new(&text))
            .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &self))
    }
}

/// Smallest magnitude written without an exponent by a JavaScript number.
const MIN_PLAIN_FLOAT: f64 = 1e-6;
/// Magnitude from which a JavaScript number switches to exponent notation.
const MAX_PLAIN_FLOAT: f64 = 1e21;

/// Returns the text of a float identifier, or `None` if it has no plain
/// decimal form.
///
/// Inside `[1e-6, 1e21)` the shortest round-trip digits printed by `f64`'s
/// `Display` match what the editor's JavaScript data layer produces for the
/// same number (`2.5` gives `"2.5"`, `7.0` gives `"7"`). Outside that range
/// JavaScript switches to exponent notation (`1e21` gives `"1e+21"`), so
/// those values, non-finite values, and tiny non-zero values are rejected
/// instead of being turned into an identifier the editor would not match.
fn float_id_text(value: f64) -> Option<String> {
    if value == 0.0 {
        // Both signed zeros print as "0".
        return Some("0".to_owned());
    }
    let magnitude = value.abs();
    if !(MIN_PLAIN_FLOAT..MAX_PLAIN_FLOAT).contains(&magnitude) {
        return None;
    }
    Some(value.to_string())
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}
