use serde::{Deserialize, Serialize};

/// Identifier of an object held by a granary instance.
///
/// Instance ids are plain 64-bit integers; anything else the user types is
/// carried verbatim as an opaque store-native reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Instance(u64),
    Opaque(String),
}

impl ObjectId {
    /// Resolves a user-supplied string: integer parse first, opaque wrap
    /// otherwise. Every string has a representation, so this never fails.
    pub fn wrap(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(id) => ObjectId::Instance(id),
            Err(_) => ObjectId::Opaque(raw.to_owned()),
        }
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ObjectId::Instance(id) => write!(f, "{}", id),
            ObjectId::Opaque(reference) => write!(f, "{}", reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_strings_resolve_to_instance_ids() {
        assert_eq!(ObjectId::wrap("12345"), ObjectId::Instance(12345));
        assert_eq!(ObjectId::wrap("0"), ObjectId::Instance(0));
    }

    #[test]
    fn other_strings_are_wrapped_verbatim() {
        assert_eq!(
            ObjectId::wrap("o0001234"),
            ObjectId::Opaque("o0001234".to_owned())
        );
        // a negative number is not a valid instance id either
        assert_eq!(ObjectId::wrap("-1"), ObjectId::Opaque("-1".to_owned()));
    }

    #[test]
    fn display_matches_the_original_spelling() {
        assert_eq!(ObjectId::wrap("42").to_string(), "42");
        assert_eq!(ObjectId::wrap("o0001234").to_string(), "o0001234");
    }
}
