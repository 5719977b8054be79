//! Entity identity reconciliation.
//!
//! Entities created on the canvas carry client-local placeholder ids until
//! the persistence layer assigns a canonical UUID. Representing identity as
//! a sum type makes the persisted-or-placeholder decision a pattern match
//! instead of a string test.

use std::{fmt, str::FromStr};

use nanoid::nanoid;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a workflow entity.
///
/// `Persisted` ids are canonical, server-minted UUIDs. `Local` ids are
/// client-generated placeholders for entities not yet persisted; they are
/// stripped from outgoing create payloads so the server can allocate the
/// canonical id, which is then merged back into canvas state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    /// Canonical identifier assigned by the persistence layer.
    Persisted(Uuid),
    /// Client-local placeholder, any string that is not a UUID.
    Local(String),
}

impl EntityId {
    /// mint a fresh client-local placeholder id
    pub fn generate_local() -> Self {
        EntityId::Local(format!("local-{}", nanoid!()))
    }

    /// whether this id was assigned by the persistence layer
    pub fn is_persisted(&self) -> bool {
        matches!(self, EntityId::Persisted(_))
    }

    /// the canonical UUID, if this id is persisted
    pub fn persisted(&self) -> Option<&Uuid> {
        match self {
            EntityId::Persisted(id) => Some(id),
            EntityId::Local(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            EntityId::Persisted(id) => write!(f, "{}", id),
            EntityId::Local(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match Uuid::parse_str(s) {
            Ok(id) => EntityId::Persisted(id),
            Err(_) => EntityId::Local(s.to_string()),
        })
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        match Uuid::parse_str(s) {
            Ok(id) => EntityId::Persisted(id),
            Err(_) => EntityId::Local(s.to_string()),
        }
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        EntityId::Persisted(id)
    }
}

/// Normalize a display name for comparison: lowercase, with runs of
/// whitespace collapsed to a single underscore.
///
/// Slugging is idempotent but not injective ("Promo A" and "promo_a" both
/// slug to "promo_a"), so it is only a fallback for matching template names;
/// lookup is keyed by id whenever one is present.
pub fn slug(name: &str) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(name.trim(), "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_parses_as_persisted() {
        let id = EntityId::from("550e8400-e29b-41d4-a716-446655440000");
        assert!(id.is_persisted());
        assert!(id.persisted().is_some());
    }

    #[test]
    fn test_plain_string_parses_as_local() {
        let id = EntityId::from("action-1724316123");
        assert!(!id.is_persisted());
        assert_eq!(id.persisted(), None);
    }

    #[test]
    fn test_generated_local_never_persisted() {
        let id = EntityId::generate_local();
        assert!(!id.is_persisted());

        // re-parsing the display form stays local
        let reparsed = EntityId::from(id.to_string().as_str());
        assert_eq!(reparsed, id);
    }

    #[test]
    fn test_server_uuid_is_stable() {
        let uuid = Uuid::new_v4();
        let id = EntityId::from(uuid);
        assert!(id.is_persisted());

        let reparsed = EntityId::from(id.to_string().as_str());
        assert_eq!(reparsed, id);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let uuid = Uuid::new_v4();
        let persisted = EntityId::from(uuid);
        let json = serde_json::to_string(&persisted).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));

        let local: EntityId = serde_json::from_str("\"start\"").unwrap();
        assert_eq!(local, EntityId::Local("start".to_string()));
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(slug("Welcome Campaign"), "welcome_campaign");
    }

    #[test]
    fn test_slug_collapses_whitespace_runs() {
        assert_eq!(slug("  Promo   A  "), "promo_a");
    }

    #[test]
    fn test_slug_idempotent() {
        let once = slug("Special Offer");
        assert_eq!(slug(&once), once);
    }

    #[test]
    fn test_slug_collision_is_accepted() {
        // distinct names may collide after slugging; lookup is id-first
        assert_eq!(slug("Promo A"), slug("promo_a"));
    }
}
