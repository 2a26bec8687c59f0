use serde::{Deserialize, Serialize};

/// What the user has picked. At most one kind is active; choosing a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Planet {
        key: String,
    },
    Aspect {
        body1: String,
        body2: String,
        aspect: String,
    },
    Pattern {
        id: String,
        bodies: Vec<String>,
    },
}

impl Selection {
    pub fn planet(key: impl Into<String>) -> Self {
        Selection::Planet { key: key.into() }
    }

    pub fn aspect(body1: impl Into<String>, body2: impl Into<String>, aspect: impl Into<String>) -> Self {
        Selection::Aspect {
            body1: body1.into(),
            body2: body2.into(),
            aspect: aspect.into(),
        }
    }

    pub fn pattern<S: Into<String>>(id: impl Into<String>, bodies: impl IntoIterator<Item = S>) -> Self {
        Selection::Pattern {
            id: id.into(),
            bodies: bodies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Numeric tag written to the frame header: 0 none, 1 planet, 2 aspect, 3 pattern.
    pub fn kind_code(&self) -> u32 {
        match self {
            Selection::None => 0,
            Selection::Planet { .. } => 1,
            Selection::Aspect { .. } => 2,
            Selection::Pattern { .. } => 3,
        }
    }

    /// The selected planet, if any.
    pub fn planet_key(&self) -> Option<&str> {
        match self {
            Selection::Planet { key } => Some(key),
            _ => None,
        }
    }

    /// Whether `key` takes part in the selection, for highlighting.
    pub fn involves(&self, key: &str) -> bool {
        match self {
            Selection::None => false,
            Selection::Planet { key: k } => k == key,
            Selection::Aspect { body1, body2, .. } => body1 == key || body2 == key,
            Selection::Pattern { bodies, .. } => bodies.iter().any(|b| b == key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_mutually_exclusive() {
        let mut sel = Selection::aspect("mars", "venus", "Square");
        assert_eq!(sel.kind_code(), 2);
        sel = Selection::planet("mars");
        assert_eq!(sel.kind_code(), 1);
        assert!(!matches!(sel, Selection::Aspect { .. }));
        sel = Selection::pattern("grand-trine-1", ["sun", "mars", "jupiter"]);
        assert_eq!(sel.planet_key(), None);
        assert_eq!(sel.kind_code(), 3);
    }

    #[test]
    fn involves_matches_participants() {
        let sel = Selection::aspect("mars", "venus", "Square");
        assert!(sel.involves("venus"));
        assert!(!sel.involves("sun"));
        assert!(!Selection::None.involves("sun"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Selection::planet("earth")).unwrap();
        assert_eq!(json, r#"{"kind":"planet","key":"earth"}"#);
        let back: Selection = serde_json::from_str(r#"{"kind":"none"}"#).unwrap();
        assert!(back.is_none());
    }
}
