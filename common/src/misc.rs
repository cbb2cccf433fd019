use serde::{Deserialize, Serialize};

use crate::error::{AppError, Res};

/// The two authenticable principal kinds. A User owns applications and
/// bookmarks; a Company owns job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Company,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Company => "Company",
        }
    }

    pub fn from_str(value: &str) -> Res<Self> {
        match value {
            "User" => Ok(EntityKind::User),
            "Company" => Ok(EntityKind::Company),
            other => Err(AppError::BadRequest(format!(
                "Invalid entity type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        for kind in [EntityKind::User, EntityKind::Company] {
            assert_eq!(EntityKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn kind_rejects_unknown() {
        assert!(EntityKind::from_str("Admin").is_err());
        assert!(EntityKind::from_str("").is_err());
    }
}
