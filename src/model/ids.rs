// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Identifier of a visit as handed out by the visit source.
///
/// Opaque apart from one rule: it carries at least one non-whitespace character. Some backends
/// send integer ids; those are kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireId", into = "SmolStr")]
pub struct VisitId(SmolStr);

impl VisitId {
    pub fn new(value: impl Into<SmolStr>) -> Result<Self, IdError> {
        let value = value.into();
        match value.as_str() {
            "" => Err(IdError::Empty),
            text if text.trim().is_empty() => Err(IdError::Blank),
            _ => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for VisitId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for VisitId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for VisitId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<VisitId> for SmolStr {
    fn from(id: VisitId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(SmolStr),
    Number(u64),
}

impl TryFrom<WireId> for VisitId {
    type Error = IdError;

    fn try_from(raw: WireId) -> Result<Self, Self::Error> {
        match raw {
            WireId::Text(text) => Self::new(text),
            WireId::Number(number) => Self::new(number.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("visit id must not be empty")]
    Empty,
    #[error("visit id must not be blank")]
    Blank,
    #[error("missing visitId (also accepted as `_id` or `id`)")]
    Missing,
}

#[cfg(test)]
mod tests {
    use super::{IdError, VisitId};

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(VisitId::new(""), Err(IdError::Empty));
        assert_eq!(VisitId::new(" \t"), Err(IdError::Blank));
        assert_eq!(" x ".parse::<VisitId>().map(|id| id.to_string()), Ok(" x ".to_owned()));
    }

    #[test]
    fn deserializes_strings_and_integers() {
        let from_text: VisitId = serde_json::from_str("\"v-17\"").expect("text id");
        assert_eq!(from_text.as_str(), "v-17");

        let from_number: VisitId = serde_json::from_str("42").expect("numeric id");
        assert_eq!(from_number.as_str(), "42");

        let err = serde_json::from_str::<VisitId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "{err}");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = VisitId::new("abc").expect("id");
        assert_eq!(serde_json::to_string(&id).expect("json"), "\"abc\"");
    }
}
