//! Composite callback keys.
//!
//! Follow-up buttons carry either `entityType/entityName` (pick a candidate) or
//! `section/entityType/entityName` (show one section of a resolved entity).
//! The entity name is always the last segment and may itself contain `/`.

use std::fmt;
use std::str::FromStr;

use crate::catalog::EntityType;
use crate::errors::ResolveError;

const SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackKey {
    Element { kind: EntityType, name: String },
    Section { section: String, kind: EntityType, name: String },
}

impl CallbackKey {
    pub fn element(kind: EntityType, name: impl Into<String>) -> Self {
        CallbackKey::Element { kind, name: name.into() }
    }

    pub fn section(section: impl Into<String>, kind: EntityType, name: impl Into<String>) -> Self {
        CallbackKey::Section {
            section: section.into(),
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> EntityType {
        match self {
            CallbackKey::Element { kind, .. } | CallbackKey::Section { kind, .. } => *kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CallbackKey::Element { name, .. } | CallbackKey::Section { name, .. } => name,
        }
    }
}

impl fmt::Display for CallbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackKey::Element { kind, name } => write!(f, "{}{}{}", kind.label(), SEPARATOR, name),
            CallbackKey::Section { section, kind, name } => {
                write!(f, "{}{}{}{}{}", section, SEPARATOR, kind.label(), SEPARATOR, name)
            }
        }
    }
}

impl FromStr for CallbackKey {
    type Err = ResolveError;

    /// A second segment naming an entity type makes a section key (so a
    /// section may be titled `Items`); otherwise a leading entity type makes an
    /// element key.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ResolveError::InvalidKey(raw.to_string());
        let (head, rest) = raw.split_once(SEPARATOR).ok_or_else(invalid)?;
        let section_form = rest
            .split_once(SEPARATOR)
            .is_some_and(|(kind, _)| kind.parse::<EntityType>().is_ok());
        if !section_form {
            if let Ok(kind) = head.parse::<EntityType>() {
                if rest.is_empty() {
                    return Err(invalid());
                }
                return Ok(CallbackKey::element(kind, rest));
            }
        }
        let (kind, name) = rest.split_once(SEPARATOR).ok_or_else(invalid)?;
        let kind: EntityType = kind.parse()?;
        if head.trim().is_empty() || name.is_empty() {
            return Err(invalid());
        }
        Ok(CallbackKey::section(head.trim(), kind, name))
    }
}
