#![forbid(unsafe_code)]

use crate::model::ORPHAN_OBJECTIVE_ID;

const MAX_ENTITY_ID_LEN: usize = 128;

/// Id shared by a domain entity (objective/task) and the layout node that draws it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, EntityIdError> {
        let value = value.into();
        validate_entity_id(&value)?;
        Ok(Self(value.trim().to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityIdError {
    Empty,
    TooLong,
    ContainsControl,
    Reserved,
}

impl EntityIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "entity id must not be empty",
            Self::TooLong => "entity id is too long",
            Self::ContainsControl => "entity id contains control characters",
            Self::Reserved => "entity id is reserved for unassigned tasks",
        }
    }
}

impl std::fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EntityIdError {}

fn validate_entity_id(value: &str) -> Result<(), EntityIdError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EntityIdError::Empty);
    }
    if trimmed.chars().count() > MAX_ENTITY_ID_LEN {
        return Err(EntityIdError::TooLong);
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(EntityIdError::ContainsControl);
    }
    if trimmed == ORPHAN_OBJECTIVE_ID {
        return Err(EntityIdError::Reserved);
    }
    Ok(())
}
