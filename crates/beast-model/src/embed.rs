//! Relations between documents.
//!
//! A relation starts life as a stub carrying only the target's natural id.
//! Cross-referencing swaps the stub for an embedded summary of the target
//! when the id resolves, and leaves it alone when it does not.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A value with a natural identity.
pub trait Identified {
    type Id: Clone + Ord + fmt::Debug + fmt::Display + Serialize;

    fn id(&self) -> Self::Id;
}

/// Either an unresolved stub (`{"id": ...}`) or an embedded copy of the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Embedded<T: Identified> {
    Stub { id: T::Id },
    Resolved(T),
}

impl<T: Identified> Embedded<T> {
    pub fn stub(id: T::Id) -> Self {
        Self::Stub { id }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub { .. })
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Stub { .. } => None,
            Self::Resolved(value) => Some(value),
        }
    }

    /// Replace a stub with the indexed target. Unknown ids keep the stub.
    pub fn resolve_from(self, index: &BTreeMap<T::Id, T>) -> Self
    where
        T: Clone,
    {
        match self {
            Self::Stub { id } => match index.get(&id) {
                Some(target) => Self::Resolved(target.clone()),
                None => Self::Stub { id },
            },
            resolved @ Self::Resolved(_) => resolved,
        }
    }
}

impl<T: Identified> Identified for Embedded<T> {
    type Id = T::Id;

    fn id(&self) -> Self::Id {
        match self {
            Self::Stub { id } => id.clone(),
            Self::Resolved(value) => value.id(),
        }
    }
}
