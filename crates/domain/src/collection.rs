use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The collections held by the local cache, named as the backend names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Calendars,
    Events,
    Invitations,
    SharedCalendars,
}

pub const ALL_COLLECTIONS: [Collection; 4] = [
    Collection::Calendars,
    Collection::Events,
    Collection::Invitations,
    Collection::SharedCalendars,
];

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendars => "calendars",
            Self::Events => "events",
            Self::Invitations => "invitations",
            Self::SharedCalendars => "shared_calendars",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown collection: {0}")]
pub struct UnknownCollectionError(pub String);

impl FromStr for Collection {
    type Err = UnknownCollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_COLLECTIONS
            .iter()
            .find(|c| c.as_str() == s.trim())
            .copied()
            .ok_or_else(|| UnknownCollectionError(s.to_string()))
    }
}

/// A set of collections, e.g. the ones that need to be reloaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CollectionSet(u8);

impl CollectionSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        ALL_COLLECTIONS.iter().copied().collect()
    }

    pub fn with(mut self, collection: Collection) -> Self {
        self.insert(collection);
        self
    }

    pub fn insert(&mut self, collection: Collection) {
        self.0 |= collection.bit();
    }

    pub fn contains(&self, collection: Collection) -> bool {
        self.0 & collection.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Collection> + '_ {
        ALL_COLLECTIONS
            .iter()
            .copied()
            .filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Collection> for CollectionSet {
    fn from_iter<I: IntoIterator<Item = Collection>>(iter: I) -> Self {
        let mut set = Self::empty();
        for collection in iter {
            set.insert(collection);
        }
        set
    }
}
