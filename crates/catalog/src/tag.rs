//! Compatibility tags.
//!
//! A tag is an opaque label. Products expose what they *are* through
//! compatibility tags and what they *demand* from the rest of a build through
//! required tags. The engine only looks inside a tag for the prefix families
//! in [`TagFamily`]; everything else is compared as a whole string.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rigforge_core::{DomainError, ValueObject};

/// A single compatibility label, e.g. `socket-am5` or `case-atx`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl ValueObject for Tag {}

impl Tag {
    /// Build a tag, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("tag cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn family(&self) -> Option<TagFamily> {
        TagFamily::ALL.into_iter().find(|f| f.matches(self))
    }
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefix families interpreted by the pairwise compatibility rules.
///
/// A product carries at most one tag per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    /// CPU socket, e.g. `socket-lga1700`.
    Socket,
    /// Memory generation, e.g. `ram-ddr5`.
    RamType,
}

impl TagFamily {
    pub const ALL: [TagFamily; 2] = [TagFamily::Socket, TagFamily::RamType];

    pub fn prefix(self) -> &'static str {
        match self {
            TagFamily::Socket => "socket-",
            TagFamily::RamType => "ram-",
        }
    }

    pub fn matches(self, tag: &Tag) -> bool {
        tag.as_str().starts_with(self.prefix())
    }
}

/// Unordered, duplicate-free set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw strings, dropping duplicates.
    pub fn parse<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| Tag::parse(s.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    pub fn contains_str(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn extend_from(&mut self, other: &TagSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Every tag of `required` is present here.
    pub fn contains_all(&self, required: &TagSet) -> bool {
        required.0.is_subset(&self.0)
    }

    /// At least one tag of `options` is present here.
    pub fn contains_any(&self, options: &TagSet) -> bool {
        !self.0.is_disjoint(&options.0)
    }

    /// The single tag of `family`, if any.
    pub fn family_tag(&self, family: TagFamily) -> Option<&Tag> {
        self.0.iter().find(|t| family.matches(t))
    }

    /// All tags of `family` (more than one means malformed data).
    pub fn family_tags(&self, family: TagFamily) -> Vec<&Tag> {
        self.0.iter().filter(|t| family.matches(t)).collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
