//! Configuration of schema construction.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// MemberKind

bitflags! {
    /// Member kinds a policy applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MemberKind: u8 {
        /// Plain data members.
        const FIELD    = 1 << 0;
        /// Accessor-backed members.
        const PROPERTY = 1 << 1;
    }
}

impl Default for MemberKind {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

// -----------------------------------------------------------------------------
// Optionality

/// How a member takes part in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Optionality {
    /// Always present.
    Required,
    /// May be absent.
    Optional,
    /// Present only when it differs from the type's default instance.
    Member,
}

// -----------------------------------------------------------------------------
// InclusionPolicy

/// "Include every public member of `kinds` with `optionality`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusionPolicy {
    pub optionality: Optionality,
    pub kinds: MemberKind,
}

impl InclusionPolicy {
    #[inline]
    pub const fn new(optionality: Optionality, kinds: MemberKind) -> Self {
        Self { optionality, kinds }
    }
}

// -----------------------------------------------------------------------------
// TagMode

/// How item tags are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagMode {
    /// The member alias, falling back to its name.
    #[default]
    Aliases,
    /// The member name, aliases are ignored.
    Names,
    /// A generated four-letter id.
    Ids,
}

// -----------------------------------------------------------------------------
// Options

/// Schema configuration.
///
/// Schemas are cached per `(type, Options)`, two different values of this
/// struct never share a schema.
///
/// ```
/// use vc_graph::options::{Options, TagMode};
///
/// let options: Options = ron::from_str("(tag_mode: Ids, allow_empty_types: true)").unwrap();
/// assert_eq!(options.tag_mode, TagMode::Ids);
/// assert!(options.allow_empty_types);
/// assert!(!options.allow_unknown_fields);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub tag_mode: TagMode,
    /// Used for types that do not declare their own policy.
    pub default_policy: Option<InclusionPolicy>,
    pub allow_unknown_fields: bool,
    pub allow_empty_types: bool,
    /// Skip collections whose elements all fail the element predicate.
    pub check_for_empty_collections: bool,
}

impl Options {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tag_mode: TagMode::Aliases,
            default_policy: None,
            allow_unknown_fields: false,
            allow_empty_types: false,
            check_for_empty_collections: false,
        }
    }

    #[inline]
    pub const fn with_tag_mode(mut self, tag_mode: TagMode) -> Self {
        self.tag_mode = tag_mode;
        self
    }

    #[inline]
    pub const fn with_default_policy(mut self, policy: InclusionPolicy) -> Self {
        self.default_policy = Some(policy);
        self
    }

    #[inline]
    pub const fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    #[inline]
    pub const fn allow_empty_types(mut self, allow: bool) -> Self {
        self.allow_empty_types = allow;
        self
    }

    #[inline]
    pub const fn check_for_empty_collections(mut self, check: bool) -> Self {
        self.check_for_empty_collections = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let options = Options::new()
            .with_tag_mode(TagMode::Names)
            .with_default_policy(InclusionPolicy::new(
                Optionality::Optional,
                MemberKind::FIELD | MemberKind::PROPERTY,
            ))
            .check_for_empty_collections(true);

        let text = serde_json::to_string(&options).unwrap();
        let back: Options = serde_json::from_str(&text).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn ron_policy() {
        let text = "(default_policy: Some((optionality: Member, kinds: \"FIELD\")))";
        let options: Options = ron::from_str(text).unwrap();
        let policy = options.default_policy.unwrap();
        assert_eq!(policy.optionality, Optionality::Member);
        assert_eq!(policy.kinds, MemberKind::FIELD);
        assert_eq!(options.tag_mode, TagMode::Aliases);
    }
}
