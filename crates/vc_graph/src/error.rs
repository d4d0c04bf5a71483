//! Error types.
//!
//! - [`SchemaError`]: a declaration violates a schema invariant.
//! - [`SurrogateChainError`]: a type would be both a surrogate source and target.
//! - [`DispatchError`]: a value has no applicable clone or merge strategy.
//! - [`CloneError`]: any of the above, returned by the public entry points.

use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SchemaError

/// A declaration that cannot be turned into a schema.
///
/// Built once per `(type, Options)` and cached, later requests receive a
/// copy of the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("In type '{type_path}': {kind}")]
pub struct SchemaError {
    pub type_path: &'static str,
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    #[inline]
    pub const fn new(type_path: &'static str, kind: SchemaErrorKind) -> Self {
        Self { type_path, kind }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("No serializable fields")]
    NoSerializableFields,

    #[error("Serializable fields in collection are not supported")]
    FieldsInCollection,

    #[error("Item {0} must be serialized")]
    MustBeSerialized(String),

    #[error("More than one of optional, required and member attributes for field '{0}'")]
    MultipleMarkers(String),

    #[error("Unable to either set or merge item {0}")]
    UnableToSetOrMerge(String),

    #[error("Item {item} has an unusable type: {reason}")]
    UnclassifiableItem { item: String, reason: String },

    #[error("Duplicate SerializeItemIf")]
    DuplicateItemIf,

    #[error("SerializeItemIf may only be used inside of IEnumerable")]
    ItemIfOutsideCollection,

    #[error("Duplicate Factory: '{0}' and '{1}'")]
    DuplicateFactory(String, String),

    #[error("Factory '{0}' must be a static method without parameters")]
    BadFactory(String),

    #[error("Duplicated unknown storage in field {0}")]
    DuplicateUnknownStorage(String),

    #[error("Duplicate item {0} / {1}")]
    DuplicateItem(String, String),

    #[error("Empty tag for field '{0}'")]
    EmptyTag(String),

    #[error("Bad character '{0}' in tag for field '{1}'")]
    BadCharacter(char, String),

    #[error("Duplicate tag '{0}' for field '{1}'")]
    DuplicateTag(String, String),

    #[error("Allows reading from ancestor {ancestor}, but has {items} items instead of {expected}")]
    AncestorMismatch {
        ancestor: &'static str,
        items: usize,
        expected: usize,
    },

    #[error("Empty read alias")]
    EmptyReadAlias,

    #[error("Read alias '{0}' was already defined for '{1}'")]
    ReadAliasDefined(String, &'static str),

    #[error("Empty write alias")]
    EmptyWriteAlias,

    #[error("Duplicate {0}: '{1}' and '{2}'")]
    DuplicateMethod(&'static str, String, String),

    #[error("SurrogateIf '{0}' must return bool, but returns '{1}'")]
    SurrogateIfReturn(String, &'static str),

    #[error("Static {0} '{1}' must have 1 parameter, but has {2}")]
    StaticArity(&'static str, String, usize),

    #[error("Static {0} '{1}' must accept parameter of type '{2}', but has '{3}'")]
    StaticParameter(&'static str, String, &'static str, &'static str),

    #[error("{0} '{1}' must have 0 parameters, but has {2}")]
    InstanceArity(&'static str, String, usize),

    #[error("ToSurrogate '{0}' returns void")]
    ToSurrogateVoid(String),

    #[error("ToSurrogate '{0}' returns owner type")]
    ToSurrogateOwner(String),

    #[error("FromSurrogate '{0}' must be static")]
    FromSurrogateNotStatic(String),

    #[error("FromSurrogate '{0}' must return '{1}', but returns '{2}'")]
    FromSurrogateReturn(String, &'static str, &'static str),

    #[error("FromSurrogate '{0}' accepts owner type")]
    FromSurrogateOwner(String),

    #[error("Schema requested while it is being built")]
    RecursiveDefinition,
}

// -----------------------------------------------------------------------------
// SurrogateChainError

/// `chained` already takes the opposite surrogate role of the one `owner`
/// wants to give it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("In type '{owner}': Surrogate chain for type '{chained}'")]
pub struct SurrogateChainError {
    pub owner: &'static str,
    pub chained: &'static str,
}

// -----------------------------------------------------------------------------
// DispatchError

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("Unable to clone type: {0}")]
    Unsupported(&'static str),

    #[error("Unable to merge type: {0}")]
    Unmergeable(&'static str),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Type {0} has neither a factory nor a default constructor")]
    NoConstructor(&'static str),

    #[error("Unable to merge into shared pointer {0}")]
    SharedPointer(&'static str),

    #[error("Array {type_path} expects {expected} elements, found {found}")]
    ShapeMismatch {
        type_path: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Both FromSurrogate and ToSurrogate must be defined for cloning {0}")]
    IncompleteSurrogate(&'static str),
}

// -----------------------------------------------------------------------------
// CloneError

/// Any failure of a clone, merge or schema request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CloneError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    SurrogateChain(#[from] SurrogateChainError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn schema_error_names_owner() {
        let err = SchemaError::new("demo::Rec", SchemaErrorKind::EmptyTag("x".into()));
        assert_eq!(err.to_string(), "In type 'demo::Rec': Empty tag for field 'x'");

        let err: CloneError = err.into();
        assert_eq!(err.to_string(), "In type 'demo::Rec': Empty tag for field 'x'");
    }

    #[test]
    fn dispatch_texts() {
        assert_eq!(
            DispatchError::Unsupported("demo::Abstract").to_string(),
            "Unable to clone type: demo::Abstract"
        );
        assert_eq!(
            DispatchError::Unmergeable("u32").to_string(),
            "Unable to merge type: u32"
        );
    }
}
