use std::sync::{LazyLock, PoisonError, RwLock};

use crate::error::SchemaErrorKind;
use crate::hash::HashMap;
use crate::info::TypeInfo;
use crate::options::Options;

type AliasTable = HashMap<&'static str, &'static TypeInfo>;

static READ_ALIASES: LazyLock<RwLock<HashMap<Options, AliasTable>>> =
    LazyLock::new(|| RwLock::new(HashMap::default()));

/// Checks the aliases of `owner`, then registers its read aliases.
///
/// Registering an alias again for the same type is accepted.
pub(crate) fn register(
    owner: &'static TypeInfo,
    read: &[&'static str],
    write: Option<&'static str>,
    options: &Options,
) -> Result<(), SchemaErrorKind> {
    if read.iter().any(|alias| alias.trim().is_empty()) {
        return Err(SchemaErrorKind::EmptyReadAlias);
    }
    if write.is_some_and(str::is_empty) {
        return Err(SchemaErrorKind::EmptyWriteAlias);
    }
    if read.is_empty() {
        return Ok(());
    }

    let mut tables = READ_ALIASES.write().unwrap_or_else(PoisonError::into_inner);
    let table = tables.entry(*options).or_default();
    for alias in read {
        if let Some(other) = table.get(alias)
            && other.type_id() != owner.type_id()
        {
            return Err(SchemaErrorKind::ReadAliasDefined((*alias).into(), other.type_path()));
        }
    }
    for alias in read {
        table.insert(*alias, owner);
    }
    Ok(())
}

pub(crate) fn lookup(alias: &str, options: &Options) -> Option<&'static TypeInfo> {
    let tables = READ_ALIASES.read().unwrap_or_else(PoisonError::into_inner);
    tables.get(options)?.get(alias).copied()
}

pub(crate) fn clear() {
    READ_ALIASES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}
