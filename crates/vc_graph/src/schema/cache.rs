use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::cell::RefCell;
use std::sync::{LazyLock, PoisonError, RwLock};

use hashbrown::hash_map::Entry;

use crate::error::{CloneError, SchemaError, SchemaErrorKind};
use crate::hash::HashMap;
use crate::info::TypeInfo;
use crate::options::Options;
use crate::schema::{TypeSchema, aliases, builder, surrogate};

type SchemaKey = (TypeId, Options);
type SchemaEntry = Result<Arc<TypeSchema>, CloneError>;

/// Finished builds, failures included.
static SCHEMAS: LazyLock<RwLock<HashMap<SchemaKey, SchemaEntry>>> =
    LazyLock::new(|| RwLock::new(HashMap::default()));

std::thread_local! {
    /// Keys being built on this thread, innermost last.
    static BUILDING: RefCell<Vec<SchemaKey>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn is_building(type_id: TypeId, options: &Options) -> bool {
    BUILDING.with_borrow(|building| building.contains(&(type_id, *options)))
}

struct BuildGuard(SchemaKey);

impl BuildGuard {
    fn enter(key: SchemaKey) -> Self {
        BUILDING.with_borrow_mut(|building| building.push(key));
        Self(key)
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with_borrow_mut(|building| {
            if let Some(pos) = building.iter().rposition(|key| *key == self.0) {
                building.remove(pos);
            }
        });
    }
}

pub(crate) fn get_or_build(info: &'static TypeInfo, options: &Options) -> SchemaEntry {
    let key = (info.type_id(), *options);
    let path = info.type_path();

    if let Some(entry) = SCHEMAS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        if let Err(err) = entry {
            log::warn!("serving cached schema failure of `{path}`: {err}");
        }
        return entry.clone();
    }

    if is_building(key.0, options) {
        return Err(SchemaError::new(path, SchemaErrorKind::RecursiveDefinition).into());
    }

    // Built without holding the lock, nested schemas are requested from here.
    let built = {
        let _guard = BuildGuard::enter(key);
        builder::build(info, options).map(Arc::new)
    };

    match &built {
        Ok(schema) => log::debug!("built schema of `{path}` with {} items", schema.items().len()),
        Err(err) => log::debug!("schema of `{path}` failed: {err}"),
    }

    let mut schemas = SCHEMAS.write().unwrap_or_else(PoisonError::into_inner);
    match schemas.entry(key) {
        Entry::Occupied(entry) => {
            log::warn!("discarding concurrently built schema of `{path}`");
            entry.get().clone()
        }
        Entry::Vacant(entry) => entry.insert(built).clone(),
    }
}

pub(crate) fn reset() {
    SCHEMAS.write().unwrap_or_else(PoisonError::into_inner).clear();
    surrogate::clear_roles();
    aliases::clear();
}
