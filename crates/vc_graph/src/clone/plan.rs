use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::clone::{Cloner, dispatch};
use crate::clone::lazy::{LazyClone, LazyMerge};
use crate::error::{CloneError, DispatchError};
use crate::object::{Object, ObjectRef};
use crate::schema::{Item, TypeSchema};

/// An item cloned or merged through the functions of its own type.
struct Nested {
    index: usize,
    clone: LazyClone,
    merge: LazyMerge,
}

/// The field transfer of one record type.
///
/// Items are split into three groups:
///
/// - copyable and always transferred,
/// - copyable behind a predicate,
/// - everything else, including merge-only items, whose functions are only
///   resolved when a value reaches them.
pub(crate) struct ObjectPlan {
    schema: Arc<TypeSchema>,
    copyable: Vec<(usize, LazyClone)>,
    copyable_if: Vec<(usize, LazyClone)>,
    nested: Vec<Nested>,
}

impl ObjectPlan {
    pub(crate) fn new(cloner: &Cloner, schema: Arc<TypeSchema>) -> Result<Self, CloneError> {
        let mut copyable = Vec::new();
        let mut copyable_if = Vec::new();
        let mut nested = Vec::new();

        for (index, item) in schema.items().iter().enumerate() {
            let info = item.type_info();
            if item.is_copyable() && item.has_setter() {
                let copy = LazyClone::eager(cloner, info)?;
                match item.predicate() {
                    None => copyable.push((index, copy)),
                    Some(_) => copyable_if.push((index, copy)),
                }
            } else {
                nested.push(Nested {
                    index,
                    clone: LazyClone::new(info),
                    merge: LazyMerge::new(info),
                });
            }
        }

        Ok(Self {
            schema,
            copyable,
            copyable_if,
            nested,
        })
    }

    #[inline]
    pub(crate) fn schema(&self) -> &Arc<TypeSchema> {
        &self.schema
    }

    /// Deep clone: hooks, factory, then every transferred item.
    pub(crate) fn deep(&self, cloner: &Cloner, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
        let hooks = self.schema.hooks();

        hooks.before_serialization.iter().for_each(|hook| (hook.func)(src));
        let mut result = self.schema.construct()?;
        hooks.before_deserialization.iter().for_each(|hook| (hook.func)(&mut *result));

        self.transfer(cloner, &mut *result, src, false)?;

        hooks.after_serialization.iter().for_each(|hook| (hook.func)(src));
        hooks.after_deserialization.iter().for_each(|hook| (hook.func)(&mut *result));
        Ok(result)
    }

    /// One level only: shared pointers are shared again instead of cloned.
    pub(crate) fn shallow(&self, cloner: &Cloner, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
        let hooks = self.schema.hooks();

        hooks.before_serialization.iter().for_each(|hook| (hook.func)(src));
        let mut result = self.schema.construct()?;
        hooks.before_deserialization.iter().for_each(|hook| (hook.func)(&mut *result));

        self.transfer(cloner, &mut *result, src, true)?;

        hooks.after_serialization.iter().for_each(|hook| (hook.func)(src));
        hooks.after_deserialization.iter().for_each(|hook| (hook.func)(&mut *result));
        Ok(result)
    }

    /// Merges `src` into `dst`, the hooks run on `dst`.
    pub(crate) fn merge(&self, cloner: &Cloner, dst: &mut dyn Object, src: &dyn Object) -> Result<(), CloneError> {
        if self.schema.items().is_empty() {
            return Ok(());
        }
        let hooks = self.schema.hooks();

        hooks.before_serialization.iter().for_each(|hook| (hook.func)(src));
        hooks.before_deserialization.iter().for_each(|hook| (hook.func)(dst));

        self.transfer(cloner, dst, src, false)?;

        hooks.after_serialization.iter().for_each(|hook| (hook.func)(src));
        hooks.after_deserialization.iter().for_each(|hook| (hook.func)(dst));
        Ok(())
    }

    fn transfer(
        &self,
        cloner: &Cloner,
        dst: &mut dyn Object,
        src: &dyn Object,
        shallow: bool,
    ) -> Result<(), CloneError> {
        let items = self.schema.items();

        for (index, copy) in &self.copyable {
            let item = &items[*index];
            let value = read(item, src)?;
            write(item, dst, copy.run(cloner, value)?)?;
        }

        for (index, copy) in &self.copyable_if {
            let item = &items[*index];
            let value = read(item, src)?;
            if self.schema.should_serialize(item, src, value) {
                write(item, dst, copy.run(cloner, value)?)?;
            }
        }

        for nested in &self.nested {
            let item = &items[nested.index];
            let value = read(item, src)?;
            if !self.schema.should_serialize(item, src, value) {
                continue;
            }
            if !item.has_setter() {
                let found = dst.type_path();
                let target = item.get_mut(dst).ok_or_else(|| mismatch(&self.schema, found))?;
                nested.merge.run(cloner, target, value)?;
                continue;
            }
            let cloned = match value.object_ref() {
                ObjectRef::Record(_) => nested.clone.run(cloner, value)?,
                _ if shallow => dispatch::shallow_value(cloner, value)?,
                _ => nested.clone.run(cloner, value)?,
            };
            write(item, dst, cloned)?;
        }
        Ok(())
    }
}

fn read<'a>(item: &Item, owner: &'a dyn Object) -> Result<&'a dyn Object, CloneError> {
    item.get(owner).ok_or_else(|| {
        CloneError::from(DispatchError::TypeMismatch {
            expected: item.type_info().type_path(),
            found: owner.type_path(),
        })
    })
}

fn write(item: &Item, owner: &mut dyn Object, value: Box<dyn Object>) -> Result<(), CloneError> {
    item.set(owner, value).map_err(|rejected| {
        CloneError::from(DispatchError::TypeMismatch {
            expected: item.type_info().type_path(),
            found: rejected.type_path(),
        })
    })
}

fn mismatch(schema: &TypeSchema, found: &'static str) -> CloneError {
    DispatchError::TypeMismatch {
        expected: schema.type_info().type_path(),
        found,
    }
    .into()
}
