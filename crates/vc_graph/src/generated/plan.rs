use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::clone::Cloner;
use crate::error::{CloneError, DispatchError};
use crate::info::Typed;
use crate::object::Object;
use crate::schema::{Item, TypeSchema};

/// The schema of a generated type, indexed by field ordinal.
///
/// Generated bodies ask the plan whether a field is transferred and how,
/// then move the value themselves. Items without a field, such as interface
/// members, are transferred through their accessors by [`transfer_rest`].
///
/// [`transfer_rest`]: GeneratedPlan::transfer_rest
pub struct GeneratedPlan {
    schema: Arc<TypeSchema>,
    slots: Vec<Option<usize>>,
    rest: Vec<usize>,
}

impl GeneratedPlan {
    pub(crate) fn new(schema: Arc<TypeSchema>, fields: &[&str]) -> Self {
        let items = schema.items();
        let slots: Vec<Option<usize>> = fields
            .iter()
            .map(|field| items.iter().position(|item| item.name() == *field))
            .collect();
        let rest = (0..items.len())
            .filter(|index| !slots.contains(&Some(*index)))
            .collect();
        Self {
            schema,
            slots,
            rest,
        }
    }

    #[inline]
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// `true` when the schema has no items, merging is then a no-op.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schema.items().is_empty()
    }

    fn item(&self, ordinal: usize) -> Option<&Item> {
        let index = (*self.slots.get(ordinal)?)?;
        self.schema.items().get(index)
    }

    /// Whether field `ordinal` of `owner`, holding `value`, is transferred.
    pub fn transfers(&self, ordinal: usize, owner: &dyn Object, value: &dyn Object) -> bool {
        self.item(ordinal)
            .is_some_and(|item| self.schema.should_serialize(item, owner, value))
    }

    /// `false` for merge-only fields, which are merged into in place.
    pub fn has_setter(&self, ordinal: usize) -> bool {
        self.item(ordinal).is_some_and(Item::has_setter)
    }

    /// A new instance through the factory or the default constructor.
    pub fn construct<T: Object + Typed>(&self) -> Result<T, CloneError> {
        self.schema.construct()?.take::<T>().map_err(|value| {
            CloneError::from(DispatchError::TypeMismatch {
                expected: T::type_info().type_path(),
                found: value.type_path(),
            })
        })
    }

    /// Clones `src` through its surrogate, `None` when the type has none or
    /// its condition does not hold.
    pub fn surrogate_clone<T: Object + Typed>(
        &self,
        cloner: &Cloner,
        src: &T,
    ) -> Result<Option<T>, CloneError> {
        let Some(surrogate) = self.schema.surrogate() else {
            return Ok(None);
        };
        let owner = T::type_info().type_path();
        if !surrogate.is_complete() {
            return Err(DispatchError::IncompleteSurrogate(owner).into());
        }
        if !surrogate.applies(src) {
            return Ok(None);
        }
        let stand_in = surrogate.to_surrogate(src)?;
        let cloned = cloner.deep(&*stand_in)?;
        let back = surrogate.from_surrogate(owner, cloned)?;
        back.take::<T>().map(Some).map_err(|value| {
            CloneError::from(DispatchError::TypeMismatch {
                expected: owner,
                found: value.type_path(),
            })
        })
    }

    /// Transfers the items that no field ordinal covers.
    pub fn transfer_rest(
        &self,
        cloner: &Cloner,
        dst: &mut dyn Object,
        src: &dyn Object,
    ) -> Result<(), CloneError> {
        let items = self.schema.items();
        for item in self.rest.iter().map(|index| &items[*index]) {
            let Some(value) = item.get(src) else {
                continue;
            };
            if !self.schema.should_serialize(item, src, value) {
                continue;
            }
            if item.has_setter() {
                let cloned = cloner.deep(value)?;
                item.set(dst, cloned).map_err(|rejected| {
                    CloneError::from(DispatchError::TypeMismatch {
                        expected: item.type_info().type_path(),
                        found: rejected.type_path(),
                    })
                })?;
            } else if let Some(target) = item.get_mut(dst) {
                cloner.merge(target, value)?;
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------- hooks

    pub fn before_serialization(&self, src: &dyn Object) {
        for hook in &self.schema.hooks().before_serialization {
            (hook.func)(src);
        }
    }

    pub fn after_serialization(&self, src: &dyn Object) {
        for hook in &self.schema.hooks().after_serialization {
            (hook.func)(src);
        }
    }

    pub fn before_deserialization(&self, dst: &mut dyn Object) {
        for hook in &self.schema.hooks().before_deserialization {
            (hook.func)(dst);
        }
    }

    pub fn after_deserialization(&self, dst: &mut dyn Object) {
        for hook in &self.schema.hooks().after_deserialization {
            (hook.func)(dst);
        }
    }
}
