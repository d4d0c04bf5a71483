use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::clone::lazy::{LazyClone, LazyMerge};
use crate::clone::{CloneFn, Cloner, MergeFn};
use crate::error::{CloneError, DispatchError};
use crate::info::TypeInfo;
use crate::object::{Object, ObjectMut, ObjectRef};
use crate::schema::{TypeSchema, is_copyable};

// -----------------------------------------------------------------------------
// Errors

fn mismatch(expected: &'static TypeInfo, found: &dyn Object) -> CloneError {
    DispatchError::TypeMismatch {
        expected: expected.type_path(),
        found: found.type_path(),
    }
    .into()
}

fn rejected(expected: &'static TypeInfo, value: Box<dyn Object>) -> CloneError {
    mismatch(expected, &*value)
}

// -----------------------------------------------------------------------------
// Slots

/// The element slot of a container: filled right away for copyable types,
/// on first use otherwise.
fn element(cloner: &Cloner, info: &'static TypeInfo) -> Result<LazyClone, CloneError> {
    if is_copyable(info, cloner.options()) {
        LazyClone::eager(cloner, info)
    } else {
        Ok(LazyClone::new(info))
    }
}

/// Values of another type than `type_id` are dispatched on their own type.
fn guarded<F>(type_id: TypeId, clone: F) -> CloneFn
where
    F: Fn(&Cloner, &dyn Object) -> Result<Box<dyn Object>, CloneError> + Send + Sync + 'static,
{
    Arc::new(move |cloner: &Cloner, src: &dyn Object| {
        if src.ty_id() == type_id {
            clone(cloner, src)
        } else {
            cloner.deep(src)
        }
    })
}

fn guarded_merge<F>(type_id: TypeId, merge: F) -> MergeFn
where
    F: Fn(&Cloner, &mut dyn Object, &dyn Object) -> Result<(), CloneError> + Send + Sync + 'static,
{
    Arc::new(move |cloner: &Cloner, dst: &mut dyn Object, src: &dyn Object| {
        if dst.ty_id() != type_id {
            cloner.merge(dst, src)
        } else if src.ty_id() != type_id {
            Err(DispatchError::TypeMismatch {
                expected: dst.type_path(),
                found: src.type_path(),
            }
            .into())
        } else {
            merge(cloner, dst, src)
        }
    })
}

// -----------------------------------------------------------------------------
// Clone

/// Builds the clone function of `info`, one strategy per kind.
pub(crate) fn build_cloner(cloner: &Cloner, info: &'static TypeInfo) -> Result<CloneFn, CloneError> {
    let type_id = info.type_id();

    let clone = match info {
        TypeInfo::Scalar(_) => guarded(type_id, move |_, src| match src.object_ref() {
            ObjectRef::Scalar(scalar) => Ok(scalar.copy_boxed()),
            _ => Err(mismatch(info, src)),
        }),

        TypeInfo::Optional(optional) => {
            let some = element(cloner, optional.some())?;
            guarded(type_id, move |cloner, src| {
                let ObjectRef::Optional(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                match src.value() {
                    None => Ok(src.none()),
                    Some(value) => {
                        let value = some.run(cloner, value)?;
                        src.some(value).map_err(|value| rejected(info, value))
                    }
                }
            })
        }

        TypeInfo::Pointer(pointer) => {
            let pointee = LazyClone::new(pointer.pointee());
            guarded(type_id, move |cloner, src| {
                let ObjectRef::Pointer(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let value = pointee.run(cloner, src.pointee())?;
                src.wrap(value).map_err(|value| rejected(info, value))
            })
        }

        TypeInfo::Array(array) => {
            let item = element(cloner, array.element())?;
            guarded(type_id, move |cloner, src| {
                let ObjectRef::Array(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let shape = src.shape();
                let elements = (0..src.len())
                    .map(|index| match src.get(index) {
                        Some(value) => item.run(cloner, value),
                        None => Err(mismatch(info, src)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(src.rebuild(&shape, elements)?)
            })
        }

        TypeInfo::Map(map) => {
            // Copyable keys and values are copied right away, the rest is
            // looked up when the first entry needs it.
            let key = element(cloner, map.key())?;
            let value = element(cloner, map.value())?;
            guarded(type_id, move |cloner, src| {
                let ObjectRef::Map(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let mut out = src.empty();
                for (k, v) in src.iter() {
                    out.insert_boxed(key.run(cloner, k)?, value.run(cloner, v)?)
                        .map_err(|entry| rejected(info, entry))?;
                }
                let out: Box<dyn Object> = out;
                Ok(out)
            })
        }

        TypeInfo::Collection(collection) => {
            let item = element(cloner, collection.element())?;
            let test = TypeSchema::get(info, cloner.options())?.item_if();
            guarded(type_id, move |cloner, src| {
                let owner = src;
                let ObjectRef::Collection(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let mut out = src.empty();
                for (index, value) in src.iter().enumerate() {
                    if test.is_none_or(|test| test(owner, index, value)) {
                        out.push_boxed(item.run(cloner, value)?)
                            .map_err(|value| rejected(info, value))?;
                    }
                }
                let out: Box<dyn Object> = out;
                Ok(out)
            })
        }

        TypeInfo::Dynamic(_) => guarded(type_id, move |cloner, src| match src.object_ref() {
            ObjectRef::Dynamic(inner) => {
                let cloned: Box<dyn Object> = Box::new(cloner.deep(inner)?);
                Ok(cloned)
            }
            _ => Err(mismatch(info, src)),
        }),

        TypeInfo::Record(_) => {
            let plan = cloner.object_plan(info)?;
            let surrogate = match plan.schema().surrogate() {
                Some(surrogate) if !surrogate.is_complete() => {
                    return Err(DispatchError::IncompleteSurrogate(info.type_path()).into());
                }
                Some(surrogate) => {
                    Some((surrogate.clone(), LazyClone::new(surrogate.type_info())))
                }
                None => None,
            };
            guarded(type_id, move |cloner, src| {
                if let Some((surrogate, slot)) = &surrogate
                    && surrogate.applies(src)
                {
                    let stand_in = surrogate.to_surrogate(src)?;
                    let cloned = slot.run(cloner, &*stand_in)?;
                    return Ok(surrogate.from_surrogate(info.type_path(), cloned)?);
                }
                plan.deep(cloner, src)
            })
        }
    };

    Ok(clone)
}

// -----------------------------------------------------------------------------
// Shallow

/// Another pointer to a shared pointee, `None` for everything else.
fn shared(value: &dyn Object) -> Option<Box<dyn Object>> {
    match value.object_ref() {
        ObjectRef::Pointer(pointer) if pointer.is_shared() => pointer.share(),
        _ => None,
    }
}

fn share_or_clone(cloner: &Cloner, value: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
    match shared(value) {
        Some(shared) => Ok(shared),
        None => cloner.deep(value),
    }
}

/// A one-level copy of a non-record value.
///
/// Shared pointers are shared again, also when an optional, a map value or
/// an unfiltered collection holds them. Everything else is cloned deeply.
pub(crate) fn shallow_value(cloner: &Cloner, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
    let info = src.object_type_info();
    match src.object_ref() {
        ObjectRef::Pointer(_) => share_or_clone(cloner, src),
        ObjectRef::Optional(optional) => match optional.value() {
            None => Ok(optional.none()),
            Some(value) => {
                let value = share_or_clone(cloner, value)?;
                optional.some(value).map_err(|value| rejected(info, value))
            }
        },
        ObjectRef::Map(map) => {
            let mut out = map.empty();
            for (k, v) in map.iter() {
                out.insert_boxed(cloner.deep(k)?, share_or_clone(cloner, v)?)
                    .map_err(|entry| rejected(info, entry))?;
            }
            let out: Box<dyn Object> = out;
            Ok(out)
        }
        ObjectRef::Collection(collection) => {
            if TypeSchema::get(info, cloner.options())?.item_if().is_some() {
                return cloner.deep(src);
            }
            let mut out = collection.empty();
            for value in collection.iter() {
                out.push_boxed(share_or_clone(cloner, value)?)
                    .map_err(|value| rejected(info, value))?;
            }
            let out: Box<dyn Object> = out;
            Ok(out)
        }
        _ => cloner.deep(src),
    }
}

// -----------------------------------------------------------------------------
// Merge

/// Builds the merge function of `info`.
///
/// Scalars, options and arrays have no merge function.
pub(crate) fn build_merger(cloner: &Cloner, info: &'static TypeInfo) -> Result<MergeFn, CloneError> {
    let type_id = info.type_id();

    let merge = match info {
        TypeInfo::Scalar(_) | TypeInfo::Optional(_) | TypeInfo::Array(_) => {
            return Err(DispatchError::Unmergeable(info.type_path()).into());
        }

        TypeInfo::Pointer(pointer) => {
            let pointee = LazyMerge::new(pointer.pointee());
            guarded_merge(type_id, move |cloner, dst, src| {
                let ObjectRef::Pointer(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let found = dst.type_path();
                let ObjectMut::Pointer(dst) = dst.object_mut() else {
                    return Err(DispatchError::TypeMismatch {
                        expected: info.type_path(),
                        found,
                    }
                    .into());
                };
                let Some(target) = dst.pointee_mut() else {
                    return Err(DispatchError::SharedPointer(info.type_path()).into());
                };
                pointee.run(cloner, target, src.pointee())
            })
        }

        TypeInfo::Map(map) => {
            let key = element(cloner, map.key())?;
            let value = element(cloner, map.value())?;
            guarded_merge(type_id, move |cloner, dst, src| {
                let ObjectRef::Map(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let ObjectMut::Map(dst) = dst.object_mut() else {
                    return Err(DispatchError::Unmergeable(info.type_path()).into());
                };
                for (k, v) in src.iter() {
                    dst.insert_boxed(key.run(cloner, k)?, value.run(cloner, v)?)
                        .map_err(|entry| rejected(info, entry))?;
                }
                Ok(())
            })
        }

        TypeInfo::Collection(collection) => {
            let item = element(cloner, collection.element())?;
            let test = TypeSchema::get(info, cloner.options())?.item_if();
            guarded_merge(type_id, move |cloner, dst, src| {
                let owner = src;
                let ObjectRef::Collection(src) = src.object_ref() else {
                    return Err(mismatch(info, src));
                };
                let ObjectMut::Collection(dst) = dst.object_mut() else {
                    return Err(DispatchError::Unmergeable(info.type_path()).into());
                };
                for (index, value) in src.iter().enumerate() {
                    if test.is_none_or(|test| test(owner, index, value)) {
                        dst.push_boxed(item.run(cloner, value)?)
                            .map_err(|value| rejected(info, value))?;
                    }
                }
                Ok(())
            })
        }

        TypeInfo::Dynamic(_) => guarded_merge(type_id, move |cloner, dst, src| {
            let ObjectRef::Dynamic(from) = src.object_ref() else {
                return Err(mismatch(info, src));
            };
            let ObjectMut::Dynamic(into) = dst.object_mut() else {
                return Err(DispatchError::Unmergeable(info.type_path()).into());
            };
            cloner.merge(into, from)
        }),

        TypeInfo::Record(_) => {
            let plan = cloner.object_plan(info)?;
            guarded_merge(type_id, move |cloner, dst, src| plan.merge(cloner, dst, src))
        }
    };

    Ok(merge)
}
