use alloc::boxed::Box;
use std::sync::OnceLock;

use crate::clone::{CloneFn, Cloner, MergeFn};
use crate::error::CloneError;
use crate::info::TypeInfo;
use crate::object::Object;

/// The clone function of a type, looked up on first use.
///
/// Plans of self-referential types hold slots for themselves, so they are
/// only filled once a value actually reaches them.
pub(crate) struct LazyClone {
    info: &'static TypeInfo,
    slot: OnceLock<CloneFn>,
}

impl LazyClone {
    #[inline]
    pub(crate) const fn new(info: &'static TypeInfo) -> Self {
        Self {
            info,
            slot: OnceLock::new(),
        }
    }

    /// A slot filled right away, for copyable types.
    pub(crate) fn eager(cloner: &Cloner, info: &'static TypeInfo) -> Result<Self, CloneError> {
        let lazy = Self::new(info);
        lazy.get(cloner)?;
        Ok(lazy)
    }

    pub(crate) fn get(&self, cloner: &Cloner) -> Result<&CloneFn, CloneError> {
        if let Some(clone) = self.slot.get() {
            return Ok(clone);
        }
        let clone = cloner.cloner_for(self.info)?;
        Ok(self.slot.get_or_init(|| clone))
    }

    #[inline]
    pub(crate) fn run(&self, cloner: &Cloner, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
        (self.get(cloner)?)(cloner, src)
    }
}

/// The merge function of a type, looked up on first use.
pub(crate) struct LazyMerge {
    info: &'static TypeInfo,
    slot: OnceLock<MergeFn>,
}

impl LazyMerge {
    #[inline]
    pub(crate) const fn new(info: &'static TypeInfo) -> Self {
        Self {
            info,
            slot: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self, cloner: &Cloner) -> Result<&MergeFn, CloneError> {
        if let Some(merge) = self.slot.get() {
            return Ok(merge);
        }
        let merge = cloner.merger_for(self.info)?;
        Ok(self.slot.get_or_init(|| merge))
    }

    #[inline]
    pub(crate) fn run(
        &self,
        cloner: &Cloner,
        dst: &mut dyn Object,
        src: &dyn Object,
    ) -> Result<(), CloneError> {
        (self.get(cloner)?)(cloner, dst, src)
    }
}
