use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::clone::plan::ObjectPlan;
use crate::clone::{CloneFn, MergeFn, dispatch};
use crate::error::{CloneError, DispatchError};
use crate::generated::{GeneratedPlan, GeneratedTable};
use crate::hash::TypeIdMap;
use crate::info::{TypeInfo, Typed};
use crate::object::{Object, ObjectRef};
use crate::options::Options;
use crate::schema::TypeSchema;

// -----------------------------------------------------------------------------
// Cloner

/// Deep clone, shallow copy and merge of object graphs.
///
/// A `Cloner` resolves schemas under its [`Options`] and keeps the clone and
/// merge function of every type it has met. Share one through `Arc` rather
/// than creating one per call.
///
/// Concurrent first requests for a type may both build its function, the
/// first one published is kept.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_graph::clone::Cloner;
///
/// let cloner = Cloner::default();
///
/// let src = BTreeMap::from([(1_u8, vec![String::from("a")])]);
/// let copy = cloner.deep_typed(&src).unwrap();
/// assert_eq!(copy, src);
///
/// let mut dst = BTreeMap::from([(2_u8, vec![])]);
/// cloner.merge_typed(&mut dst, &src).unwrap();
/// assert_eq!(dst.len(), 2);
/// ```
pub struct Cloner {
    options: Options,
    cloners: RwLock<TypeIdMap<CloneFn>>,
    mergers: RwLock<TypeIdMap<MergeFn>>,
    plans: RwLock<TypeIdMap<Arc<ObjectPlan>>>,
    generated: RwLock<TypeIdMap<Arc<GeneratedPlan>>>,
}

impl Cloner {
    pub const fn new(options: Options) -> Self {
        Self {
            options,
            cloners: RwLock::new(TypeIdMap::new()),
            mergers: RwLock::new(TypeIdMap::new()),
            plans: RwLock::new(TypeIdMap::new()),
            generated: RwLock::new(TypeIdMap::new()),
        }
    }

    /// A cloner whose caches start out with the functions of `table`.
    pub fn with_generated(options: Options, table: &GeneratedTable) -> Self {
        let cloner = Self::new(options);
        {
            let mut cloners = cloner.cloners.write().unwrap_or_else(PoisonError::into_inner);
            let mut mergers = cloner.mergers.write().unwrap_or_else(PoisonError::into_inner);
            for entry in table.iter() {
                let type_id = entry.type_info().type_id();
                cloners.insert(type_id, Arc::new(entry.clone));
                mergers.insert(type_id, Arc::new(entry.merge));
            }
        }
        log::debug!("seeded cloner with {} generated types", table.len());
        cloner
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    // ---------------------------------------------------------------- entry points

    /// A full recursive copy of `src`.
    pub fn deep(&self, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
        let clone = self.cloner_for(src.object_type_info())?;
        clone(self, src)
    }

    /// Merges `src` into `dst` in place.
    ///
    /// Members with a setter are replaced by clones, merge-only members are
    /// merged into recursively. Maps and collections are extended.
    pub fn merge(&self, dst: &mut dyn Object, src: &dyn Object) -> Result<(), CloneError> {
        if dst.ty_id() != src.ty_id() {
            return Err(DispatchError::TypeMismatch {
                expected: dst.type_path(),
                found: src.type_path(),
            }
            .into());
        }
        let merge = self.merger_for(dst.object_type_info())?;
        merge(self, dst, src)
    }

    /// A one-level copy of `src`.
    ///
    /// Records run their hooks and factory once and get their items
    /// transferred one level deep. Shared pointers are shared again, also
    /// inside optionals, map values and collections. Everything else is
    /// cloned deeply.
    pub fn shallow(&self, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
        match src.object_ref() {
            ObjectRef::Record(_) => self.object_plan(src.object_type_info())?.shallow(self, src),
            _ => dispatch::shallow_value(self, src),
        }
    }

    pub fn deep_typed<T: Object + Typed>(&self, src: &T) -> Result<T, CloneError> {
        take(self.deep(src)?)
    }

    pub fn shallow_typed<T: Object + Typed>(&self, src: &T) -> Result<T, CloneError> {
        take(self.shallow(src)?)
    }

    #[inline]
    pub fn merge_typed<T: Object + Typed>(&self, dst: &mut T, src: &T) -> Result<(), CloneError> {
        self.merge(dst, src)
    }

    /// A typed clone function for `T`, resolved once.
    ///
    /// ```
    /// use vc_graph::clone::Cloner;
    ///
    /// let cloner = Cloner::default();
    /// let clone = cloner.clone_of::<Vec<u16>>().unwrap();
    /// assert_eq!(clone(&vec![4, 2]).unwrap(), [4, 2]);
    /// ```
    pub fn clone_of<T: Object + Typed>(
        &self,
    ) -> Result<impl Fn(&T) -> Result<T, CloneError> + '_, CloneError> {
        let clone = self.cloner_for(T::type_info())?;
        Ok(move |src: &T| take(clone(self, src)?))
    }

    // ---------------------------------------------------------------- functions

    /// The clone function of `info`, built on first request.
    pub fn cloner_for(&self, info: &'static TypeInfo) -> Result<CloneFn, CloneError> {
        let type_id = info.type_id();
        let found = self
            .cloners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(clone) = found {
            return Ok(clone);
        }

        let built = dispatch::build_cloner(self, info)?;
        let mut cloners = self.cloners.write().unwrap_or_else(PoisonError::into_inner);
        if !cloners.contains(&type_id) {
            log::debug!("built clone function for {}", info.type_path());
        }
        Ok(Arc::clone(cloners.get_or_insert(type_id, || built)))
    }

    /// The merge function of `info`, built on first request.
    pub fn merger_for(&self, info: &'static TypeInfo) -> Result<MergeFn, CloneError> {
        let type_id = info.type_id();
        let found = self
            .mergers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(merge) = found {
            return Ok(merge);
        }

        let built = dispatch::build_merger(self, info)?;
        let mut mergers = self.mergers.write().unwrap_or_else(PoisonError::into_inner);
        if !mergers.contains(&type_id) {
            log::debug!("built merge function for {}", info.type_path());
        }
        Ok(Arc::clone(mergers.get_or_insert(type_id, || built)))
    }

    #[inline]
    pub fn has_cloner(&self, type_id: TypeId) -> bool {
        self.cloners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    #[inline]
    pub fn has_merger(&self, type_id: TypeId) -> bool {
        self.mergers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    // ---------------------------------------------------------------- plans

    pub(crate) fn object_plan(&self, info: &'static TypeInfo) -> Result<Arc<ObjectPlan>, CloneError> {
        let type_id = info.type_id();
        let found = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(plan) = found {
            return Ok(plan);
        }

        let schema = TypeSchema::get(info, &self.options)?;
        let built = Arc::new(ObjectPlan::new(self, schema)?);
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(plans.get_or_insert(type_id, || built)))
    }

    /// The schema of `T` laid over its declared fields, for generated code.
    ///
    /// `fields` lists the field names in declaration order, the ordinals
    /// passed to [`GeneratedPlan`] methods index into it.
    pub fn generated_plan<T: Typed>(
        &self,
        fields: &'static [&'static str],
    ) -> Result<Arc<GeneratedPlan>, CloneError> {
        let type_id = TypeId::of::<T>();
        let found = self
            .generated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(plan) = found {
            return Ok(plan);
        }

        let schema = TypeSchema::of::<T>(&self.options)?;
        let built = Arc::new(GeneratedPlan::new(schema, fields));
        let mut plans = self.generated.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(plans.get_or_insert(type_id, || built)))
    }
}

impl Default for Cloner {
    #[inline]
    fn default() -> Self {
        Self::new(Options::new())
    }
}

impl fmt::Debug for Cloner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cloners = self.cloners.read().unwrap_or_else(PoisonError::into_inner).len();
        let mergers = self.mergers.read().unwrap_or_else(PoisonError::into_inner).len();
        f.debug_struct("Cloner")
            .field("options", &self.options)
            .field("cloners", &cloners)
            .field("mergers", &mergers)
            .finish_non_exhaustive()
    }
}

fn take<T: Object + Typed>(value: Box<dyn Object>) -> Result<T, CloneError> {
    value.take::<T>().map_err(|value| {
        CloneError::from(DispatchError::TypeMismatch {
            expected: T::type_info().type_path(),
            found: value.type_path(),
        })
    })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::Cloner;
    use crate::info::Typed;
    use crate::object::NdArray;
    use crate::schema::TypeSchema;
    use crate::{Graph, Object};

    #[test]
    fn copyable_array() {
        let cloner = Cloner::default();
        let src = [2_u32, 4, 5, 6, 8];
        let copy = cloner.deep_typed(&src).unwrap();
        assert_eq!(copy, src);
        assert!(cloner.has_cloner(TypeId::of::<[u32; 5]>()));
        assert!(cloner.has_cloner(TypeId::of::<u32>()));
    }

    #[test]
    fn nested_options() {
        let cloner = Cloner::default();
        let src: Vec<Option<String>> = vec![Some("a".into()), None];
        assert_eq!(cloner.deep_typed(&src).unwrap(), src);
    }

    #[test]
    fn nd_array_keeps_bounds() {
        let cloner = Cloner::default();
        let src = NdArray::new(&[2, 2], vec![1_i64, 2, 3, 4])
            .unwrap()
            .with_lower_bounds(&[-1, 5])
            .unwrap();
        let copy = cloner.deep_typed(&src).unwrap();
        assert_eq!(copy.get(&[0, 6]), Some(&4));
        assert_eq!(copy, src);
    }

    #[test]
    fn dynamic_values() {
        let cloner = Cloner::default();
        let src: Box<dyn Object> = Box::new(vec![1_u8, 2]);
        let copy = cloner.deep_typed(&src).unwrap();
        assert_eq!(copy.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2]));
    }

    #[test]
    fn shallow_shares_arc() {
        let cloner = Cloner::default();
        let src = Arc::new(String::from("qwe"));
        let copy = cloner.shallow_typed(&src).unwrap();
        assert!(Arc::ptr_eq(&src, &copy));

        let deep = cloner.deep_typed(&src).unwrap();
        assert!(!Arc::ptr_eq(&src, &deep));
        assert_eq!(deep, src);
    }

    #[test]
    fn scalars_do_not_merge() {
        let cloner = Cloner::default();
        let err = cloner.merge_typed(&mut 1_u8, &2_u8).unwrap_err();
        assert_eq!(err.to_string(), "Unable to merge type: u8");
    }

    #[test]
    fn merge_rejects_other_type() {
        let cloner = Cloner::default();
        let mut dst: Vec<u8> = vec![];
        let err = cloner.merge(&mut dst, &vec![1_u16]).unwrap_err();
        assert!(err.to_string().starts_with("Type mismatch"));
    }

    #[test]
    fn collection_merge_appends() {
        let cloner = Cloner::default();
        let mut dst = vec![String::from("a")];
        cloner.merge_typed(&mut dst, &vec![String::from("b")]).unwrap();
        assert_eq!(dst, ["a", "b"]);
    }

    #[derive(Graph, Default)]
    struct Shelf {
        #[graph(required)]
        books: Vec<Arc<String>>,
        #[graph(required)]
        labels: Vec<String>,
    }

    #[test]
    fn shallow_shares_arcs_one_level_down() {
        let cloner = Cloner::default();
        let src = vec![Arc::new(String::from("a"))];
        let copy = cloner.shallow_typed(&src).unwrap();
        assert!(Arc::ptr_eq(&src[0], &copy[0]));

        let shelf = Shelf {
            books: vec![Arc::new(String::from("b"))],
            labels: vec![String::from("c")],
        };
        let copy = cloner.shallow_typed(&shelf).unwrap();
        assert!(Arc::ptr_eq(&shelf.books[0], &copy.books[0]));
        assert_eq!(copy.labels, shelf.labels);

        let deep = cloner.deep_typed(&shelf).unwrap();
        assert!(!Arc::ptr_eq(&shelf.books[0], &deep.books[0]));
        assert_eq!(deep.books, shelf.books);
    }

    #[derive(Graph, Default, Debug, PartialEq)]
    struct Roster {
        #[graph(required)]
        names: Vec<String>,
        #[graph(optional)]
        lead: Option<String>,
    }

    #[test]
    fn concurrent_first_requests_agree() {
        let cloner = Cloner::default();
        let src = Roster {
            names: vec!["a".into(), "b".into()],
            lead: Some("a".into()),
        };

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let copy = cloner.deep_typed(&src).unwrap();
                        let schema = TypeSchema::of::<Roster>(cloner.options()).unwrap();
                        let clone = cloner.cloner_for(Roster::type_info()).unwrap();
                        (copy, schema, clone)
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        let (_, schema, clone) = &results[0];
        for (copy, other_schema, other_clone) in &results {
            assert_eq!(copy, &src);
            assert!(Arc::ptr_eq(schema, other_schema));
            assert!(Arc::ptr_eq(clone, other_clone));
        }
        assert!(cloner.has_cloner(TypeId::of::<Roster>()));
    }
}
