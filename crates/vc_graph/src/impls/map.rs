use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::info::{GenericTypeInfoCell, MapInfo, TypeInfo, Typed};
use crate::object::{Map, ObjectMut, ObjectRef};
use crate::Object;

macro_rules! impl_map {
    ($($map:ident)::+ < K, V $(, $hasher:ident)? >, where $($bounds:tt)*) => {
        impl<K, V $(, $hasher)?> Typed for $($map)::+<K, V $(, $hasher)?>
        where
            $($bounds)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V $(, $hasher)?> Object for $($map)::+<K, V $(, $hasher)?>
        where
            $($bounds)*
        {
            #[inline]
            fn object_ref(&self) -> ObjectRef<'_> {
                ObjectRef::Map(self)
            }

            #[inline]
            fn object_mut(&mut self) -> ObjectMut<'_> {
                ObjectMut::Map(self)
            }

            fn object_eq(&self, other: &dyn Object) -> Option<bool> {
                let other = other.downcast_ref::<Self>()?;
                if <$($map)::+<K, V $(, $hasher)?>>::len(self) != other.len() {
                    return Some(false);
                }
                for (key, value) in <$($map)::+<K, V $(, $hasher)?>>::iter(self) {
                    let Some(other) = other.get(key) else {
                        return Some(false);
                    };
                    if !value.object_eq(other)? {
                        return Some(false);
                    }
                }
                Some(true)
            }

            fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(Map::iter(self)).finish()
            }
        }

        impl<K, V $(, $hasher)?> Map for $($map)::+<K, V $(, $hasher)?>
        where
            $($bounds)*
        {
            #[inline]
            fn len(&self) -> usize {
                <$($map)::+<K, V $(, $hasher)?>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Object, &dyn Object)> + '_> {
                Box::new(
                    <$($map)::+<K, V $(, $hasher)?>>::iter(self)
                        .map(|(k, v)| (k as &dyn Object, v as &dyn Object)),
                )
            }

            fn empty(&self) -> Box<dyn Map> {
                Box::new(<$($map)::+<K, V $(, $hasher)?>>::default())
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Object>,
                value: Box<dyn Object>,
            ) -> Result<(), Box<dyn Object>> {
                let key = key.take::<K>()?;
                let value = value.take::<V>()?;
                self.insert(key, value);
                Ok(())
            }
        }
    };
}

impl_map!(BTreeMap<K, V>, where K: Object + Typed + Ord, V: Object + Typed);
impl_map!(
    std::collections::HashMap<K, V, S>,
    where
        K: Object + Typed + Eq + Hash,
        V: Object + Typed,
        S: BuildHasher + Default + Send + Sync + 'static
);
impl_map!(
    hashbrown::HashMap<K, V, S>,
    where
        K: Object + Typed + Eq + Hash,
        V: Object + Typed,
        S: BuildHasher + Default + Send + Sync + 'static
);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::object::Map;
    use crate::Object;

    #[test]
    fn insert_overwrites() {
        let mut map: BTreeMap<String, u32> = BTreeMap::new();
        map.insert_boxed(Box::new(String::from("a")), Box::new(1_u32)).unwrap();
        map.insert_boxed(Box::new(String::from("a")), Box::new(2_u32)).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 2);
        assert!(map.insert_boxed(Box::new(1_u8), Box::new(2_u32)).is_err());
    }

    #[test]
    fn map_equality() {
        let a: std::collections::HashMap<String, u32> = [(String::from("x"), 1)].into();
        let mut b = a.clone();
        assert_eq!(a.object_eq(&b), Some(true));
        b.insert(String::from("x"), 2);
        assert_eq!(a.object_eq(&b), Some(false));
    }
}
