use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::DispatchError;
use crate::impls::{seq_debug, seq_eq};
use crate::info::{ArrayInfo, GenericTypeInfoCell, TypeInfo, Typed};
use crate::object::{Array, ArrayShape, NdArray, ObjectMut, ObjectRef};
use crate::Object;

/// Unboxes every element, failing on the first one of the wrong type.
fn take_all<T: Object>(elements: Vec<Box<dyn Object>>) -> Result<Vec<T>, DispatchError> {
    elements
        .into_iter()
        .map(|element| {
            element.take::<T>().map_err(|element| DispatchError::TypeMismatch {
                expected: core::any::type_name::<T>(),
                found: element.type_path(),
            })
        })
        .collect()
}

fn check_len<A: 'static>(expected: usize, found: usize) -> Result<(), DispatchError> {
    if expected == found {
        Ok(())
    } else {
        Err(DispatchError::ShapeMismatch {
            type_path: core::any::type_name::<A>(),
            expected,
            found,
        })
    }
}

macro_rules! impl_array_object {
    () => {
        #[inline]
        fn object_ref(&self) -> ObjectRef<'_> {
            ObjectRef::Array(self)
        }

        #[inline]
        fn object_mut(&mut self) -> ObjectMut<'_> {
            ObjectMut::Array(self)
        }

        fn object_eq(&self, other: &dyn Object) -> Option<bool> {
            let other = other.downcast_ref::<Self>()?;
            if Array::shape(self) != Array::shape(other) {
                return Some(false);
            }
            seq_eq(
                self.iter().map(|v| v as &dyn Object),
                other.iter().map(|v| v as &dyn Object),
            )
        }

        fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            seq_debug(self.iter().map(|v| v as &dyn Object), f)
        }
    };
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Object + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::fixed::<Self, T>(N)))
    }
}

impl<T: Object + Typed, const N: usize> Object for [T; N] {
    impl_array_object!();
}

impl<T: Object + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn shape(&self) -> ArrayShape {
        ArrayShape::new(&[N])
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Object> {
        <[T]>::get(self, index).map(|v| v as &dyn Object)
    }

    fn rebuild(
        &self,
        shape: &ArrayShape,
        elements: Vec<Box<dyn Object>>,
    ) -> Result<Box<dyn Object>, DispatchError> {
        check_len::<Self>(N, shape.len())?;
        check_len::<Self>(N, elements.len())?;
        let found = elements.len();
        let array: [T; N] = take_all::<T>(elements)?
            .try_into()
            .map_err(|_| DispatchError::ShapeMismatch {
                type_path: core::any::type_name::<Self>(),
                expected: N,
                found,
            })?;
        Ok(Box::new(array))
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: Object + Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::slice::<Self, T>()))
    }
}

impl<T: Object + Typed> Object for Box<[T]> {
    impl_array_object!();
}

impl<T: Object + Typed> Array for Box<[T]> {
    #[inline]
    fn shape(&self) -> ArrayShape {
        ArrayShape::new(&[<[T]>::len(self)])
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Object> {
        <[T]>::get(self, index).map(|v| v as &dyn Object)
    }

    fn rebuild(
        &self,
        shape: &ArrayShape,
        elements: Vec<Box<dyn Object>>,
    ) -> Result<Box<dyn Object>, DispatchError> {
        check_len::<Self>(shape.len(), elements.len())?;
        let slice: Box<[T]> = take_all::<T>(elements)?.into_boxed_slice();
        Ok(Box::new(slice))
    }
}

// -----------------------------------------------------------------------------
// NdArray<T>

impl<T: Object + Typed> Typed for NdArray<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::multi::<Self, T>()))
    }
}

impl<T: Object + Typed> Object for NdArray<T> {
    impl_array_object!();
}

impl<T: Object + Typed> Array for NdArray<T> {
    #[inline]
    fn shape(&self) -> ArrayShape {
        NdArray::shape(self).clone()
    }

    #[inline]
    fn len(&self) -> usize {
        NdArray::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Object> {
        self.as_slice().get(index).map(|v| v as &dyn Object)
    }

    fn rebuild(
        &self,
        shape: &ArrayShape,
        elements: Vec<Box<dyn Object>>,
    ) -> Result<Box<dyn Object>, DispatchError> {
        check_len::<Self>(shape.len(), elements.len())?;
        let data = take_all::<T>(elements)?;
        let array = NdArray::from_shape(shape.clone(), data).ok_or(
            DispatchError::ShapeMismatch {
                type_path: core::any::type_name::<Self>(),
                expected: shape.len(),
                found: 0,
            },
        )?;
        Ok(Box::new(array))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::object::{Array, ArrayShape, NdArray};
    use crate::Object;

    #[test]
    fn rebuild_fixed() {
        let source = [1_u8, 2, 3];
        let elements = vec![Box::new(7_u8) as Box<dyn Object>, Box::new(8_u8), Box::new(9_u8)];
        let rebuilt = source.rebuild(&source.shape(), elements).unwrap();
        assert_eq!(rebuilt.downcast_ref::<[u8; 3]>(), Some(&[7, 8, 9]));
    }

    #[test]
    fn rebuild_rejects_wrong_element() {
        let source = [1_u8];
        let elements = vec![Box::new(1_u16) as Box<dyn Object>];
        assert!(source.rebuild(&source.shape(), elements).is_err());
    }

    #[test]
    fn nd_array_keeps_bounds() {
        let source = NdArray::new(&[1, 2], vec![1_i32, 2])
            .unwrap()
            .with_lower_bounds(&[3, 4])
            .unwrap();
        let shape: ArrayShape = Array::shape(&source);
        let elements = vec![Box::new(5_i32) as Box<dyn Object>, Box::new(6_i32)];
        let rebuilt = source.rebuild(&shape, elements).unwrap();
        let rebuilt = rebuilt.downcast_ref::<NdArray<i32>>().unwrap();
        assert_eq!(rebuilt.get(&[3, 5]), Some(&6));
    }
}
