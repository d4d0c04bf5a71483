use alloc::vec::Vec;
use core::fmt;

use crate::object::ArrayShape;

/// A multi-dimensional array with per-dimension lower bounds.
///
/// ```
/// use vc_graph::object::NdArray;
///
/// let grid = NdArray::new(&[2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(grid.get(&[1, 0]), Some(&3));
///
/// let shifted = grid.with_lower_bounds(&[10, 0]).unwrap();
/// assert_eq!(shifted.get(&[10, 1]), Some(&2));
/// assert_eq!(shifted.get(&[0, 0]), None);
/// ```
#[derive(Clone, PartialEq)]
pub struct NdArray<T> {
    shape: ArrayShape,
    data: Vec<T>,
}

impl<T> NdArray<T> {
    /// A zero-based array, `None` if `data` does not fill the shape exactly
    /// or the rank is zero.
    pub fn new(lengths: &[usize], data: Vec<T>) -> Option<Self> {
        Self::from_shape(ArrayShape::new(lengths), data)
    }

    pub fn from_shape(shape: ArrayShape, data: Vec<T>) -> Option<Self> {
        if shape.rank() == 0 || shape.len() != data.len() {
            return None;
        }
        Some(Self { shape, data })
    }

    /// Replaces the lower bounds, `None` if their count differs from the rank.
    pub fn with_lower_bounds(self, lower_bounds: &[isize]) -> Option<Self> {
        let shape = self.shape.with_lower_bounds(lower_bounds)?;
        Some(Self {
            shape,
            data: self.data,
        })
    }

    #[inline]
    pub fn shape(&self) -> &ArrayShape {
        &self.shape
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: &[isize]) -> Option<&T> {
        self.data.get(self.shape.flat_index(index)?)
    }

    pub fn get_mut(&mut self, index: &[isize]) -> Option<&mut T> {
        let flat = self.shape.flat_index(index)?;
        self.data.get_mut(flat)
    }

    /// The elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("lengths", &self.shape.lengths())
            .field("lower_bounds", &self.shape.lower_bounds())
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::NdArray;
    use alloc::vec;

    #[test]
    fn rejects_mismatched_data() {
        assert!(NdArray::new(&[2, 3], vec![0; 5]).is_none());
        assert!(NdArray::<u8>::new(&[], vec![]).is_none());
        assert!(NdArray::new(&[2, 3], vec![0; 6]).is_some());
    }

    #[test]
    fn empty_dimension() {
        let array = NdArray::<u8>::new(&[3, 0], vec![]).unwrap();
        assert!(array.is_empty());
        assert_eq!(array.shape().indices().count(), 0);
    }

    #[test]
    fn three_dimensions_row_major() {
        let array = NdArray::new(&[2, 2, 2], (0..8).collect()).unwrap();
        assert_eq!(array.get(&[1, 0, 1]), Some(&5));
        let order: vec::Vec<_> = array
            .shape()
            .indices()
            .map(|index| *array.get(&index).unwrap())
            .collect();
        assert_eq!(order, (0..8).collect::<vec::Vec<_>>());
    }
}
