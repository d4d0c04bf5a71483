use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::DispatchError;
use crate::object::Object;

// -----------------------------------------------------------------------------
// ArrayShape

/// Per-dimension lengths and lower bounds of an array.
///
/// Elements are stored row-major: the last index varies fastest.
///
/// ```
/// use vc_graph::object::ArrayShape;
///
/// let shape = ArrayShape::new(&[2, 3]).with_lower_bounds(&[1, -1]).unwrap();
/// assert_eq!(shape.len(), 6);
/// assert_eq!(shape.flat_index(&[1, -1]), Some(0));
/// assert_eq!(shape.flat_index(&[2, 1]), Some(5));
/// assert_eq!(shape.flat_index(&[0, 0]), None);
///
/// let order: Vec<_> = shape.indices().take(4).collect();
/// assert_eq!(order, [vec![1, -1], vec![1, 0], vec![1, 1], vec![2, -1]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayShape {
    lengths: Vec<usize>,
    lower_bounds: Vec<isize>,
}

impl ArrayShape {
    /// A zero-based shape.
    pub fn new(lengths: &[usize]) -> Self {
        let lengths = lengths.to_vec();
        let lower_bounds = vec![0; lengths.len()];
        Self {
            lengths,
            lower_bounds,
        }
    }

    /// Replaces the lower bounds, `None` if their count differs from the rank.
    pub fn with_lower_bounds(mut self, lower_bounds: &[isize]) -> Option<Self> {
        if lower_bounds.len() != self.lengths.len() {
            return None;
        }
        self.lower_bounds = lower_bounds.to_vec();
        Some(self)
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    #[inline]
    pub fn lower_bounds(&self) -> &[isize] {
        &self.lower_bounds
    }

    /// Total element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.lengths.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row-major position of `index`, `None` when out of bounds.
    pub fn flat_index(&self, index: &[isize]) -> Option<usize> {
        if index.len() != self.rank() {
            return None;
        }
        let mut flat = 0_usize;
        for ((&i, &lower), &len) in index.iter().zip(&self.lower_bounds).zip(&self.lengths) {
            let offset = usize::try_from(i.checked_sub(lower)?).ok()?;
            if offset >= len {
                return None;
            }
            flat = flat * len + offset;
        }
        Some(flat)
    }

    /// Every index of the shape, in row-major order.
    pub fn indices(&self) -> Indices<'_> {
        let next = if self.is_empty() || self.rank() == 0 {
            None
        } else {
            Some(self.lower_bounds.clone())
        };
        Indices { shape: self, next }
    }
}

/// Iterator returned by [`ArrayShape::indices`].
pub struct Indices<'a> {
    shape: &'a ArrayShape,
    next: Option<Vec<isize>>,
}

impl Iterator for Indices<'_> {
    type Item = Vec<isize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut advanced = current.clone();
        for dim in (0..advanced.len()).rev() {
            let upper = self.shape.lower_bounds[dim] + self.shape.lengths[dim] as isize;
            advanced[dim] += 1;
            if advanced[dim] < upper {
                self.next = Some(advanced);
                return Some(current);
            }
            advanced[dim] = self.shape.lower_bounds[dim];
        }
        Some(current)
    }
}

// -----------------------------------------------------------------------------
// Array

/// Fixed-shape arrays.
pub trait Array: Object {
    fn shape(&self) -> ArrayShape;

    /// Total element count.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at row-major position `index`.
    fn get(&self, index: usize) -> Option<&dyn Object>;

    /// The element at a multi-dimensional `index`, lower bounds included.
    fn element(&self, index: &[isize]) -> Option<&dyn Object> {
        self.get(self.shape().flat_index(index)?)
    }

    /// A new array of the same type with `shape`, filled row-major.
    fn rebuild(
        &self,
        shape: &ArrayShape,
        elements: Vec<Box<dyn Object>>,
    ) -> Result<Box<dyn Object>, DispatchError>;
}
