//! Axis-aligned index-space rectangles used to scope per-worker iteration.
//!
//! A [`Region`] is an offset plus a size along every axis. Regions are
//! immutable after construction; the partitioner hands out disjoint regions
//! whose union covers a field's whole domain.

use serde::Serialize;

/// Immutable axis-aligned rectangle in index space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    offset: Vec<usize>,
    size: Vec<usize>,
}

impl Region {
    /// Construct a region from a per-axis offset and size.
    ///
    /// Panics if the two vectors disagree in length.
    pub fn new(offset: Vec<usize>, size: Vec<usize>) -> Self {
        assert_eq!(
            offset.len(),
            size.len(),
            "region offset and size must have the same dimension"
        );
        Self { offset, size }
    }

    /// The region spanning a whole extent, anchored at the index origin.
    pub fn full(extent: &[usize]) -> Self {
        Self {
            offset: vec![0; extent.len()],
            size: extent.to_vec(),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Per-axis start index.
    #[inline]
    pub fn offset(&self) -> &[usize] {
        &self.offset
    }

    /// Per-axis length.
    #[inline]
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// One past the last index along `axis`.
    #[inline]
    pub fn end(&self, axis: usize) -> usize {
        self.offset[axis] + self.size[axis]
    }

    /// Total number of samples covered.
    pub fn num_samples(&self) -> usize {
        if self.size.is_empty() {
            return 0;
        }
        self.size.iter().product()
    }

    /// True when the region covers no samples.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty() || self.size.iter().any(|&s| s == 0)
    }

    /// True when `index` falls inside the region.
    pub fn contains_index(&self, index: &[usize]) -> bool {
        index.len() == self.ndim()
            && index
                .iter()
                .zip(self.offset.iter().zip(self.size.iter()))
                .all(|(&i, (&o, &s))| i >= o && i < o + s)
    }

    /// True when `other` lies entirely inside this region.
    pub fn contains(&self, other: &Region) -> bool {
        other.ndim() == self.ndim()
            && (0..self.ndim()).all(|a| {
                other.offset[a] >= self.offset[a] && other.end(a) <= self.end(a)
            })
    }

    /// True when the two regions share no sample.
    pub fn is_disjoint(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        (0..self.ndim()).any(|a| self.end(a) <= other.offset[a] || other.end(a) <= self.offset[a])
    }

    /// Visit every index in the region, axis 0 varying fastest.
    ///
    /// The visitation order matches the linear sample layout of
    /// [`crate::field::Field`], so a counter incremented inside the callback
    /// doubles as a region-local linear offset.
    pub fn for_each_index<F: FnMut(&[usize])>(&self, mut f: F) {
        if self.is_empty() {
            return;
        }
        let ndim = self.ndim();
        let mut index = self.offset.clone();
        loop {
            f(&index);
            let mut axis = 0;
            loop {
                index[axis] += 1;
                if index[axis] < self.end(axis) {
                    break;
                }
                index[axis] = self.offset[axis];
                axis += 1;
                if axis == ndim {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_covers_region_in_layout_order() {
        let region = Region::new(vec![1, 2], vec![2, 3]);
        let mut seen = Vec::new();
        region.for_each_index(|idx| seen.push(idx.to_vec()));
        assert_eq!(
            seen,
            vec![
                vec![1, 2],
                vec![2, 2],
                vec![1, 3],
                vec![2, 3],
                vec![1, 4],
                vec![2, 4],
            ]
        );
    }

    #[test]
    fn empty_region_yields_nothing() {
        let region = Region::new(vec![0, 0], vec![4, 0]);
        assert!(region.is_empty());
        let mut count = 0;
        region.for_each_index(|_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn disjointness_and_containment() {
        let a = Region::new(vec![0, 0], vec![4, 4]);
        let b = Region::new(vec![4, 0], vec![4, 4]);
        let c = Region::new(vec![3, 3], vec![2, 2]);
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
        assert!(a.contains(&Region::new(vec![1, 1], vec![2, 2])));
        assert!(!a.contains(&c));
        assert!(a.contains_index(&[3, 3]));
        assert!(!a.contains_index(&[4, 0]));
    }

    #[test]
    fn sample_count_matches_size_product() {
        let region = Region::new(vec![0, 0, 0], vec![3, 4, 5]);
        assert_eq!(region.num_samples(), 60);
    }
}
