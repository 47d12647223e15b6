// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

use super::coord::{CellKey, CoordError, Coordinate};

/// Inclusive integer bounding box of a set of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl CellBounds {
    pub fn point(coord: Coordinate) -> Self {
        Self { min: coord, max: coord }
    }

    pub fn include(self, coord: Coordinate) -> Self {
        Self {
            min: Coordinate::new(self.min.x.min(coord.x), self.min.y.min(coord.y)),
            max: Coordinate::new(self.max.x.max(coord.x), self.max.y.max(coord.y)),
        }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.y..=self.max.y).contains(&coord.y)
    }
}

/// A sparse map from signed cell coordinates to content.
///
/// Storage is keyed by [`CellKey`], so iteration visits cells in ascending key order regardless of
/// the order in which they were inserted. Two grids holding the same associations always iterate
/// identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseGrid<T> {
    cells: BTreeMap<CellKey, T>,
}

impl<T> Default for SparseGrid<T> {
    fn default() -> Self {
        Self { cells: BTreeMap::new() }
    }
}

impl<T> SparseGrid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unrepresentable coordinates are never occupied.
    pub fn has(&self, x: i32, y: i32) -> bool {
        self.contains(Coordinate::new(x, y))
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        CellKey::encode(coord).is_ok_and(|key| self.cells.contains_key(&key))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.get_at(Coordinate::new(x, y))
    }

    pub fn get_at(&self, coord: Coordinate) -> Option<&T> {
        let key = CellKey::encode(coord).ok()?;
        self.cells.get(&key)
    }

    /// Associates `content` with `(x, y)`, returning the previous content.
    pub fn set(&mut self, x: i32, y: i32, content: T) -> Result<Option<T>, CoordError> {
        self.set_at(Coordinate::new(x, y), content)
    }

    pub fn set_at(&mut self, coord: Coordinate, content: T) -> Result<Option<T>, CoordError> {
        let key = CellKey::encode(coord)?;
        Ok(self.insert(key, content))
    }

    /// Stores `content` under an already encoded key.
    pub fn insert(&mut self, key: CellKey, content: T) -> Option<T> {
        self.cells.insert(key, content)
    }

    pub fn delete(&mut self, x: i32, y: i32) -> Option<T> {
        self.delete_at(Coordinate::new(x, y))
    }

    pub fn delete_at(&mut self, coord: Coordinate) -> Option<T> {
        let key = CellKey::encode(coord).ok()?;
        self.cells.remove(&key)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Iterates `(coordinate, content)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.cells.iter() }
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter().map(|(coord, _)| coord)
    }

    /// Bounding box of the occupied cells, or `None` for an empty grid.
    pub fn bounds(&self) -> Option<CellBounds> {
        let mut coords = self.coordinates();
        let first = coords.next()?;
        Some(coords.fold(CellBounds::point(first), CellBounds::include))
    }
}

impl<'a, T> IntoIterator for &'a SparseGrid<T> {
    type Item = (Coordinate, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: btree_map::Iter<'a, CellKey, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Coordinate, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, content) = self.inner.next()?;
        let coord = key.decode().expect("grid keys are produced by CellKey::encode");
        Some((coord, content))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::{CellBounds, SparseGrid};
    use crate::model::coord::{encode, CellKey, CoordError, Coordinate};

    #[test]
    fn set_then_get_and_has() {
        let mut grid = SparseGrid::new();
        assert_eq!(grid.set(0, 0, 42), Ok(None));
        assert_eq!(grid.get(0, 0), Some(&42));
        assert!(grid.has(0, 0));
        assert!(!grid.has(1, 1));
    }

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut grid = SparseGrid::new();
        grid.set(-3, 2, "a").expect("set");
        assert_eq!(grid.set(-3, 2, "b"), Ok(Some("a")));
        assert_eq!(grid.get(-3, 2), Some(&"b"));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn insert_by_key_matches_set_at() {
        let mut grid = SparseGrid::new();
        let at = Coordinate::new(-2, 5);
        let key = CellKey::encode(at).expect("encode");
        assert_eq!(grid.insert(key, 'a'), None);
        assert_eq!(grid.get_at(at), Some(&'a'));
        assert_eq!(grid.set_at(at, 'b'), Ok(Some('a')));
    }

    #[test]
    fn delete_removes_the_association() {
        let mut grid = SparseGrid::new();
        grid.set(1, -1, 7).expect("set");
        assert_eq!(grid.delete(1, -1), Some(7));
        assert!(!grid.has(1, -1));
        assert_eq!(grid.delete(1, -1), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn empty_content_is_distinct_from_absence() {
        let mut grid = SparseGrid::new();
        grid.set(2, 2, String::new()).expect("set");
        assert!(grid.has(2, 2));
        assert_eq!(grid.get(2, 2).map(String::as_str), Some(""));
        assert_eq!(grid.get(2, 3), None);
    }

    #[test]
    fn negative_coordinates_round_trip() {
        let mut grid = SparseGrid::new();
        let coords = [(-1, -1), (-1, 1), (1, -1), (-12, 0), (0, -12)];
        for (i, &(x, y)) in coords.iter().enumerate() {
            grid.set(x, y, i).expect("set");
        }
        for (i, &(x, y)) in coords.iter().enumerate() {
            assert_eq!(grid.get(x, y), Some(&i));
        }
    }

    #[test]
    fn out_of_range_set_is_a_domain_error() {
        let mut grid = SparseGrid::new();
        assert_eq!(
            grid.set(40_000, 0, ()),
            Err(CoordError::OutOfRange { coord: Coordinate::new(40_000, 0) })
        );
        assert!(!grid.has(40_000, 0));
        assert_eq!(grid.get(40_000, 0), None);
        assert_eq!(grid.delete(40_000, 0), None);
    }

    #[test]
    fn iteration_is_independent_of_insertion_order() {
        let cells = [(0, 0), (1, 1), (-1, 0), (2, -3), (0, 5), (-4, -4)];

        let mut forward = SparseGrid::new();
        for &(x, y) in &cells {
            forward.set(x, y, format!("{x},{y}")).expect("set");
        }

        let mut backward = SparseGrid::new();
        for &(x, y) in cells.iter().rev() {
            backward.set(x, y, format!("{x},{y}")).expect("set");
        }

        let forward = forward.iter().collect::<Vec<_>>();
        let backward = backward.iter().collect::<Vec<_>>();
        assert_eq!(forward, backward);

        let keys = forward
            .iter()
            .map(|(coord, _)| encode(coord.x, coord.y).expect("encode"))
            .collect::<Vec<_>>();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn iteration_yields_coordinates_and_content() {
        let mut grid = SparseGrid::new();
        grid.set(1, 1, 43).expect("set");
        grid.set(0, 0, 42).expect("set");

        let entries = grid.iter().map(|(coord, value)| (coord, *value)).collect::<Vec<_>>();
        assert_eq!(entries, vec![(Coordinate::new(0, 0), 42), (Coordinate::new(1, 1), 43)]);
        // Restartable.
        assert_eq!(grid.iter().count(), 2);
    }

    #[test]
    fn bounds_cover_all_cells() {
        let mut grid = SparseGrid::new();
        assert_eq!(grid.bounds(), None);

        grid.set(-1, 3, ()).expect("set");
        grid.set(2, -2, ()).expect("set");
        grid.set(0, 0, ()).expect("set");

        let bounds = grid.bounds().expect("bounds");
        assert_eq!(
            bounds,
            CellBounds { min: Coordinate::new(-1, -2), max: Coordinate::new(2, 3) }
        );
        assert!(bounds.contains(Coordinate::new(0, 3)));
        assert!(!bounds.contains(Coordinate::new(3, 0)));
    }
}
