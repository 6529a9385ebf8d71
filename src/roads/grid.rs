//! Grid occupancy authority
//!
//! The single writer of road occupancy. A coordinate is claimed at most once
//! per run and never released until the next run clears the grid.

use ahash::AHashMap;

use crate::core::types::{Direction, GridCoord, PlacedHandle, SegmentKind};

/// What occupies a claimed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadCell {
    pub kind: SegmentKind,
    pub facing: Direction,
    pub handle: PlacedHandle,
}

/// Occupied cells and the objects placed on them
#[derive(Debug, Clone, Default)]
pub struct GridAuthority {
    cells: AHashMap<GridCoord, RoadCell>,
    /// Claim order, for deterministic iteration
    order: Vec<GridCoord>,
}

impl GridAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `coord` if it is free
    ///
    /// `factory` runs only when the claim succeeds. Returns false, with no
    /// side effect, when the cell is already occupied.
    pub fn try_claim<F>(
        &mut self,
        coord: GridCoord,
        kind: SegmentKind,
        facing: Direction,
        factory: F,
    ) -> bool
    where
        F: FnOnce() -> PlacedHandle,
    {
        if self.cells.contains_key(&coord) {
            return false;
        }

        let handle = factory();
        self.cells.insert(coord, RoadCell { kind, facing, handle });
        self.order.push(coord);
        tracing::trace!("Claimed {} as {:?} facing {:?}", coord, kind, facing);
        true
    }

    #[inline]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn get(&self, coord: GridCoord) -> Option<&RoadCell> {
        self.cells.get(&coord)
    }

    /// Iterate over claimed cells in the order they were claimed
    pub fn iter_in_claim_order(&self) -> impl Iterator<Item = (GridCoord, &RoadCell)> + '_ {
        self.order
            .iter()
            .filter_map(move |c| self.cells.get(c).map(|cell| (*c, cell)))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Forget every claim (start of a new run)
    pub fn clear(&mut self) {
        self.cells.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_free_cell() {
        let mut grid = GridAuthority::new();
        let claimed = grid.try_claim(
            GridCoord::new(1, 2),
            SegmentKind::Straight,
            Direction::North,
            || PlacedHandle(7),
        );

        assert!(claimed);
        assert!(grid.is_occupied(GridCoord::new(1, 2)));
        assert_eq!(grid.get(GridCoord::new(1, 2)).unwrap().handle, PlacedHandle(7));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_reclaim_fails_without_invoking_factory() {
        let mut grid = GridAuthority::new();
        let coord = GridCoord::ORIGIN;
        grid.try_claim(coord, SegmentKind::Straight, Direction::North, || PlacedHandle(1));

        let mut invoked = false;
        let claimed = grid.try_claim(coord, SegmentKind::Intersection, Direction::East, || {
            invoked = true;
            PlacedHandle(2)
        });

        assert!(!claimed);
        assert!(!invoked);
        let cell = grid.get(coord).unwrap();
        assert_eq!(cell.kind, SegmentKind::Straight);
        assert_eq!(cell.handle, PlacedHandle(1));
    }

    #[test]
    fn test_claim_order_is_preserved() {
        let mut grid = GridAuthority::new();
        let coords = [GridCoord::new(0, 0), GridCoord::new(5, -3), GridCoord::new(-1, 9)];
        for (i, c) in coords.iter().enumerate() {
            grid.try_claim(*c, SegmentKind::Straight, Direction::West, || PlacedHandle(i as u64));
        }

        let order: Vec<GridCoord> = grid.iter_in_claim_order().map(|(c, _)| c).collect();
        assert_eq!(order, coords);

        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.iter_in_claim_order().count(), 0);
    }
}
