use bitvec::vec::BitVec;

use super::Coord;

/// Per-cell visitation flags for a traversal, kept apart from presentation.
/// Also remembers the order in which cells were marked so a renderer can replay it.
#[derive(Debug, Clone)]
pub struct VisitMarks {
    bits: BitVec,
    order: Vec<Coord>,
    rows: u16,
    cols: u16,
}

impl VisitMarks {
    pub fn new(rows: u16, cols: u16) -> Self {
        VisitMarks {
            bits: BitVec::repeat(false, rows as usize * cols as usize),
            order: Vec::new(),
            rows,
            cols,
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.0 < self.rows && coord.1 < self.cols)
            .then(|| coord.0 as usize * self.cols as usize + coord.1 as usize)
    }

    /// Marks a cell as visited.
    /// Returns `true` if the cell was not marked before, `false` if it was already marked
    /// or lies outside the grid.
    pub fn mark(&mut self, coord: Coord) -> bool {
        match self.index(coord) {
            Some(idx) if !self.bits[idx] => {
                self.bits.set(idx, true);
                self.order.push(coord);
                true
            }
            _ => false,
        }
    }

    pub fn is_marked(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|idx| self.bits[idx])
    }

    /// Cells in the order they were marked.
    pub fn order(&self) -> &[Coord] {
        &self.order
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every mark.
    pub fn clear(&mut self) {
        self.bits.fill(false);
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_once() {
        let mut marks = VisitMarks::new(3, 3);
        assert!(marks.mark((1, 2)));
        assert!(!marks.mark((1, 2)));
        assert!(marks.is_marked((1, 2)));
        assert!(!marks.is_marked((2, 1)));
        // Out of bounds is never marked
        assert!(!marks.mark((3, 0)));
        assert!(!marks.is_marked((3, 0)));
        assert_eq!(marks.order(), &[(1, 2)]);
    }

    #[test]
    fn test_clear() {
        let mut marks = VisitMarks::new(2, 2);
        marks.mark((0, 0));
        marks.mark((1, 1));
        marks.clear();
        assert!(marks.is_empty());
        assert!(!marks.is_marked((0, 0)));
        assert!(!marks.is_marked((1, 1)));
    }
}
