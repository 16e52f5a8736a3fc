use super::Coord;

/// Dense row-major storage for one value per maze coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Box<[T]>,
    rows: u16,
    cols: u16,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: u16, cols: u16, value: T) -> Self {
        let data = vec![value; rows as usize * cols as usize].into_boxed_slice();
        Grid { data, rows, cols }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        coord.0 as usize * self.cols as usize + coord.1 as usize
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        if self.is_in_bounds(coord) {
            Some(&self.data[self.ravel_index(coord)])
        } else {
            None
        }
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<T> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl<T> std::ops::Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing_is_row_major() {
        let mut grid = Grid::new(3, 4, 0u8);
        grid[(1, 2)] = 7;
        assert_eq!(grid[(1, 2)], 7);
        assert_eq!(grid.get((1, 2)), Some(&7));
        assert_eq!(grid.get((3, 0)), None);
        assert_eq!(grid.get((0, 4)), None);
        assert_eq!(grid.coords().nth(6), Some((1, 2)));
        assert_eq!(grid.coords().count(), 12);
    }
}
