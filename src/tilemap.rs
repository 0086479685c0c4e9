/// A 2D grid anchored at a world-space column, row-major over `(x, z)`.
///
/// Cells are addressed either by local index (`0..width`, `0..depth`) or by
/// world coordinate. No wrapping: the world is unbounded and a tilemap only
/// covers the rectangle it was generated for.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub origin_x: i32,
    pub origin_z: i32,
    pub width: usize,
    pub depth: usize,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(origin_x: i32, origin_z: i32, width: usize, depth: usize, value: T) -> Self {
        Self {
            origin_x,
            origin_z,
            width,
            depth,
            data: vec![value; width * depth],
        }
    }
}

impl<T> Tilemap<T> {
    /// Build from row-major rows; every row must be `width` long.
    pub fn from_rows(origin_x: i32, origin_z: i32, width: usize, rows: Vec<Vec<T>>) -> Self {
        let depth = rows.len();
        let mut data = Vec::with_capacity(width * depth);
        for row in rows {
            debug_assert_eq!(row.len(), width, "ragged tilemap row");
            data.extend(row);
        }
        Self {
            origin_x,
            origin_z,
            width,
            depth,
            data,
        }
    }

    fn index(&self, x: usize, z: usize) -> usize {
        z * self.width + x
    }

    pub fn get(&self, x: usize, z: usize) -> &T {
        &self.data[self.index(x, z)]
    }

    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    /// Look up a cell by world coordinate, `None` outside the covered area
    pub fn get_world(&self, world_x: i32, world_z: i32) -> Option<&T> {
        let x = usize::try_from(world_x - self.origin_x).ok()?;
        let z = usize::try_from(world_z - self.origin_z).ok()?;
        if x >= self.width || z >= self.depth {
            return None;
        }
        Some(self.get(x, z))
    }

    /// World coordinate of a local cell
    pub fn world_coord(&self, x: usize, z: usize) -> (i32, i32) {
        (self.origin_x + x as i32, self.origin_z + z as i32)
    }

    /// Iterate over all cells with their local coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let z = idx / width;
            (x, z, val)
        })
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Copy + PartialOrd> Tilemap<T> {
    /// Smallest and largest value, `None` for an empty map
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut values = self.data.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_lookup() {
        let mut map = Tilemap::new_with(-8, 100, 4, 3, 0i32);
        map.set(1, 2, 42);
        assert_eq!(map.get_world(-7, 102), Some(&42));
        assert_eq!(map.get_world(-9, 100), None);
        assert_eq!(map.get_world(-4, 100), None);
        assert_eq!(map.get_world(-8, 103), None);
        assert_eq!(map.world_coord(1, 2), (-7, 102));
    }

    #[test]
    fn test_from_rows_and_iter() {
        let map = Tilemap::from_rows(0, 0, 2, vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(map.depth, 2);
        let cells: Vec<(usize, usize, i32)> = map.iter().map(|(x, z, v)| (x, z, *v)).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
        assert_eq!(map.min_max(), Some((1, 4)));
    }

    #[test]
    fn test_empty_min_max() {
        let map: Tilemap<i32> = Tilemap::from_rows(0, 0, 0, Vec::new());
        assert!(map.is_empty());
        assert_eq!(map.min_max(), None);
    }
}
