use gridwalk_core::Coord;

/// Cached neighbor computation helper.
///
/// Enumerates the orthogonal neighbours of a coordinate in the fixed
/// down, up, right, left order, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-connected neighbours of `p`, keeping only those for
    /// which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Coord, keep: impl Fn(Coord) -> bool) -> &[Coord] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Grid;

    #[test]
    fn corner_keeps_in_bounds_only() {
        let g = Grid::open(3, 3);
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(0, 0), |p| g.is_open(p)).to_vec();
        assert_eq!(got, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn walls_are_filtered() {
        let g = Grid::open(3, 3).with_blocked([Coord::new(2, 1)]);
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(1, 1), |p| g.is_open(p)).to_vec();
        assert_eq!(
            got,
            vec![Coord::new(0, 1), Coord::new(1, 2), Coord::new(1, 0)]
        );
    }
}
