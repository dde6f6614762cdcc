use std::collections::VecDeque;

/// Ordering discipline of the search frontier.
///
/// The traversal loop is shared by every strategy; which node comes out of
/// [`pop`](Frontier::pop) next is the only thing that differs.
pub trait Frontier {
    /// Add a discovered node (flat index).
    fn push(&mut self, idx: usize);

    /// Remove the next node to expand.
    fn pop(&mut self) -> Option<usize>;

    /// Drop every pending node.
    fn clear(&mut self);

    /// Number of pending nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Oldest first (breadth-first).
impl Frontier for VecDeque<usize> {
    #[inline]
    fn push(&mut self, idx: usize) {
        self.push_back(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// Most recently added first (depth-first).
impl Frontier for Vec<usize> {
    #[inline]
    fn push(&mut self, idx: usize) {
        Vec::push(self, idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        Vec::pop(self)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier>(f: &mut F) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(i) = f.pop() {
            out.push(i);
        }
        out
    }

    #[test]
    fn queue_is_fifo() {
        let mut q: VecDeque<usize> = VecDeque::new();
        for i in 0..3 {
            Frontier::push(&mut q, i);
        }
        assert_eq!(Frontier::len(&q), 3);
        assert_eq!(drain(&mut q), vec![0, 1, 2]);
        assert!(Frontier::is_empty(&q));
    }

    #[test]
    fn stack_is_lifo() {
        let mut s: Vec<usize> = Vec::new();
        for i in 0..3 {
            Frontier::push(&mut s, i);
        }
        assert_eq!(drain(&mut s), vec![2, 1, 0]);
    }
}
