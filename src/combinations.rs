//! k-subsets of an ordered sequence.
//!
//! Subsets come out in lexicographic order of their positions: for input
//! `[a, b, c, d]` and `k = 2` the order is `ab, ac, ad, bc, bd, cd`. Elements
//! inside a subset keep their input order. The lookup table relies on this:
//! feeding ranks high-to-low yields the strongest kicker sets first.

/// Binomial coefficient C(n, k).
pub const fn n_choose_k(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let mut acc = 1usize;
    let mut i = 0;
    while i < k {
        acc = acc * (n - i) / (i + 1);
        i += 1;
    }
    acc
}

/// Generator of all k-subsets of `items`.
///
/// `next_indices` advances without allocating; the `Iterator` impl collects
/// each subset into a `Vec`.
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Self {
        Self {
            items,
            indices: (0..k).collect(),
            first: true,
            done: k > items.len(),
        }
    }

    /// Advance to the next subset and return its positions in `items`.
    pub fn next_indices(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(&self.indices);
        }

        let n = self.items.len();
        let k = self.indices.len();

        // rightmost slot that can still move right
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != n - k + i {
                break;
            }
        }

        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.next_indices()
            .map(|idx| idx.iter().map(|&i| items[i]).collect())
    }
}

/// Convenience wrapper: all k-subsets of `items`, in lexicographic order.
pub fn combinations<T: Copy>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations::new(items, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order() {
        let got: Vec<Vec<char>> = combinations(&['a', 'b', 'c', 'd'], 2).collect();
        let want = vec![
            vec!['a', 'b'],
            vec!['a', 'c'],
            vec!['a', 'd'],
            vec!['b', 'c'],
            vec!['b', 'd'],
            vec!['c', 'd'],
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn counts_match_binomial() {
        let items: Vec<u8> = (0..13).collect();
        for k in 0..=6 {
            assert_eq!(combinations(&items, k).count(), n_choose_k(13, k), "k = {k}");
        }
        assert_eq!(n_choose_k(7, 5), 21);
        assert_eq!(n_choose_k(13, 5), 1287);
    }

    #[test]
    fn edge_sizes() {
        // k = 0 yields the single empty subset, k > n yields nothing
        assert_eq!(combinations(&[1, 2, 3], 0).collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
        assert_eq!(combinations(&[1, 2, 3], 4).count(), 0);
        assert_eq!(combinations(&[1, 2, 3], 3).collect::<Vec<_>>(), vec![vec![1, 2, 3]]);
        assert_eq!(combinations::<u8>(&[], 0).count(), 1);
    }

    #[test]
    fn indices_without_allocation() {
        let items = [10, 20, 30];
        let mut c = Combinations::new(&items, 2);
        assert_eq!(c.next_indices(), Some(&[0, 1][..]));
        assert_eq!(c.next_indices(), Some(&[0, 2][..]));
        assert_eq!(c.next_indices(), Some(&[1, 2][..]));
        assert_eq!(c.next_indices(), None);
        assert_eq!(c.next_indices(), None);
    }
}
