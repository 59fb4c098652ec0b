//! Lazy lexicographic permutation generator.

/// Rearranges `v` into the next permutation in lexicographic order.
///
/// Returns `false` (leaving `v` in descending order) when `v` is already
/// the last permutation.
pub fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Active,
    Exhausted,
}

/// Enumerates every permutation of a set of indices in lexicographic order,
/// one at a time, holding only the current permutation in memory.
///
/// The empty set has exactly one permutation, the empty sequence.
///
/// # Examples
///
/// ```
/// use u_delivery::exact::Permutations;
///
/// let all: Vec<Vec<usize>> = Permutations::new(vec![3, 1, 2]).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![1, 2, 3]);
/// assert_eq!(all[1], vec![1, 3, 2]);
/// assert_eq!(all[5], vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    state: State,
}

impl Permutations {
    /// Starts at the ascending arrangement of `items`.
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Self {
            current: items,
            state: State::Fresh,
        }
    }

    /// Permutations of `first..end`.
    pub fn of_range(first: usize, end: usize) -> Self {
        Self::new((first..end).collect())
    }

    /// Moves to the next permutation and borrows it.
    ///
    /// Returns `None` once every permutation has been produced.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.state {
            State::Fresh => {
                self.state = State::Active;
                Some(&self.current)
            }
            State::Active => {
                if next_permutation(&mut self.current) {
                    Some(&self.current)
                } else {
                    self.state = State::Exhausted;
                    None
                }
            }
            State::Exhausted => None,
        }
    }

    /// Skips every remaining permutation that shares the current prefix
    /// `current[..=pos]`, returning how many were skipped.
    ///
    /// The next [`advance`](Self::advance) yields the first permutation
    /// with a different prefix.
    pub fn skip_suffix_after(&mut self, pos: usize) -> u64 {
        if self.state != State::Active || pos + 1 >= self.current.len() {
            return 0;
        }
        let tail = &mut self.current[pos + 1..];
        // Remaining arrangements of the tail after the current one.
        let skipped = remaining_after(tail);
        tail.sort_unstable_by(|a, b| b.cmp(a));
        skipped
    }

    /// Rewinds to the first permutation.
    pub fn reset(&mut self) {
        self.current.sort_unstable();
        self.state = State::Fresh;
    }

    /// Number of items being permuted.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns `true` when permuting the empty set.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// `k!`, saturating at `u64::MAX`.
pub(crate) fn factorial(k: usize) -> u64 {
    (2..=k as u64).fold(1u64, |acc, i| acc.saturating_mul(i))
}

/// Number of permutations of distinct `tail` that come after it in
/// lexicographic order.
fn remaining_after(tail: &[usize]) -> u64 {
    let len = tail.len();
    let mut remaining = 0u64;
    for (i, &v) in tail.iter().enumerate() {
        let larger_later = tail[i + 1..].iter().filter(|&&w| w > v).count() as u64;
        remaining = remaining.saturating_add(larger_later.saturating_mul(factorial(len - i - 1)));
    }
    remaining
}
