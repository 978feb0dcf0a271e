//! Loop-nest representation of one unrolled arity.
//!
//! For arity `k` the nest has `k` levels. Level `i` walks `l_i` upward from
//! `k - i`, bounded by `n` at the outermost level and by `l_{i-1}` below it,
//! so the chosen indices are strictly decreasing from the outside in and every
//! level leaves room for the picks still to come.

use crate::error::{Error, Result};

pub const MIN_ARITY: usize = 2;
pub const MAX_ARITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arity(usize);

impl Arity {
    pub fn new(k: usize) -> Result<Self> {
        if (MIN_ARITY..=MAX_ARITY).contains(&k) {
            Ok(Self(k))
        } else {
            Err(Error::ArityOutOfRange(k))
        }
    }
    pub fn get(self) -> usize {
        self.0
    }
    /// Every supported arity, ascending.
    pub fn all() -> impl Iterator<Item = Arity> {
        (MIN_ARITY..=MAX_ARITY).map(Arity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Length of the input sequence.
    Len,
    /// Current value of the enclosing level's loop variable.
    Var(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// `p_i = items[l_i]` when `prev` is `None`, `p_i = p_prev * items[l_i]` otherwise.
    Partial { prev: Option<usize> },
    /// `s += p_prefix * items[l_k]`.
    Accumulate { prefix: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// 1-based nesting depth, also the suffix of `l_i` / `p_i`.
    pub index: usize,
    /// Lower bound is `k - offset`.
    pub offset: usize,
    pub upper: Bound,
    pub step: Step,
}

impl Level {
    pub fn lower(&self, arity: Arity) -> usize {
        arity.get() - self.offset
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopNest {
    pub arity: Arity,
    pub levels: Vec<Level>,
}

impl LoopNest {
    pub fn unroll(arity: Arity) -> Self {
        let k = arity.get();
        let levels = (1..=k)
            .map(|i| Level {
                index: i,
                offset: i,
                upper: if i == 1 { Bound::Len } else { Bound::Var(i - 1) },
                step: if i == k {
                    Step::Accumulate { prefix: k - 1 }
                } else if i == 1 {
                    Step::Partial { prev: None }
                } else {
                    Step::Partial { prev: Some(i - 1) }
                },
            })
            .collect();
        Self { arity, levels }
    }
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_range_is_closed() {
        assert!(Arity::new(1).is_err());
        assert!(Arity::new(65).is_err());
        assert_eq!(Arity::new(2).unwrap().get(), 2);
        assert_eq!(Arity::new(64).unwrap().get(), 64);
        let all: Vec<_> = Arity::all().map(Arity::get).collect();
        assert_eq!(all.len(), 63);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unroll_three() {
        let arity = Arity::new(3).unwrap();
        let nest = LoopNest::unroll(arity);
        assert_eq!(nest.depth(), 3);
        assert_eq!(nest.levels[0].upper, Bound::Len);
        assert_eq!(nest.levels[0].step, Step::Partial { prev: None });
        assert_eq!(nest.levels[1].upper, Bound::Var(1));
        assert_eq!(nest.levels[1].step, Step::Partial { prev: Some(1) });
        assert_eq!(nest.levels[2].upper, Bound::Var(2));
        assert_eq!(nest.levels[2].step, Step::Accumulate { prefix: 2 });
        let lowers: Vec<_> = nest.levels.iter().map(|l| l.lower(arity)).collect();
        assert_eq!(lowers, vec![2, 1, 0]);
    }
}
