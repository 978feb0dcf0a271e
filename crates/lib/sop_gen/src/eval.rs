//! Reference execution of a [`LoopNest`], used to check the generated loops
//! against a brute-force enumeration.

use std::ops::{AddAssign, Mul};

use crate::ir::{Bound, LoopNest, Step};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation<T> {
    pub sum: T,
    /// Number of times the innermost accumulation ran.
    pub steps: u64,
}

struct Interpreter<'a, T> {
    nest: &'a LoopNest,
    items: &'a [T],
    vars: Vec<usize>,
    partials: Vec<T>,
    acc: Evaluation<T>,
}

impl<'a, T> Interpreter<'a, T>
where
    T: Copy + Default + Mul<Output = T> + AddAssign,
{
    fn run(&mut self, depth: usize) {
        let nest = self.nest;
        let level = &nest.levels[depth];
        let upper = match level.upper {
            Bound::Len => self.items.len(),
            Bound::Var(i) => self.vars[i - 1],
        };
        let mut l = level.lower(nest.arity);
        while l < upper {
            self.vars[depth] = l;
            let x = self.items[l];
            match level.step {
                Step::Partial { prev } => {
                    self.partials[depth] = match prev {
                        None => x,
                        Some(p) => self.partials[p - 1] * x,
                    };
                    self.run(depth + 1);
                }
                Step::Accumulate { prefix } => {
                    self.acc.sum += self.partials[prefix - 1] * x;
                    self.acc.steps += 1;
                }
            }
            l += 1;
        }
    }
}

/// Runs the nest over `items` the way the generated switch arm would.
pub fn evaluate<T>(nest: &LoopNest, items: &[T]) -> Evaluation<T>
where
    T: Copy + Default + Mul<Output = T> + AddAssign,
{
    let depth = nest.depth();
    let mut interp = Interpreter {
        nest,
        items,
        vars: vec![0; depth],
        partials: vec![T::default(); depth],
        acc: Evaluation {
            sum: T::default(),
            steps: 0,
        },
    };
    if depth > 0 {
        interp.run(0);
    }
    interp.acc
}

/// Sums the products of every ascending `k`-combination of `items` by
/// explicit enumeration.
pub fn combinations_oracle<T>(items: &[T], k: usize) -> Evaluation<T>
where
    T: Copy + Default + Mul<Output = T> + AddAssign,
{
    fn go<T>(items: &[T], start: usize, left: usize, prod: Option<T>, acc: &mut Evaluation<T>)
    where
        T: Copy + Default + Mul<Output = T> + AddAssign,
    {
        if left == 0 {
            if let Some(p) = prod {
                acc.sum += p;
                acc.steps += 1;
            }
            return;
        }
        for j in start..items.len() {
            let p = match prod {
                None => items[j],
                Some(p) => p * items[j],
            };
            go(items, j + 1, left - 1, Some(p), acc);
        }
    }
    let mut acc = Evaluation {
        sum: T::default(),
        steps: 0,
    };
    go(items, 0, k, None, &mut acc);
    acc
}

/// `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut r: u128 = 1;
    for i in 0..k {
        r = r * (n - i) as u128 / (i + 1) as u128;
        if r > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    r as u64
}
