//! Utility functions and types used accross the library
use crate::{PI, Scalar};
use std::{cmp::Ordering, fmt, iter::FromIterator};

/// Roots of `D >= 0` cubic are considered a pair when imaginary part of the
/// complex pair is smaller than this value.
pub const CUBIC_DOUBLE_ROOT_TOLERANCE: Scalar = 1e-5;

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Abstraction over slices used by `ArrayIter`
pub trait Array {
    type Item;
    fn new() -> Self;
    fn size(&self) -> usize;
    fn at(&self, index: usize) -> Option<&Self::Item>;
    fn take(&mut self, index: usize) -> Option<Self::Item>;
    fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item>;
}

macro_rules! impl_array(
    ($($size:expr),+) => {
        $(
            impl<T: Copy> Array for [Option<T>; $size] {
                type Item = T;
                fn new() -> Self {
                    [None; $size]
                }
                fn size(&self) -> usize { $size }
                fn at(&self, index: usize) -> Option<&Self::Item> {
                    self.get(index).and_then(|item| item.as_ref())
                }
                fn take(&mut self, index: usize) -> Option<Self::Item> {
                    self[index].take()
                }
                fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item> {
                    self[index].replace(value)
                }
            }
        )+
    }
);

impl_array!(2, 3, 4, 5);

/// Fixed sized iterator
///
/// Never allocates, pushing more items than the array can hold panics.
#[derive(Clone, Copy)]
pub struct ArrayIter<A> {
    start: usize,
    end: usize,
    array: A,
}

impl<A> fmt::Debug for ArrayIter<A>
where
    A: Array,
    A::Item: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = fmt.debug_list();
        for index in self.start..self.end {
            if let Some(item) = self.array.at(index) {
                list.entry(item);
            }
        }
        list.finish()
    }
}

impl<A: Array> Default for ArrayIter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> ArrayIter<A> {
    pub fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            array: A::new(),
        }
    }

    /// Push new element to the end of the iterator
    pub fn push(&mut self, item: A::Item) {
        self.array.put(self.end, item);
        self.end += 1;
    }

    /// Check if array iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of unconsumed elements
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Sort unconsumed elements (insertion sort, arrays are tiny)
    pub fn sort_by<F>(mut self, mut cmp: F) -> Self
    where
        F: FnMut(&A::Item, &A::Item) -> Ordering,
    {
        for index in (self.start + 1)..self.end {
            let mut cursor = index;
            while cursor > self.start {
                let (Some(prev), Some(item)) = (
                    self.array.take(cursor - 1),
                    self.array.take(cursor),
                ) else {
                    break;
                };
                if cmp(&prev, &item) == Ordering::Greater {
                    self.array.put(cursor - 1, item);
                    self.array.put(cursor, prev);
                    cursor -= 1;
                } else {
                    self.array.put(cursor - 1, prev);
                    self.array.put(cursor, item);
                    break;
                }
            }
        }
        self
    }
}

impl<A: Array> Extend<A::Item> for ArrayIter<A> {
    fn extend<T: IntoIterator<Item = A::Item>>(&mut self, iter: T) {
        for item in iter.into_iter() {
            self.push(item);
        }
    }
}

impl<A: Array> FromIterator<A::Item> for ArrayIter<A> {
    fn from_iter<T: IntoIterator<Item = A::Item>>(iter: T) -> Self {
        let mut array = ArrayIter::<A>::new();
        array.extend(iter);
        array
    }
}

impl<A: Array> Iterator for ArrayIter<A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let item = self.array.take(self.start);
            self.start += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }
}

impl<A: Array> DoubleEndedIterator for ArrayIter<A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            self.array.take(self.end)
        } else {
            None
        }
    }
}

/// Real roots of the quadratic equation
pub type QuadraticRoots = ArrayIter<[Option<Scalar>; 2]>;

/// Real roots of the cubic equation
pub type CubicRoots = ArrayIter<[Option<Scalar>; 3]>;

/// Real roots of `a * t ^ 2 + b * t + c = 0`
///
/// Degenerate equation (`a == 0`) has no roots here, linear case must be
/// handled by the caller. Roots are not ordered.
pub fn real_quadratic_roots(a: Scalar, b: Scalar, c: Scalar) -> QuadraticRoots {
    let mut roots = QuadraticRoots::new();
    if a == 0.0 {
        return roots;
    }
    let disc = b * b - 4.0 * a * c;
    if disc == 0.0 {
        roots.push(-b / (2.0 * a));
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        roots.push((-b - sq) / (2.0 * a));
        roots.push((-b + sq) / (2.0 * a));
    }
    roots.filter(|root| root.is_finite()).collect()
}

/// Real roots of `a * t ^ 3 + b * t ^ 2 + c * t + d = 0`
///
/// Uses `Q`, `R` form of the depressed cubic. When `D = Q^3 + R^2 >= 0` there is
/// one real root, and a second one is reported if imaginary part of the complex
/// pair is within [`CUBIC_DOUBLE_ROOT_TOLERANCE`]. Tolerance is absolute and does
/// not scale with coefficients. When `D < 0` all three roots are real.
pub fn real_cubic_roots(a: Scalar, b: Scalar, c: Scalar, d: Scalar) -> CubicRoots {
    if a == 0.0 {
        return real_quadratic_roots(b, c, d).collect();
    }
    let mut roots = CubicRoots::new();

    // normalize to `t ^ 3 + a * t ^ 2 + b * t + c = 0`
    let (a, b, c) = (b / a, c / a, d / a);
    let q = (3.0 * b - a * a) / 9.0;
    let r = (9.0 * a * b - 27.0 * c - 2.0 * a * a * a) / 54.0;
    let disc = q * q * q + r * r;
    let a3 = a / 3.0;

    if disc >= 0.0 {
        let sd = disc.sqrt();
        let s = (r + sd).cbrt();
        let t = (r - sd).cbrt();
        roots.push(s + t - a3);
        if (3.0_f64.sqrt() * (s - t) / 2.0).abs() <= CUBIC_DOUBLE_ROOT_TOLERANCE {
            roots.push(-a3 - (s + t) / 2.0);
        }
    } else {
        let theta = clamp(r / (-q * q * q).sqrt(), -1.0, 1.0).acos();
        let scale = 2.0 * (-q).sqrt();
        roots.push(scale * (theta / 3.0).cos() - a3);
        roots.push(scale * ((theta + 2.0 * PI) / 3.0).cos() - a3);
        roots.push(scale * ((theta + 4.0 * PI) / 3.0).cos() - a3);
    }

    roots.filter(|root| root.is_finite()).collect()
}
