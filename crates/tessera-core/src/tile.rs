//! Tile kind identifiers and tile sets.
//!
//! A [`TileKind`] is a small integer in the range `0..TileKind::MAX_KINDS`.
//! Each kind maps to a single bit, so a set of kinds packs into a `u32`
//! ([`TileSet`]) and "do these cells share a kind" becomes a mask
//! intersection.
//!
//! # Examples
//!
//! ```
//! use tessera_core::{TileKind, TileSet};
//!
//! let red = TileKind::new(0);
//! let blue = TileKind::new(1);
//!
//! let mut set = TileSet::new();
//! set.insert(red);
//! assert!(set.contains(red));
//! assert!(!set.contains(blue));
//!
//! let remaining = TileSet::full(5).difference(set);
//! assert_eq!(remaining.len(), 4);
//! ```

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

/// A tile category, identified by its index.
///
/// Kinds render as letters in board text (`A` for kind 0, `B` for kind 1, and
/// so on).
///
/// # Examples
///
/// ```
/// use tessera_core::TileKind;
///
/// let kind = TileKind::new(2);
/// assert_eq!(kind.index(), 2);
/// assert_eq!(kind.bit(), 0b100);
/// assert_eq!(kind.to_string(), "C");
/// assert_eq!(TileKind::from_letter('C'), Some(kind));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileKind(u8);

impl TileKind {
    /// Maximum number of distinct kinds a board can use.
    pub const MAX_KINDS: usize = 32;

    /// Creates a tile kind from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`TileKind::MAX_KINDS`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::MAX_KINDS, "tile kind index out of range");
        Self(index)
    }

    /// Creates a tile kind from a `usize` index, returning `None` when out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < Self::MAX_KINDS)
            .map(Self)
    }

    /// Parses the letter form (`A`..`Z`, then `a`..`f`).
    #[must_use]
    pub fn from_letter(ch: char) -> Option<Self> {
        let index = match ch {
            'A'..='Z' => u32::from(ch) - u32::from('A'),
            'a'..='f' => u32::from(ch) - u32::from('a') + 26,
            _ => return None,
        };
        usize::try_from(index).ok().and_then(Self::from_index)
    }

    /// Returns the letter form of this kind.
    #[must_use]
    pub fn letter(self) -> char {
        let offset = if self.0 < 26 {
            u32::from(b'A') + u32::from(self.0)
        } else {
            u32::from(b'a') + u32::from(self.0 - 26)
        };
        char::from_u32(offset).unwrap_or('?')
    }

    /// Returns the index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the single-bit mask for this kind.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self.0
    }

    /// Returns an iterator over the first `count` kinds.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`TileKind::MAX_KINDS`].
    pub fn all(count: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        assert!(count <= Self::MAX_KINDS, "too many tile kinds: {count}");
        (0..count).map(|i| Self(u8::try_from(i).unwrap_or(u8::MAX)))
    }
}

impl Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A set of tile kinds packed into a 32-bit mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSet {
    bits: u32,
}

impl TileSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the set containing the first `count` kinds.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`TileKind::MAX_KINDS`].
    #[must_use]
    pub const fn full(count: usize) -> Self {
        assert!(count <= TileKind::MAX_KINDS, "too many tile kinds");
        if count == TileKind::MAX_KINDS {
            Self { bits: u32::MAX }
        } else {
            Self {
                bits: (1u32 << count) - 1,
            }
        }
    }

    /// Creates a set from a raw mask.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw mask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns the number of kinds in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no kinds.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: TileKind) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Adds `kind`. Returns `true` if it was not already present.
    pub fn insert(&mut self, kind: TileKind) -> bool {
        let added = !self.contains(kind);
        self.bits |= kind.bit();
        added
    }

    /// Removes `kind`. Returns `true` if it was present.
    pub fn remove(&mut self, kind: TileKind) -> bool {
        let present = self.contains(kind);
        self.bits &= !kind.bit();
        present
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the kinds in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns the `n`-th kind in ascending order, if any.
    ///
    /// Used to draw uniformly from a set with a random index.
    #[must_use]
    pub fn nth(self, n: usize) -> Option<TileKind> {
        self.iter().nth(n)
    }

    /// Returns an iterator over the kinds in ascending order.
    #[must_use]
    pub fn iter(self) -> TileSetIter {
        TileSetIter { bits: self.bits }
    }
}

impl FromIterator<TileKind> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileKind>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl IntoIterator for TileSet {
    type Item = TileKind;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOr for TileSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for TileSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for TileSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitAndAssign for TileSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

/// Iterator over the kinds of a [`TileSet`].
#[derive(Debug, Clone)]
pub struct TileSetIter {
    bits: u32,
}

impl Iterator for TileSetIter {
    type Item = TileKind;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(TileKind(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for TileSetIter {}
impl FusedIterator for TileSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(TileKind::new(0).letter(), 'A');
        assert_eq!(TileKind::new(25).letter(), 'Z');
        assert_eq!(TileKind::new(26).letter(), 'a');
        assert_eq!(TileKind::new(31).letter(), 'f');
        for kind in TileKind::all(TileKind::MAX_KINDS) {
            assert_eq!(TileKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(TileKind::from_letter('.'), None);
        assert_eq!(TileKind::from_letter('g'), None);
    }

    #[test]
    #[should_panic(expected = "tile kind index out of range")]
    fn test_new_rejects_large_index() {
        let _ = TileKind::new(32);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(TileKind::from_index(4), Some(TileKind::new(4)));
        assert_eq!(TileKind::from_index(32), None);
        assert_eq!(TileKind::from_index(300), None);
    }

    #[test]
    fn test_full_and_empty() {
        assert_eq!(TileSet::full(0), TileSet::EMPTY);
        assert_eq!(TileSet::full(5).len(), 5);
        assert_eq!(TileSet::full(32).len(), 32);
        assert!(TileSet::EMPTY.is_empty());
    }

    #[test]
    fn test_operations() {
        let a = TileSet::from_iter([TileKind::new(0), TileKind::new(1), TileKind::new(2)]);
        let b = TileSet::from_iter([TileKind::new(1), TileKind::new(2), TileKind::new(3)]);

        assert_eq!((a | b).len(), 4);
        assert_eq!((a & b).len(), 2);
        assert_eq!(a.difference(b), TileSet::from_iter([TileKind::new(0)]));
    }

    #[test]
    fn test_insert_remove() {
        let mut set = TileSet::new();
        assert!(set.insert(TileKind::new(3)));
        assert!(!set.insert(TileKind::new(3)));
        assert!(set.remove(TileKind::new(3)));
        assert!(!set.remove(TileKind::new(3)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_order_and_nth() {
        let set = TileSet::from_iter([TileKind::new(4), TileKind::new(0), TileKind::new(2)]);
        let kinds: Vec<_> = set.iter().collect();
        assert_eq!(kinds, vec![TileKind::new(0), TileKind::new(2), TileKind::new(4)]);
        assert_eq!(set.nth(1), Some(TileKind::new(2)));
        assert_eq!(set.nth(3), None);
        assert_eq!(set.iter().len(), 3);
    }
}
