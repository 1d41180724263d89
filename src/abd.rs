//! Fixed three-slot records keyed by comparison group.
//!
//! Every ABD figure has exactly three things to describe: group A, group
//! B and their difference. [`Abd`] holds one value per slot and is indexed
//! by [`Group`], so per-group labels, styles and estimates share one shape
//! without a dynamic map.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// One slot of an [`Abd`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    A,
    B,
    Diff,
}

impl Group {
    /// All groups in display order.
    pub const ALL: [Group; 3] = [Group::A, Group::B, Group::Diff];
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => f.write_str("a"),
            Group::B => f.write_str("b"),
            Group::Diff => f.write_str("diff"),
        }
    }
}

/// A value for each of group A, group B and their difference.
///
/// # Examples
/// ```
/// use abd_figure::{Abd, Group};
///
/// let sizes = Abd::new(5.0, 5.0, 6.0);
/// assert_eq!(sizes[Group::Diff], 6.0);
/// let doubled = sizes.map(|s| s * 2.0);
/// assert_eq!(doubled.b, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Abd<T> {
    pub a: T,
    pub b: T,
    pub diff: T,
}

impl<T> Abd<T> {
    pub const fn new(a: T, b: T, diff: T) -> Self {
        Self { a, b, diff }
    }

    pub fn get(&self, group: Group) -> &T {
        match group {
            Group::A => &self.a,
            Group::B => &self.b,
            Group::Diff => &self.diff,
        }
    }

    /// Applies `f` to each slot, keeping the slot order.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Abd<U> {
        Abd {
            a: f(self.a),
            b: f(self.b),
            diff: f(self.diff),
        }
    }

    /// Iterates `(group, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &T)> {
        Group::ALL.into_iter().map(move |g| (g, self.get(g)))
    }
}

impl<T> Index<Group> for Abd<T> {
    type Output = T;

    fn index(&self, group: Group) -> &T {
        self.get(group)
    }
}
