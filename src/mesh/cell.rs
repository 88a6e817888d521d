#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Z};
use crate::ids::CellId;
use std::fmt;

/// A nonempty subset of `{0, 1}`, the two conductor layers a cell may be
/// available on. Always nonempty.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailableZ(u8);

impl AvailableZ {
    pub const BOTH: AvailableZ = AvailableZ(0b11);

    #[inline]
    #[must_use]
    pub fn single(z: Z) -> Self {
        debug_assert!(z < 2);
        AvailableZ(1 << z)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, z: Z) -> bool {
        self.0 & (1 << z) != 0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = Z> + '_ {
        (0..2u8).filter(move |&z| self.contains(z))
    }

    #[inline]
    #[must_use]
    pub fn intersect(&self, other: &AvailableZ) -> AvailableZ {
        AvailableZ(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub fn union(&self, other: &AvailableZ) -> AvailableZ {
        AvailableZ(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &AvailableZ) -> bool {
        self.0 & other.0 != 0
    }

    /// The single z value, if this set has exactly one member.
    #[inline]
    #[must_use]
    pub fn only(&self) -> Option<Z> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    #[must_use]
    pub fn from_zs(zs: impl IntoIterator<Item = Z>) -> Self {
        let mut bits = 0u8;
        for z in zs {
            bits |= 1 << z;
        }
        AvailableZ(bits)
    }
}

impl fmt::Display for AvailableZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for z in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{z}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// A capacity mesh node: an axis-aligned rectangle at a given subdivision
/// depth, annotated with its available layers and obstacle/target state.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    id: CellId,
    rect: Rect,
    available_z: AvailableZ,
    depth: u32,
    contains_obstacle: bool,
    completely_inside_obstacle: bool,
    contains_target: bool,
    target_connection_name: Option<String>,
    /// The ancestor this cell was split from, or `None` for the root.
    /// Arena-index based, so no cyclic ownership.
    parent: Option<CellId>,
}

impl Cell {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: CellId,
        rect: Rect,
        available_z: AvailableZ,
        depth: u32,
        contains_obstacle: bool,
        completely_inside_obstacle: bool,
        contains_target: bool,
        target_connection_name: Option<String>,
        parent: Option<CellId>,
    ) -> Self {
        debug_assert!(!available_z.is_empty());
        Self {
            id,
            rect,
            available_z,
            depth,
            contains_obstacle,
            completely_inside_obstacle,
            contains_target,
            target_connection_name,
            parent,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    #[must_use]
    pub fn available_z(&self) -> AvailableZ {
        self.available_z
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn contains_obstacle(&self) -> bool {
        self.contains_obstacle
    }

    #[inline]
    #[must_use]
    pub fn completely_inside_obstacle(&self) -> bool {
        self.completely_inside_obstacle
    }

    #[inline]
    #[must_use]
    pub fn contains_target(&self) -> bool {
        self.contains_target
    }

    #[inline]
    #[must_use]
    pub fn target_connection_name(&self) -> Option<&str> {
        self.target_connection_name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<CellId> {
        self.parent
    }

    /// `shouldBeInGraph`: a cell is retained unless it is completely
    /// inside an obstacle and carries no target.
    #[inline]
    #[must_use]
    pub fn should_be_in_graph(&self) -> bool {
        !self.completely_inside_obstacle || self.contains_target
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_available_z_single() {
        let z = AvailableZ::single(1);
        assert!(z.contains(1));
        assert!(!z.contains(0));
        assert_eq!(z.len(), 1);
        assert_eq!(z.only(), Some(1));
    }

    #[test]
    fn test_available_z_both() {
        let z = AvailableZ::BOTH;
        assert!(z.contains(0));
        assert!(z.contains(1));
        assert_eq!(z.len(), 2);
        assert_eq!(z.only(), None);
    }

    #[test]
    fn test_available_z_intersect_union() {
        let a = AvailableZ::single(0);
        let b = AvailableZ::single(1);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.union(&b), AvailableZ::BOTH);
        assert!(a.overlaps(&AvailableZ::BOTH));
    }
}
