//! Geometry primitives: axis-aligned rectangles, points, and the layer-name
//! to z-index mapping shared by every other component.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use glam::DVec2;
use std::collections::HashMap;

/// A point in board space, in whatever real-world unit the input uses.
pub type Point = DVec2;

/// The index of a conductor layer. `0` is the top layer, `1` is the bottom
/// layer. This crate only supports two-layer boards.
pub type Z = u8;

pub const TOP: Z = 0;
pub const BOTTOM: Z = 1;

/// An axis-aligned rectangle in board space, defined by its center and
/// full width/height, matching the `Cell` shape rather than a min/max
/// corner pair.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    center: Point,
    width: f64,
    height: f64,
}

impl Rect {
    #[inline]
    #[must_use]
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        Self {
            center,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn from_corners(min: Point, max: Point) -> Self {
        let center = (min + max) * 0.5;
        Self {
            center,
            width: (max.x - min.x).abs(),
            height: (max.y - min.y).abs(),
        }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn min(&self) -> Point {
        Point::new(self.center.x - self.width * 0.5, self.center.y - self.height * 0.5)
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(self.center.x + self.width * 0.5, self.center.y + self.height * 0.5)
    }

    /// The four corners of this rect, bottom-left first, counter-clockwise.
    #[inline]
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ]
    }

    /// Split this rect into its four quadrant children, in `Quadrant` order.
    #[inline]
    #[must_use]
    pub fn split_quadrants(&self) -> [Rect; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        let qw = hw * 0.5;
        let qh = hh * 0.5;
        let c = self.center;
        [
            Rect::new(Point::new(c.x - qw, c.y - qh), hw, hh), // bottom-left
            Rect::new(Point::new(c.x + qw, c.y - qh), hw, hh), // bottom-right
            Rect::new(Point::new(c.x + qw, c.y + qh), hw, hh), // top-right
            Rect::new(Point::new(c.x - qw, c.y + qh), hw, hh), // top-left
        ]
    }

    #[inline]
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Rect::from_corners(min, max)
    }

    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if min.x >= max.x || min.y >= max.y {
            None
        } else {
            Some(Rect::from_corners(min, max))
        }
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Inclusive containment: a point lying exactly on the boundary counts as
/// contained.
#[inline]
#[must_use]
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    let min = r.min();
    let max = r.max();
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}

/// Strict overlap: rectangles that only share an edge or corner do not
/// overlap.
#[inline]
#[must_use]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let a_min = a.min();
    let a_max = a.max();
    let b_min = b.min();
    let b_max = b.max();
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// A bijective mapping between layer names and `z` indices, derived from
/// the board's declared layer list. Total over the declared layers: every
/// name maps to exactly one `z`, and every in-range `z` maps back to its
/// name.
#[derive(Debug, Clone)]
pub struct LayerMap {
    name_to_z: HashMap<String, Z>,
    z_to_name: Vec<String>,
}

impl LayerMap {
    /// Build a layer map from an ordered list of layer names. The order
    /// defines the `z` assignment: the first name is `z = 0` (top), the
    /// second is `z = 1` (bottom).
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let z_to_name: Vec<String> = names.into_iter().collect();
        let name_to_z = z_to_name
            .iter()
            .enumerate()
            .map(|(z, name)| (name.clone(), z as Z))
            .collect();
        Self {
            name_to_z,
            z_to_name,
        }
    }

    #[inline]
    #[must_use]
    pub fn layer_name_to_z(&self, name: &str) -> Option<Z> {
        self.name_to_z.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn z_to_layer_name(&self, z: Z) -> Option<&str> {
        self.z_to_name.get(z as usize).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.z_to_name.len()
    }
}

/// Subtract `cover` from `rect`, returning the (possibly empty) set of
/// axis-aligned rectangles that remain. Used to determine whether a cell
/// is completely covered by the union of several obstacle rectangles,
/// without requiring a general polygon-union implementation.
#[must_use]
pub fn rect_difference(rect: &Rect, cover: &Rect) -> Vec<Rect> {
    let Some(ix) = rect.intersection(cover) else {
        return vec![*rect];
    };
    let rmin = rect.min();
    let rmax = rect.max();
    let imin = ix.min();
    let imax = ix.max();

    let mut pieces = Vec::with_capacity(4);
    // Bottom slab.
    if imin.y > rmin.y {
        pieces.push(Rect::from_corners(rmin, Point::new(rmax.x, imin.y)));
    }
    // Top slab.
    if imax.y < rmax.y {
        pieces.push(Rect::from_corners(Point::new(rmin.x, imax.y), rmax));
    }
    // Left slab (restricted to the intersection's y-range).
    if imin.x > rmin.x {
        pieces.push(Rect::from_corners(
            Point::new(rmin.x, imin.y),
            Point::new(imin.x, imax.y),
        ));
    }
    // Right slab (restricted to the intersection's y-range).
    if imax.x < rmax.x {
        pieces.push(Rect::from_corners(
            Point::new(imax.x, imin.y),
            Point::new(rmax.x, imax.y),
        ));
    }
    pieces
}

/// Determine whether `rect` is fully covered by the union of `covers`.
#[must_use]
pub fn rect_fully_covered(rect: &Rect, covers: &[Rect]) -> bool {
    let mut remaining = vec![*rect];
    for cover in covers {
        if remaining.is_empty() {
            break;
        }
        let mut next = Vec::with_capacity(remaining.len());
        for r in &remaining {
            next.extend(rect_difference(r, cover));
        }
        remaining = next;
    }
    remaining.is_empty()
}

/// A straight line segment between two points, used both for the shared
/// boundary between adjacent cells, and for the straight line a net draws
/// between two connected points inside a cell.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSeg {
    pub a: Point,
    pub b: Point,
}

impl LineSeg {
    #[inline]
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Strict interior intersection: two segments that only touch at a
    /// shared endpoint do not count as crossing.
    #[must_use]
    pub fn crosses(&self, other: &LineSeg) -> bool {
        let d1 = orientation(other.a, other.b, self.a);
        let d2 = orientation(other.a, other.b, self.b);
        let d3 = orientation(self.a, self.b, other.a);
        let d4 = orientation(self.a, self.b, other.b);

        let straddles = ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0));
        straddles
    }
}

/// Twice the signed area of the triangle `(a, b, c)`. Positive when `c` is
/// left of the directed line `a -> b`.
#[inline]
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
