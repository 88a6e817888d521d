//! Debug graphics data for each component's `visualize()` operation.
//! This crate only produces the data describing what to draw; rendering
//! it is out of scope.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::geometry::{LineSeg, Point, Rect};
use crate::mesh::Mesh;
use crate::section::UnravelSection;
use crate::unravel::{resolve_point, PointModifications, UnravelCandidate};

/// An RGB color. `ColorMap` callers resolve a connection name to one of
/// these; components needing no net-specific color use the fixed
/// fallback or their own fixed role color (mutable/immutable).
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLUE: Color = Color(0, 0, 255);
    pub const GREEN: Color = Color(0, 200, 0);
    pub const RED: Color = Color(200, 0, 0);
}

/// Resolves a connection name to a display color. Callers supply their
/// own net-coloring scheme; the default fallback is [`Color::BLUE`].
pub type ColorMap<'a> = dyn Fn(&str) -> Color + 'a;

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VizPoint {
    pub point: Point,
    pub label: Option<String>,
    pub color: Color,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VizLine {
    pub line: LineSeg,
    pub label: Option<String>,
    pub color: Color,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VizRect {
    pub rect: Rect,
    pub label: Option<String>,
    pub color: Color,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VizCircle {
    pub center: Point,
    pub radius: f64,
    pub label: Option<String>,
    pub color: Color,
}

/// A component's debug graphics: points, lines, rects, and circles, each
/// optionally labeled and colored.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualizationData {
    pub points: Vec<VizPoint>,
    pub lines: Vec<VizLine>,
    pub rects: Vec<VizRect>,
    pub circles: Vec<VizCircle>,
}

/// Render the mesh: one rect per finished cell, labeled by its target
/// connection name when it carries one.
#[must_use]
pub fn visualize_mesh(mesh: &Mesh) -> VisualizationData {
    let mut data = VisualizationData::default();
    for &id in mesh.finished() {
        let cell = mesh.cell(id);
        data.rects.push(VizRect {
            rect: *cell.rect(),
            label: cell.target_connection_name().map(str::to_string),
            color: if cell.contains_target() {
                Color::GREEN
            } else {
                Color::BLUE
            },
        });
    }
    data
}

/// Render a section: mutable cells green, immutable cells red, plus one
/// point per segment point, colored by `color_map(connectionName)`.
#[must_use]
pub fn visualize_section(
    section: &UnravelSection,
    mesh: &Mesh,
    color_map: &ColorMap<'_>,
) -> VisualizationData {
    let mut data = VisualizationData::default();

    for &node in section.mutable_node_ids() {
        data.rects.push(VizRect {
            rect: *mesh.cell(node).rect(),
            label: None,
            color: Color::GREEN,
        });
    }
    for &node in section.immutable_node_ids() {
        data.rects.push(VizRect {
            rect: *mesh.cell(node).rect(),
            label: None,
            color: Color::RED,
        });
    }

    for point in section.segment_points() {
        data.points.push(VizPoint {
            point: Point::new(point.x(), point.y()),
            label: Some(point.connection_name().to_string()),
            color: color_map(point.connection_name()),
        });
    }

    data
}

/// Render a candidate: one line per directly-connected segment-point pair
/// in the section, resolved under the candidate's modifications.
#[must_use]
pub fn visualize_candidate(
    section: &UnravelSection,
    candidate: &UnravelCandidate,
    color_map: &ColorMap<'_>,
) -> VisualizationData {
    visualize_modifications(section, candidate.point_modifications(), color_map)
}

fn visualize_modifications(
    section: &UnravelSection,
    modifications: &PointModifications,
    color_map: &ColorMap<'_>,
) -> VisualizationData {
    let mut data = VisualizationData::default();
    let mut seen = std::collections::HashSet::new();

    for node in section.all_node_ids() {
        for &(a, b) in section.segment_pairs_in_node(*node) {
            let key = if a.value() < b.value() { (a, b) } else { (b, a) };
            if !seen.insert(key) {
                continue;
            }
            let (ax, ay, _) = resolve_point(section, modifications, a);
            let (bx, by, _) = resolve_point(section, modifications, b);
            let connection_name = section.segment_point(a).connection_name();
            data.lines.push(VizLine {
                line: LineSeg::new(Point::new(ax, ay), Point::new(bx, by)),
                label: Some(connection_name.to_string()),
                color: color_map(connection_name),
            });
        }
    }

    data
}
