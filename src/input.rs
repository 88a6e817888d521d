//! The board input model, `SimpleRouteJson`. Parsing the wire format is
//! in scope (via the optional `json` feature); interpreting a DSN/KiCad
//! file into this shape is not.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::geometry::{point_in_rect, LayerMap, Point, Rect};
use std::collections::HashSet;

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    #[cfg_attr(feature = "serialize", serde(rename = "minX"))]
    pub min_x: f64,
    #[cfg_attr(feature = "serialize", serde(rename = "maxX"))]
    pub max_x: f64,
    #[cfg_attr(feature = "serialize", serde(rename = "minY"))]
    pub min_y: f64,
    #[cfg_attr(feature = "serialize", serde(rename = "maxY"))]
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn as_rect(&self) -> Rect {
        Rect::from_corners(
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.max_y),
        )
    }
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterPoint {
    pub x: f64,
    pub y: f64,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub center: CenterPoint,
    pub width: f64,
    pub height: f64,
    #[cfg_attr(feature = "serialize", serde(rename = "type"))]
    pub kind: String,
    pub layers: Vec<String>,
    #[cfg_attr(feature = "serialize", serde(rename = "connectedTo"))]
    pub connected_to: Vec<String>,
}

impl Obstacle {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(Point::new(self.center.x, self.center.y), self.width, self.height)
    }
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    pub x: f64,
    pub y: f64,
    pub layer: u32,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub name: String,
    #[cfg_attr(feature = "serialize", serde(rename = "pointsToConnect"))]
    pub points_to_connect: Vec<ConnectionPoint>,
}

#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleRouteJson {
    pub bounds: Bounds,
    #[cfg_attr(feature = "serialize", serde(rename = "layerCount"))]
    pub layer_count: u32,
    #[cfg_attr(feature = "serialize", serde(rename = "minTraceWidth"))]
    pub min_trace_width: f64,
    pub obstacles: Vec<Obstacle>,
    pub connections: Vec<Connection>,
}

impl SimpleRouteJson {
    /// Validate this board up front: malformed input is rejected before
    /// the Mesh Builder runs, rather than handled defensively deep
    /// inside it.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.layer_count != 2 {
            return Err(RouteError::UnsupportedLayerCount(self.layer_count));
        }

        let bounds_rect = self.bounds.as_rect();
        if self.bounds.min_x >= self.bounds.max_x || self.bounds.min_y >= self.bounds.max_y {
            return Err(RouteError::DegenerateBounds {
                min_x: self.bounds.min_x,
                max_x: self.bounds.max_x,
                min_y: self.bounds.min_y,
                max_y: self.bounds.max_y,
            });
        }

        let known_layers: HashSet<&str> = ["top", "bottom"].into_iter().collect();
        for obstacle in &self.obstacles {
            for layer in &obstacle.layers {
                if !known_layers.contains(layer.as_str()) {
                    return Err(RouteError::UnknownLayer(layer.clone()));
                }
            }
        }

        for connection in &self.connections {
            if connection.points_to_connect.len() < 2 {
                return Err(RouteError::TooFewConnectionPoints(connection.name.clone()));
            }
            for point in &connection.points_to_connect {
                if !point_in_rect(Point::new(point.x, point.y), &bounds_rect) {
                    return Err(RouteError::PointOutOfBounds {
                        connection: connection.name.clone(),
                        x: point.x,
                        y: point.y,
                    });
                }
            }
        }

        Ok(())
    }

    /// The two-layer map implied by this board. The layer names `"top"`
    /// and `"bottom"` correspond to `z = 0` (top) and `z = 1` (bottom).
    #[must_use]
    pub fn layer_map(&self) -> LayerMap {
        LayerMap::new(["top".to_string(), "bottom".to_string()])
    }
}

#[cfg(feature = "json")]
impl SimpleRouteJson {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
