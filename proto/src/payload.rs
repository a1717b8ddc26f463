//! Builders for the kind-specific payload bodies. The replication core
//! carries these opaquely; only the drawing layer and tests interpret them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A point on the board, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Pen settings shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub thickness: i32,
    /// `#rrggbb`
    pub color: String,
}

impl Stroke {
    pub fn new(thickness: i32, color: &str) -> Self { Self { thickness, color: color.to_string() } }
}

impl Default for Stroke {
    fn default() -> Self { Self { thickness: 3, color: "#000000".to_string() } }
}

fn point_json(point: Point) -> Value {
    json!({ "x": point.x, "y": point.y })
}

pub fn line(start: Point, end: Point, stroke: &Stroke) -> Value {
    json!({
        "start": point_json(start),
        "end": point_json(end),
        "thickness": stroke.thickness,
        "color": stroke.color,
    })
}

pub fn polyline(points: &[Point], stroke: &Stroke) -> Value {
    json!({
        "points": points.iter().map(|p| point_json(*p)).collect::<Vec<_>>(),
        "thickness": stroke.thickness,
        "color": stroke.color,
    })
}

pub fn rectangle(start: Point, end: Point, stroke: &Stroke) -> Value {
    json!({
        "start": point_json(start),
        "end": point_json(end),
        "thickness": stroke.thickness,
        "color": stroke.color,
    })
}

pub fn assist_circle(center: Point, radius: f64, stroke: &Stroke) -> Value {
    json!({
        "center": point_json(center),
        "radius": radius,
        "thickness": stroke.thickness,
        "color": stroke.color,
    })
}
