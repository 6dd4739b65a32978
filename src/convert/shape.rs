//! Rasterization of item footprints.
//!
//! The source schema describes an item's board footprint as a list of
//! axis-aligned boxes, each a centre point plus a full width and height.
//! The target schema wants a text raster: rows of `X` (occupied) and `-`
//! (empty) over the bounding box of all boxes, one character per unit cell,
//! row 0 at the top.
//!
//! Coordinates are quarter-unit in practice but arrive as arbitrary decimal
//! text, so all geometry runs on [`Decimal`] rather than floats. A cell is
//! occupied when its centre lies inside any box, boundary included.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{FdError, Result};

/// A point or extent in footprint space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: Decimal,
    pub y: Decimal,
}

/// One axis-aligned box of a footprint: full `size`, centred at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub offset: Point,
    pub size: Point,
}

/// Closed bounds of a box, or of a union of boxes.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: Point,
    max: Point,
}

impl Rect {
    /// Closed bounds of the box, or `None` when they leave [`Decimal`] range.
    fn extent(&self) -> Option<Extent> {
        let half_x = self.size.x / Decimal::TWO;
        let half_y = self.size.y / Decimal::TWO;
        Some(Extent {
            min: Point {
                x: self.offset.x.checked_sub(half_x)?,
                y: self.offset.y.checked_sub(half_y)?,
            },
            max: Point {
                x: self.offset.x.checked_add(half_x)?,
                y: self.offset.y.checked_add(half_y)?,
            },
        })
    }
}

impl Extent {
    fn contains(&self, x: Decimal, y: Decimal) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    fn union(self, other: Extent) -> Extent {
        Extent {
            min: Point {
                x: self.min.x.min(other.min.x),
                y: self.min.y.min(other.min.y),
            },
            max: Point {
                x: self.max.x.max(other.max.x),
                y: self.max.y.max(other.max.y),
            },
        }
    }
}

/// Parse the source `ItemShape` array into boxes.
pub(crate) fn parse_rects(value: &Value, file: &Path) -> Result<Vec<Rect>> {
    let Value::Array(items) = value else {
        return Err(FdError::input(file, "`ItemShape` must be an array of boxes"));
    };
    items.iter().map(|item| parse_rect(item, file)).collect()
}

fn parse_rect(value: &Value, file: &Path) -> Result<Rect> {
    let Value::Object(entries) = value else {
        return Err(FdError::input(file, "shape box must be an object"));
    };
    let rect = Rect {
        offset: parse_point(entries, "Offset", file)?,
        size: parse_point(entries, "Size", file)?,
    };
    if rect.extent().is_none() {
        return Err(FdError::input(
            file,
            "shape box coordinates are out of range",
        ));
    }
    Ok(rect)
}

fn parse_point(entries: &Map<String, Value>, field: &str, file: &Path) -> Result<Point> {
    let Some(Value::Object(point)) = entries.get(field) else {
        return Err(FdError::input(
            file,
            format!("shape box is missing `{field}`"),
        ));
    };
    Ok(Point {
        x: parse_coord(point, field, "x", file)?,
        y: parse_coord(point, field, "y", file)?,
    })
}

/// Parse one coordinate exactly. Numbers go through their shortest decimal
/// rendering, so a source `0.25` is the decimal 0.25 and not a float
/// approximation of it.
fn parse_coord(point: &Map<String, Value>, field: &str, axis: &str, file: &Path) -> Result<Decimal> {
    let value = point.get(axis).ok_or_else(|| {
        FdError::input(file, format!("shape `{field}` is missing `{axis}`"))
    })?;
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        other => {
            return Err(FdError::Parse {
                path: file.to_path_buf(),
                message: format!("shape `{field}.{axis}` is not a number: {other}"),
            })
        }
    };
    Decimal::from_str(&text).map_err(|_| FdError::Parse {
        path: file.to_path_buf(),
        message: format!("shape `{field}.{axis}` is not a number: {text:?}"),
    })
}

/// Rasterize boxes to text rows, top row first.
///
/// The grid is the bounding box of all boxes, scanned in unit steps from
/// the minimum corner. Each cell samples its centre (corner plus one half)
/// against every box. An empty or zero-area footprint yields no rows.
pub fn rasterize(rects: &[Rect]) -> Vec<String> {
    let extents: Vec<Extent> = rects.iter().filter_map(Rect::extent).collect();
    let Some(bounds) = union_all(&extents) else {
        return Vec::new();
    };

    let half = Decimal::new(5, 1);
    let mut rows = Vec::new();
    let mut y = bounds.min.y;
    while y < bounds.max.y {
        let mut row = String::new();
        let mut x = bounds.min.x;
        while x < bounds.max.x {
            let occupied = extents.iter().any(|e| e.contains(x + half, y + half));
            row.push(if occupied { 'X' } else { '-' });
            x += Decimal::ONE;
        }
        rows.push(row);
        y += Decimal::ONE;
    }

    // Scanning runs bottom-up in footprint space; the schema wants the top
    // row first.
    rows.reverse();
    rows
}

fn union_all(extents: &[Extent]) -> Option<Extent> {
    let mut iter = extents.iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |bounds, extent| bounds.union(*extent)))
}
