//! Core value types shared by every stage of the grid reconstruction.
//!
//! Lines use the Hough polar form `x·cosθ + y·sinθ = rho`. Geometry is kept
//! in `f64` so the epsilon-nudged intersections and the projective mapping do
//! not lose precision at full image resolution.
use crate::image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of cells along each side of the board.
pub const GRID_CELLS: usize = 9;
/// Number of boundary lines along each axis (`GRID_CELLS + 1`).
pub const GRID_LINES: usize = GRID_CELLS + 1;

/// Infinite line in polar form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub rho: f64,
    /// Angle of the line normal in radians.
    pub theta: f64,
}

impl Line {
    pub const fn new(rho: f64, theta: f64) -> Self {
        Self { rho, theta }
    }
}

/// Image-space coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Bounding box of one cell, spanned by its top-left and bottom-right
/// line intersections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CellRect {
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self {
            left: top_left.x,
            top: top_left.y,
            right: bottom_right.x,
            bottom: bottom_right.y,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }
    pub fn top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
    pub fn bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Board corners in fixed order: top-left, top-right, bottom-right, bottom-left.
pub type Corners = [Point; 4];

/// Row-major 9×9 matrix of cells, `cells[row][col]`, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[CellRect; GRID_CELLS]; GRID_CELLS],
}

impl Grid {
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> CellRect) -> Self {
        Self {
            cells: std::array::from_fn(|row| std::array::from_fn(|col| f(row, col))),
        }
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &CellRect {
        &self.cells[row][col]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRect> + '_ {
        self.cells.iter().flat_map(|row| row.iter())
    }

    /// Outer corners read off the four extreme cells.
    pub fn corners(&self) -> Corners {
        let last = GRID_CELLS - 1;
        [
            self.cells[0][0].top_left(),
            self.cells[0][last].top_right(),
            self.cells[last][last].bottom_right(),
            self.cells[last][0].bottom_left(),
        ]
    }
}

impl Index<usize> for Grid {
    type Output = [CellRect; GRID_CELLS];

    fn index(&self, row: usize) -> &Self::Output {
        &self.cells[row]
    }
}

/// Line axis used when reporting per-axis stage outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Successful detection payload.
///
/// `cells` and `corrected_image` are only populated by full analysis.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDetection {
    pub corners: Corners,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Grid>,
    #[serde(skip)]
    pub corrected_image: Option<RgbaImage>,
}

/// Outcome of one detection call. There is no partial result.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DetectionResult {
    Found(GridDetection),
    NotFound,
}

impl DetectionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, DetectionResult::Found(_))
    }

    pub fn detection(&self) -> Option<&GridDetection> {
        match self {
            DetectionResult::Found(d) => Some(d),
            DetectionResult::NotFound => None,
        }
    }

    pub fn corners(&self) -> Option<&Corners> {
        self.detection().map(|d| &d.corners)
    }

    pub fn cells(&self) -> Option<&Grid> {
        self.detection().and_then(|d| d.cells.as_ref())
    }

    pub fn corrected_image(&self) -> Option<&RgbaImage> {
        self.detection().and_then(|d| d.corrected_image.as_ref())
    }

    pub fn into_detection(self) -> Option<GridDetection> {
        match self {
            DetectionResult::Found(d) => Some(d),
            DetectionResult::NotFound => None,
        }
    }
}
