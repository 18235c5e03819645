//! Geometry primitives and the pointer-space mapper.
//!
//! A rendering surface reports pointer positions in screen pixels, while tiles
//! live in canvas space (the surface's declared viewbox). The surface exposes
//! the matrix taking canvas coordinates to screen coordinates (its "screen
//! CTM"); mapping a pointer into canvas space is the inverse of that matrix
//! applied to the pointer. Hosts that cannot query a native CTM can derive one
//! from the surface layout with [`SurfaceLayout::screen_ctm`].

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::MATRIX_EPSILON;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// 2D affine matrix in SVG/DOM order:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[must_use]
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self { e: tx, f: ty, ..Self::IDENTITY }
    }

    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Clockwise rotation (y axis pointing down) by `degrees`.
    #[must_use]
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Matrix product `self * other`: `other` is applied first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse matrix, or `None` when the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Matrix> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < MATRIX_EPSILON {
            return None;
        }
        Some(Matrix {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Apply the matrix to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// Why a pointer could not be mapped into canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("rendering surface has no screen transform yet")]
    NoTransform,
    #[error("screen transform is not invertible")]
    Singular,
}

/// Map a screen-space pointer position into canvas space.
///
/// `screen_ctm` is the surface's canvas-to-screen matrix, `None` while the
/// surface has not been laid out.
///
/// # Errors
///
/// Returns [`MapError::NoTransform`] when `screen_ctm` is absent and
/// [`MapError::Singular`] when it cannot be inverted (e.g. zero-size surface).
pub fn map_pointer(screen: Point, screen_ctm: Option<&Matrix>) -> Result<Point, MapError> {
    let ctm = screen_ctm.ok_or(MapError::NoTransform)?;
    let inverse = ctm.inverse().ok_or(MapError::Singular)?;
    Ok(inverse.apply(screen))
}

/// How a viewbox is fitted into a surface whose aspect ratio differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectFit {
    /// Uniform scale, centered on both axes (`xMidYMid meet`).
    #[default]
    MidMeet,
    /// Independent horizontal and vertical scale (`none`).
    Stretch,
}

/// The canvas region a surface declares it displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Current layout of a rendering surface on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Screen position of the surface's top-left corner, in CSS pixels.
    pub left: f64,
    pub top: f64,
    /// Rendered size in CSS pixels.
    pub width: f64,
    pub height: f64,
    /// Declared viewbox; `None` means canvas units equal pixels.
    pub view_box: Option<ViewBox>,
    pub fit: AspectFit,
}

impl SurfaceLayout {
    /// Derive the canvas-to-screen matrix for this layout.
    ///
    /// Returns `None` when the surface has no area yet, mirroring a DOM
    /// element that has not been laid out.
    #[must_use]
    pub fn screen_ctm(&self) -> Option<Matrix> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let Some(vb) = self.view_box else {
            return Some(Matrix::translate(self.left, self.top));
        };
        if vb.width <= 0.0 || vb.height <= 0.0 {
            return None;
        }

        let mut sx = self.width / vb.width;
        let mut sy = self.height / vb.height;
        let (mut pad_x, mut pad_y) = (0.0, 0.0);
        if self.fit == AspectFit::MidMeet {
            let s = sx.min(sy);
            pad_x = (self.width - vb.width * s) / 2.0;
            pad_y = (self.height - vb.height * s) / 2.0;
            sx = s;
            sy = s;
        }

        let placed = Matrix::translate(self.left + pad_x, self.top + pad_y);
        let scaled = placed.multiply(&Matrix::scale(sx, sy));
        Some(scaled.multiply(&Matrix::translate(-vb.min_x, -vb.min_y)))
    }
}
