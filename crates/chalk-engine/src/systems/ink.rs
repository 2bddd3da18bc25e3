//! Lyon-based ink/guide tessellation.
//!
//! Provides CPU-side tessellation of the shapes the games draw every frame —
//! guide polylines, drawn ink strokes, coverage dots, feedback borders,
//! coloring-grid cells — producing a flat vertex buffer that the TypeScript
//! shell renders via WebGPU.
//!
//! # Usage
//!
//! ```ignore
//! // In your Game::update():
//! ctx.ink.stroke_polyline(&guide_points, 16.0, InkColor::rgb8(0xA2, 0x9B, 0xFE));
//! ctx.ink.fill_circle(dot, 3.0, InkColor::rgb8(0x4C, 0xAF, 0x50));
//! ctx.ink.stroke_rect(center, size, 6.0, InkColor::RED);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Per-vertex data for ink rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct InkVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// RGBA color for ink drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkColor {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Named color constants
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Self = Self::rgb(0.88, 0.88, 0.88);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for InkColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: InkColor,
}

impl FillVertexConstructor<InkVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> InkVertex {
        InkVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: InkColor,
}

impl StrokeVertexConstructor<InkVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> InkVertex {
        InkVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// State for ink rendering.
///
/// Holds lyon tessellators and the output vertex buffer.
/// Cleared each frame and repopulated by drawing commands.
pub struct InkState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<InkVertex, u32>,
    buffer: Vec<f32>,
}

impl InkState {
    /// Create a new InkState.
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * InkVertex::FLOATS),
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / InkVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// The flat float buffer (x, y, r, g, b, a per vertex).
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate a stroked polyline (open path) with round caps and joins —
    /// the shape of a drawn finger stroke.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: InkColor) {
        if points.len() < 2 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false); // open path

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Tessellate and fill a circle (coverage dots, apples, drum pad).
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: InkColor) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill an axis-aligned rectangle centered on `center`
    /// (coloring-grid cells, panel fills).
    pub fn fill_rect(&mut self, center: Vec2, size: Vec2, color: InkColor) {
        let half = size * 0.5;
        let points = [
            Vec2::new(center.x - half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y + half.y),
            Vec2::new(center.x - half.x, center.y + half.y),
        ];
        self.fill_polygon(&points, color);
    }

    /// Tessellate a stroked rectangle outline centered on `center`
    /// (the transient "try again" border).
    pub fn stroke_rect(&mut self, center: Vec2, size: Vec2, width: f32, color: InkColor) {
        let half = size * 0.5;
        let points = [
            Vec2::new(center.x - half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y + half.y),
            Vec2::new(center.x - half.x, center.y + half.y),
        ];

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Tessellate and fill a polygon.
    ///
    /// The polygon is closed automatically. Supports convex and concave shapes.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: InkColor) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill an arbitrary lyon Path.
    pub fn fill_path(&mut self, path: &Path, color: InkColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: InkColor) {
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(lyon::tessellation::LineCap::Round)
            .with_line_join(lyon::tessellation::LineJoin::Round);

        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for InkState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_vertex_is_6_floats() {
        assert_eq!(std::mem::size_of::<InkVertex>(), 24);
        assert_eq!(InkVertex::FLOATS, 6);
    }

    #[test]
    fn stroke_polyline_produces_triangles() {
        let mut ink = InkState::new();
        ink.stroke_polyline(
            &[Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)],
            6.0,
            InkColor::BLUE,
        );
        let count = ink.vertex_count();
        assert!(count >= 3, "expected triangles, got {count} vertices");
        assert_eq!(count % 3, 0, "triangle list must be a multiple of 3");
    }

    #[test]
    fn degenerate_inputs_are_ignored() {
        let mut ink = InkState::new();
        ink.stroke_polyline(&[Vec2::ZERO], 6.0, InkColor::RED);
        ink.fill_circle(Vec2::ZERO, 0.0, InkColor::RED);
        ink.fill_polygon(&[Vec2::ZERO, Vec2::ONE], InkColor::RED);
        assert_eq!(ink.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut ink = InkState::new();
        ink.fill_circle(Vec2::new(10.0, 10.0), 5.0, InkColor::GREEN);
        assert!(ink.vertex_count() > 0);
        ink.clear();
        assert_eq!(ink.vertex_count(), 0);
    }

    #[test]
    fn vertices_carry_color() {
        let mut ink = InkState::new();
        ink.fill_rect(Vec2::ZERO, Vec2::splat(10.0), InkColor::rgb8(255, 0, 0));
        assert!(ink.vertex_count() > 0);
        let first = &ink.buffer()[..InkVertex::FLOATS];
        assert!((first[2] - 1.0).abs() < 1e-6);
        assert!(first[3].abs() < 1e-6);
    }
}
