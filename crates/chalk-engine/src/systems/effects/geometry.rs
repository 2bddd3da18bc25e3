//! Triangle strip mesh generation for confetti ribbons.

/// Generate triangle strip vertices from a polyline.
/// Output: Vec of [x, y, r, g, b, a] floats (6 per vertex), matching the
/// ink vertex format so effects and ink share one shader.
pub fn build_strip_vertices(points: &[[f32; 2]], width: f32, color: [f32; 4]) -> Vec<f32> {
    if points.len() < 2 {
        return Vec::new();
    }

    let n = points.len();
    let mut verts = Vec::with_capacity((n + 1) * 2 * 6);

    let dir = |a: [f32; 2], b: [f32; 2]| -> [f32; 2] {
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        let len = (dx * dx + dy * dy).sqrt().max(0.001);
        // Perpendicular of the normalized direction.
        [-dy / len, dx / len]
    };

    let push_pair = |verts: &mut Vec<f32>, center: [f32; 2], perp: [f32; 2], w: f32| {
        verts.extend_from_slice(&[
            center[0] + perp[0] * w,
            center[1] + perp[1] * w,
            color[0],
            color[1],
            color[2],
            color[3],
        ]);
        verts.extend_from_slice(&[
            center[0] - perp[0] * w,
            center[1] - perp[1] * w,
            color[0],
            color[1],
            color[2],
            color[3],
        ]);
    };

    // First point uses the first segment's perpendicular.
    let p0 = dir(points[0], points[1]);
    push_pair(&mut verts, points[0], p0, width);

    // Middle points average adjacent segment perpendiculars.
    for i in 1..n - 1 {
        let p_prev = dir(points[i - 1], points[i]);
        let p_next = dir(points[i], points[i + 1]);
        let avg = [p_prev[0] + p_next[0], p_prev[1] + p_next[1]];
        let avg_len = (avg[0] * avg[0] + avg[1] * avg[1]).sqrt().max(0.001);
        push_pair(
            &mut verts,
            points[i],
            [avg[0] / avg_len, avg[1] / avg_len],
            width,
        );
    }

    // Last point uses the last segment's perpendicular.
    let p_last = dir(points[n - 2], points[n - 1]);
    push_pair(&mut verts, points[n - 1], p_last, width);

    verts
}

/// Convert a triangle strip into a triangle list (3 vertices per triangle).
/// Input and output are flat [x, y, r, g, b, a] float runs.
pub fn strip_to_triangles(strip: &[f32]) -> Vec<f32> {
    const F: usize = 6;
    let vert_count = strip.len() / F;
    if vert_count < 3 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity((vert_count - 2) * 3 * F);
    for i in 0..vert_count - 2 {
        // Alternate winding like GPU strip expansion.
        let (a, b, c) = if i % 2 == 0 {
            (i, i + 1, i + 2)
        } else {
            (i + 1, i, i + 2)
        };
        for idx in [a, b, c] {
            out.extend_from_slice(&strip[idx * F..(idx + 1) * F]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_has_two_vertices_per_point() {
        let verts = build_strip_vertices(
            &[[0.0, 0.0], [10.0, 0.0], [20.0, 0.0]],
            2.0,
            [1.0, 0.0, 0.0, 1.0],
        );
        assert_eq!(verts.len(), 3 * 2 * 6);
    }

    #[test]
    fn single_point_produces_nothing() {
        assert!(build_strip_vertices(&[[0.0, 0.0]], 2.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn strip_to_triangles_expands() {
        let strip = build_strip_vertices(&[[0.0, 0.0], [10.0, 0.0]], 2.0, [1.0; 4]);
        // 4 strip vertices -> 2 triangles -> 6 vertices.
        let tris = strip_to_triangles(&strip);
        assert_eq!(tris.len(), 6 * 6);
    }
}
