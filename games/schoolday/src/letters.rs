//! Letter tracing templates for A-J.
//!
//! Each letter has multiple strokes; each stroke is a dense polyline of
//! points in normalized [0,1]² coordinates, sampled evenly so coverage
//! checking sees tens of points per segment. Templates are built once and
//! shared read-only across tracing sessions.

use chalk_engine::Rng;
use glam::Vec2;

/// One ideal stroke of a letter — an ordered, densely sampled polyline.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub points: Vec<Vec2>,
}

/// A traceable letter: ordered strokes of normalized points.
#[derive(Debug, Clone)]
pub struct LetterTemplate {
    pub letter: char,
    pub strokes: Vec<Stroke>,
}

impl LetterTemplate {
    /// Total number of template points across all strokes.
    pub fn total_points(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }
}

/// Evenly spaced points along a straight segment, endpoints included.
pub fn line_points(x1: f32, y1: f32, x2: f32, y2: f32, num_points: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(num_points);
    for i in 0..num_points {
        let t = if num_points > 1 {
            i as f32 / (num_points - 1) as f32
        } else {
            0.0
        };
        points.push(Vec2::new(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t));
    }
    points
}

fn stroke(points: Vec<Vec2>) -> Stroke {
    Stroke { points }
}

/// Concatenate polyline segments into one stroke (for curved letters).
fn joined(segments: &[Vec<Vec2>]) -> Stroke {
    let mut points = Vec::new();
    for seg in segments {
        points.extend_from_slice(seg);
    }
    Stroke { points }
}

/// The traceable letter set.
pub struct LetterBank {
    templates: Vec<LetterTemplate>,
}

impl LetterBank {
    /// Uppercase A-J, matching the classroom worksheet stroke order.
    pub fn standard() -> Self {
        let templates = vec![
            // A: left diagonal, right diagonal, horizontal bar
            LetterTemplate {
                letter: 'A',
                strokes: vec![
                    stroke(line_points(0.5, 0.1, 0.1, 0.9, 100)),
                    stroke(line_points(0.5, 0.1, 0.9, 0.9, 100)),
                    stroke(line_points(0.25, 0.6, 0.75, 0.6, 80)),
                ],
            },
            // B: vertical line, top bump, bottom bump
            LetterTemplate {
                letter: 'B',
                strokes: vec![
                    stroke(line_points(0.2, 0.1, 0.2, 0.9, 100)),
                    joined(&[
                        line_points(0.2, 0.1, 0.6, 0.1, 30),
                        line_points(0.6, 0.1, 0.7, 0.3, 25),
                        line_points(0.7, 0.3, 0.6, 0.5, 25),
                        line_points(0.6, 0.5, 0.2, 0.5, 30),
                    ]),
                    joined(&[
                        line_points(0.2, 0.5, 0.7, 0.5, 30),
                        line_points(0.7, 0.5, 0.8, 0.7, 25),
                        line_points(0.8, 0.7, 0.7, 0.9, 25),
                        line_points(0.7, 0.9, 0.2, 0.9, 30),
                    ]),
                ],
            },
            // C: single arc
            LetterTemplate {
                letter: 'C',
                strokes: vec![joined(&[
                    line_points(0.8, 0.2, 0.6, 0.1, 25),
                    line_points(0.6, 0.1, 0.3, 0.1, 35),
                    line_points(0.3, 0.1, 0.15, 0.25, 30),
                    line_points(0.15, 0.25, 0.15, 0.75, 50),
                    line_points(0.15, 0.75, 0.3, 0.9, 30),
                    line_points(0.3, 0.9, 0.6, 0.9, 35),
                    line_points(0.6, 0.9, 0.8, 0.8, 25),
                ])],
            },
            // D: vertical line, curved right side
            LetterTemplate {
                letter: 'D',
                strokes: vec![
                    stroke(line_points(0.2, 0.1, 0.2, 0.9, 100)),
                    joined(&[
                        line_points(0.2, 0.1, 0.5, 0.1, 35),
                        line_points(0.5, 0.1, 0.7, 0.2, 30),
                        line_points(0.7, 0.2, 0.8, 0.5, 35),
                        line_points(0.8, 0.5, 0.7, 0.8, 35),
                        line_points(0.7, 0.8, 0.5, 0.9, 30),
                        line_points(0.5, 0.9, 0.2, 0.9, 35),
                    ]),
                ],
            },
            // E: vertical, top/middle/bottom horizontals
            LetterTemplate {
                letter: 'E',
                strokes: vec![
                    stroke(line_points(0.2, 0.1, 0.2, 0.9, 100)),
                    stroke(line_points(0.2, 0.1, 0.8, 0.1, 80)),
                    stroke(line_points(0.2, 0.5, 0.7, 0.5, 70)),
                    stroke(line_points(0.2, 0.9, 0.8, 0.9, 80)),
                ],
            },
            // F: vertical, top and middle horizontals
            LetterTemplate {
                letter: 'F',
                strokes: vec![
                    stroke(line_points(0.2, 0.1, 0.2, 0.9, 100)),
                    stroke(line_points(0.2, 0.1, 0.8, 0.1, 80)),
                    stroke(line_points(0.2, 0.5, 0.7, 0.5, 70)),
                ],
            },
            // G: C-shape, then bar hooking inward
            LetterTemplate {
                letter: 'G',
                strokes: vec![
                    joined(&[
                        line_points(0.8, 0.2, 0.6, 0.1, 25),
                        line_points(0.6, 0.1, 0.3, 0.1, 35),
                        line_points(0.3, 0.1, 0.15, 0.25, 30),
                        line_points(0.15, 0.25, 0.15, 0.75, 50),
                        line_points(0.15, 0.75, 0.3, 0.9, 30),
                        line_points(0.3, 0.9, 0.6, 0.9, 35),
                        line_points(0.6, 0.9, 0.8, 0.75, 30),
                    ]),
                    joined(&[
                        line_points(0.8, 0.75, 0.8, 0.5, 40),
                        line_points(0.8, 0.5, 0.5, 0.5, 40),
                    ]),
                ],
            },
            // H: two verticals and a bar
            LetterTemplate {
                letter: 'H',
                strokes: vec![
                    stroke(line_points(0.2, 0.1, 0.2, 0.9, 100)),
                    stroke(line_points(0.8, 0.1, 0.8, 0.9, 100)),
                    stroke(line_points(0.2, 0.5, 0.8, 0.5, 80)),
                ],
            },
            // I: top bar, vertical, bottom bar
            LetterTemplate {
                letter: 'I',
                strokes: vec![
                    stroke(line_points(0.3, 0.1, 0.7, 0.1, 60)),
                    stroke(line_points(0.5, 0.1, 0.5, 0.9, 100)),
                    stroke(line_points(0.3, 0.9, 0.7, 0.9, 60)),
                ],
            },
            // J: top bar, curved descender
            LetterTemplate {
                letter: 'J',
                strokes: vec![
                    stroke(line_points(0.3, 0.1, 0.7, 0.1, 60)),
                    joined(&[
                        line_points(0.6, 0.1, 0.6, 0.7, 70),
                        line_points(0.6, 0.7, 0.5, 0.85, 25),
                        line_points(0.5, 0.85, 0.3, 0.85, 30),
                        line_points(0.3, 0.85, 0.2, 0.75, 20),
                    ]),
                ],
            },
        ];
        Self { templates }
    }

    /// Number of letters in the bank.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up a letter's template.
    pub fn get(&self, letter: char) -> Option<&LetterTemplate> {
        self.templates.iter().find(|t| t.letter == letter)
    }

    /// All templates in worksheet order.
    pub fn iter(&self) -> impl Iterator<Item = &LetterTemplate> {
        self.templates.iter()
    }

    /// Draw `count` letters in shuffled order for one game (clones — the
    /// bank itself stays untouched). Caps at the bank size.
    pub fn shuffled_draw(&self, count: usize, rng: &mut Rng) -> Vec<LetterTemplate> {
        let mut order: Vec<usize> = (0..self.templates.len()).collect();
        rng.shuffle(&mut order);
        order
            .into_iter()
            .take(count.min(self.templates.len()))
            .map(|i| self.templates[i].clone())
            .collect()
    }
}
