//! Path primitives for vector graphics.
//!
//! A path is a sequence of drawing commands. Drawers append to paths one
//! point at a time, so [`Path`] is mutable in place rather than built once.

use std::fmt::Write as _;

use glam::Vec2;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(Vec2),
    /// Draw a line to a position.
    LineTo(Vec2),
    /// Draw a cubic Bezier curve.
    CurveTo {
        /// First control point
        control1: Vec2,
        /// Second control point
        control2: Vec2,
        /// End point
        to: Vec2,
    },
    /// Draw an elliptical arc.
    ArcTo {
        /// Radii of the ellipse
        radii: Vec2,
        /// Use large arc
        large_arc: bool,
        /// Sweep direction (clockwise if true)
        sweep: bool,
        /// End point
        to: Vec2,
    },
    /// Close the current sub-path by drawing a line to its start.
    Close,
}

impl PathCommand {
    /// End point of the command, if it has one.
    pub fn end_point(&self) -> Option<Vec2> {
        match self {
            PathCommand::MoveTo(to) | PathCommand::LineTo(to) => Some(*to),
            PathCommand::CurveTo { to, .. } | PathCommand::ArcTo { to, .. } => Some(*to),
            PathCommand::Close => None,
        }
    }
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    current: Option<Vec2>,
    subpath_start: Option<Vec2>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
        self.subpath_start = None;
    }

    /// Current pen position, `None` until the first `move_to`.
    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self.current = Some(to);
        self.subpath_start = Some(to);
        self
    }

    /// Draw a line to a position. Without a current point this starts a
    /// sub-path instead.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(to);
        }
        self.commands.push(PathCommand::LineTo(to));
        self.current = Some(to);
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn curve_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(to);
        }
        self.commands.push(PathCommand::CurveTo {
            control1,
            control2,
            to,
        });
        self.current = Some(to);
        self
    }

    /// Draw an arc.
    pub fn arc_to(&mut self, radii: Vec2, large_arc: bool, sweep: bool, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            large_arc,
            sweep,
            to,
        });
        self.current = Some(to);
        self
    }

    /// Close the current sub-path. Does nothing on an empty path.
    pub fn close(&mut self) -> &mut Self {
        if self.current.is_some() {
            self.commands.push(PathCommand::Close);
            self.current = self.subpath_start;
        }
        self
    }

    /// Add a closed rectangle: top-left, top-right, bottom-right, bottom-left.
    pub fn rect(&mut self, position: Vec2, size: Vec2) -> &mut Self {
        self.move_to(position);
        self.line_to(position + Vec2::new(size.x, 0.0));
        self.line_to(position + size);
        self.line_to(position + Vec2::new(0.0, size.y));
        self.close()
    }

    /// Add a closed circle made of two half arcs.
    pub fn circle(&mut self, center: Vec2, radius: f32) -> &mut Self {
        let r = Vec2::splat(radius);
        self.move_to(center + Vec2::new(radius, 0.0));
        self.arc_to(r, false, true, center - Vec2::new(radius, 0.0));
        self.arc_to(r, false, true, center + Vec2::new(radius, 0.0));
        self.close()
    }

    /// End points of every command, in order.
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().filter_map(PathCommand::end_point)
    }

    /// Number of sub-paths (each starts with a `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Get the bounding box of the path.
    ///
    /// Returns (min, max) corners. Control points are included for curves;
    /// arcs use the box around their chord midpoint.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut current = Vec2::ZERO;

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    min = min.min(*to);
                    max = max.max(*to);
                }
                PathCommand::CurveTo {
                    control1,
                    control2,
                    to,
                } => {
                    min = min.min(*control1).min(*control2).min(*to);
                    max = max.max(*control1).max(*control2).max(*to);
                }
                PathCommand::ArcTo { to, radii, .. } => {
                    let mid = (current + *to) * 0.5;
                    min = min.min(*to).min(mid - *radii);
                    max = max.max(*to).max(mid + *radii);
                }
                PathCommand::Close => {}
            }
            if let Some(end) = cmd.end_point() {
                current = end;
            }
        }

        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Serialize as SVG path data.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(out, "M{} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L{} {}", p.x, p.y),
                PathCommand::CurveTo {
                    control1: a,
                    control2: b,
                    to,
                } => write!(out, "C{} {} {} {} {} {}", a.x, a.y, b.x, b.y, to.x, to.y),
                PathCommand::ArcTo {
                    radii,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A{} {} 0 {} {} {} {}",
                    radii.x, radii.y, *large_arc as u8, *sweep as u8, to.x, to.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_line() {
        let mut path = Path::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(100.0, 0.0))
            .line_to(Vec2::new(100.0, 100.0))
            .close();

        assert_eq!(path.len(), 4);
        assert_eq!(path.current_point(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_line_without_move_starts_subpath() {
        let mut path = Path::new();
        path.line_to(Vec2::new(3.0, 4.0));
        assert_eq!(path.commands(), &[PathCommand::MoveTo(Vec2::new(3.0, 4.0))]);
    }

    #[test]
    fn test_close_on_empty_is_noop() {
        let mut path = Path::new();
        path.close();
        assert!(path.is_empty());
    }

    #[test]
    fn test_path_bounds() {
        let mut path = Path::new();
        path.move_to(Vec2::new(10.0, 20.0))
            .line_to(Vec2::new(100.0, 50.0))
            .line_to(Vec2::new(50.0, 100.0));

        let (min, max) = path.bounds().unwrap();
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(100.0, 100.0));
        assert_eq!(Path::new().bounds(), None);
    }

    #[test]
    fn test_rect_path() {
        let mut path = Path::new();
        path.rect(Vec2::new(0.0, 40.0), Vec2::new(10.0, 60.0));

        let points: Vec<_> = path.vertices().collect();
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, 40.0),
                Vec2::new(10.0, 40.0),
                Vec2::new(10.0, 100.0),
                Vec2::new(0.0, 100.0),
            ]
        );
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
    }

    #[test]
    fn test_circle_bounds() {
        let mut path = Path::new();
        path.circle(Vec2::new(50.0, 50.0), 25.0);
        let (min, max) = path.bounds().unwrap();
        assert_eq!(min, Vec2::new(25.0, 25.0));
        assert_eq!(max, Vec2::new(75.0, 75.0));
    }

    #[test]
    fn test_subpaths_and_clear() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).line_to(Vec2::ONE);
        path.move_to(Vec2::new(5.0, 5.0)).line_to(Vec2::new(6.0, 6.0));
        assert_eq!(path.subpath_count(), 2);
        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.current_point(), None);
    }

    #[test]
    fn test_svg_data() {
        let mut path = Path::new();
        path.move_to(Vec2::new(0.0, 1.0)).line_to(Vec2::new(2.0, 3.0)).close();
        assert_eq!(path.to_svg_data(), "M0 1 L2 3 Z");
    }
}
