// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use understory_timing::Easing;

/// Distance from the eye to the projection plane, in pixels.
pub const CAMERA_DISTANCE: f64 = 576.0;

/// Whether a flip fades the element out or in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fade {
    /// Alpha runs `1 - t`.
    Out,
    /// Alpha runs `t`.
    In,
}

/// Parameters of one flip animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipSpec {
    /// Length of the animation.
    pub duration_ms: u64,
    /// Curve applied to angle and depth.
    pub easing: Easing,
    /// Rotation about the vertical axis at the start, in degrees.
    pub from_degrees: f64,
    /// Rotation at the end, in degrees.
    pub to_degrees: f64,
    /// Distance pushed away from the viewer at the start.
    pub from_depth: f64,
    /// Distance at the end.
    pub to_depth: f64,
    /// Alpha direction.
    pub fade: Fade,
}

impl FlipSpec {
    /// Turning a page away: 400ms, overshoot curve, 0° to -45°.
    pub const OUT: Self = Self {
        duration_ms: 400,
        easing: Easing::Overshoot { tension: 1.0 },
        from_degrees: 0.0,
        to_degrees: -45.0,
        from_depth: 0.0,
        to_depth: -100.0,
        fade: Fade::Out,
    };

    /// Turning a page back in: 500ms, ease-out quadratic, 45° to 0°.
    pub const IN: Self = Self {
        duration_ms: 500,
        easing: Easing::EaseOutQuad,
        from_degrees: 45.0,
        to_degrees: 0.0,
        from_depth: 100.0,
        to_depth: 0.0,
        fade: Fade::In,
    };

    /// Frame at linear progress `t`, clamped to `[0, 1]`.
    ///
    /// Angle and depth follow the eased progress; alpha follows `t` itself.
    #[must_use]
    pub fn frame(&self, t: f64) -> FlipFrame {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let e = self.easing.apply(t);
        FlipFrame {
            angle_degrees: self.from_degrees + (self.to_degrees - self.from_degrees) * e,
            depth: self.from_depth + (self.to_depth - self.from_depth) * e,
            alpha: match self.fade {
                Fade::Out => 1.0 - t,
                Fade::In => t,
            },
        }
    }
}

/// Pose of a flipping element at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipFrame {
    /// Rotation about the vertical axis through the pivot, in degrees.
    pub angle_degrees: f64,
    /// Translation along the view axis; positive is away from the viewer.
    pub depth: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl FlipFrame {
    /// The untransformed, opaque pose.
    pub const IDENTITY: Self = Self {
        angle_degrees: 0.0,
        depth: 0.0,
        alpha: 1.0,
    };

    /// Projects `point` through this pose, rotating about a vertical axis
    /// through `pivot`.
    ///
    /// Points are pushed to `depth`, rotated, then projected through a camera
    /// [`CAMERA_DISTANCE`] in front of the plane. Points that would land
    /// behind the camera are pinned just in front of it.
    #[must_use]
    pub fn project(&self, point: Point, pivot: Point) -> Point {
        let (sin, cos) = libm::sincos(self.angle_degrees.to_radians());
        let x = point.x - pivot.x;
        let y = point.y - pivot.y;
        let z = self.depth + x * sin;
        let scale = CAMERA_DISTANCE / (CAMERA_DISTANCE + z).max(1.0);
        Point::new(pivot.x + x * cos * scale, pivot.y + y * scale)
    }

    /// Projects the corners of `rect`, clockwise from the top left.
    #[must_use]
    pub fn project_rect(&self, rect: Rect, pivot: Point) -> [Point; 4] {
        [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]
        .map(|p| self.project(p, pivot))
    }
}

impl Default for FlipFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{FlipFrame, FlipSpec};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn flip_out_endpoints() {
        let start = FlipSpec::OUT.frame(0.0);
        assert_eq!(start, FlipFrame::IDENTITY);
        let end = FlipSpec::OUT.frame(1.0);
        assert_eq!(end.angle_degrees, -45.0);
        assert_eq!(end.depth, -100.0);
        assert_eq!(end.alpha, 0.0);
    }

    #[test]
    fn flip_out_pulls_back_before_turning() {
        // Overshoot with T = 1 is 2t⁴ - t³, negative below t = 0.5.
        let early = FlipSpec::OUT.frame(0.25);
        assert!(early.angle_degrees > 0.0);
        assert_eq!(early.alpha, 0.75);
    }

    #[test]
    fn flip_in_endpoints() {
        let start = FlipSpec::IN.frame(0.0);
        assert_eq!(start.angle_degrees, 45.0);
        assert_eq!(start.depth, 100.0);
        assert_eq!(start.alpha, 0.0);
        assert_eq!(FlipSpec::IN.frame(1.0), FlipFrame::IDENTITY);
        let mid = FlipSpec::IN.frame(0.5);
        assert!(close(mid.angle_degrees, 45.0 * 0.25));
        assert_eq!(mid.alpha, 0.5);
    }

    #[test]
    fn identity_projection_is_a_no_op() {
        let pivot = Point::new(-80.0, 240.0);
        let p = Point::new(123.0, 45.0);
        let q = FlipFrame::IDENTITY.project(p, pivot);
        assert!(close(p.x, q.x) && close(p.y, q.y));
    }

    #[test]
    fn pivot_stays_put() {
        let pivot = Point::new(-80.0, 240.0);
        let frame = FlipSpec::OUT.frame(0.6);
        let q = frame.project(pivot, pivot);
        let scale = 576.0 / (576.0 + frame.depth);
        assert!(close(q.x, pivot.x));
        assert!(close(q.y, pivot.y));
        // Off-pivot points on the axis only scale with depth.
        let r = frame.project(Point::new(pivot.x, pivot.y + 100.0), pivot);
        assert!(close(r.y - pivot.y, 100.0 * scale));
    }

    #[test]
    fn turned_page_narrows() {
        let pivot = Point::new(0.0, 0.0);
        let frame = FlipFrame {
            angle_degrees: 45.0,
            depth: 0.0,
            alpha: 1.0,
        };
        let quad = frame.project_rect(Rect::new(0.0, -50.0, 200.0, 50.0), pivot);
        assert!(quad[1].x < 200.0);
        // The far edge recedes, so it is shorter than the near edge.
        assert!(quad[2].y - quad[1].y < quad[3].y - quad[0].y);
    }
}
