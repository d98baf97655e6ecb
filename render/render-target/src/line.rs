use crate::DrawScreen;

/// Cohen-Sutherland region code, which sides of the screen a point is past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutCode(u8);

impl OutCode {
    pub const INSIDE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const BOTTOM: Self = Self(4);
    pub const TOP: Self = Self(8);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_inside(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for OutCode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for OutCode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::ops::BitOrAssign for OutCode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Float error or NaN can leave a clipped point just outside, give up after
/// this many passes
const MAX_CLIP_PASSES: usize = 8;

impl DrawScreen {
    pub fn compute_outcode(&self, x: f32, y: f32) -> OutCode {
        let mut code = OutCode::INSIDE;
        if x < 0.0 {
            code |= OutCode::LEFT;
        } else if x > self.width() as f32 {
            code |= OutCode::RIGHT;
        }
        if y < 0.0 {
            code |= OutCode::BOTTOM;
        } else if y > self.height() as f32 {
            code |= OutCode::TOP;
        }
        code
    }

    /// Clip the segment to the screen and draw what remains with Bresenham
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, colour: u8) {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        if let Some((x1, y1, x2, y2)) = self.clip_line(x1, y1, x2, y2) {
            let max_x = self.width() as i32 - 1;
            let max_y = self.height() as i32 - 1;
            self.bresenham(
                (x1 as i32).clamp(0, max_x),
                (y1 as i32).clamp(0, max_y),
                (x2 as i32).clamp(0, max_x),
                (y2 as i32).clamp(0, max_y),
                colour,
            );
        }
    }

    /// The part of the segment inside `[0, width] x [0, height]`, or `None`
    /// when it misses the screen
    pub fn clip_line(
        &self,
        mut x1: f32,
        mut y1: f32,
        mut x2: f32,
        mut y2: f32,
    ) -> Option<(f32, f32, f32, f32)> {
        let width = self.width() as f32;
        let height = self.height() as f32;
        let mut code1 = self.compute_outcode(x1, y1);
        let mut code2 = self.compute_outcode(x2, y2);

        for _ in 0..MAX_CLIP_PASSES {
            if (code1 | code2).is_inside() {
                return Some((x1, y1, x2, y2));
            }
            if !(code1 & code2).is_inside() {
                return None;
            }

            let out = code1.max(code2);
            let (x, y) = if out.contains(OutCode::TOP) {
                (x1 + (x2 - x1) * (height - y1) / (y2 - y1), height)
            } else if out.contains(OutCode::BOTTOM) {
                (x1 + (x2 - x1) * (0.0 - y1) / (y2 - y1), 0.0)
            } else if out.contains(OutCode::RIGHT) {
                (width, y1 + (y2 - y1) * (width - x1) / (x2 - x1))
            } else {
                (0.0, y1 + (y2 - y1) * (0.0 - x1) / (x2 - x1))
            };

            if out == code1 {
                x1 = x;
                y1 = y;
                code1 = self.compute_outcode(x1, y1);
            } else {
                x2 = x;
                y2 = y;
                code2 = self.compute_outcode(x2, y2);
            }
        }
        None
    }

    /// Integer line between two on-screen points. Points are not checked
    /// beyond skipping any that would land off the buffer.
    pub fn bresenham(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, colour: u8) {
        let dx = x2 - x1;
        let ax = 2 * dx.abs();
        let sx = if dx < 0 { -1 } else { 1 };

        let dy = y2 - y1;
        let ay = 2 * dy.abs();
        let sy = if dy < 0 { -1 } else { 1 };

        let mut x = x1;
        let mut y = y1;

        if ax > ay {
            let mut d = ay - ax / 2;
            loop {
                self.plot(x, y, colour);
                if x == x2 {
                    return;
                }
                if d >= 0 {
                    y += sy;
                    d -= ax;
                }
                x += sx;
                d += ay;
            }
        } else {
            let mut d = ax - ay / 2;
            loop {
                self.plot(x, y, colour);
                if y == y2 {
                    return;
                }
                if d >= 0 {
                    x += sx;
                    d -= ay;
                }
                y += sy;
                d += ax;
            }
        }
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, colour: u8) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        let h = self.height();
        self.data_mut()[h * x as usize + y as usize] = colour;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_screen::tests::screen;

    fn lit(s: &DrawScreen) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for x in 0..s.width() as i32 {
            for y in 0..s.height() as i32 {
                if s.pixel(x, y) != Some(0) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn outcodes() {
        let s = screen(10, 10);
        assert_eq!(s.compute_outcode(5.0, 5.0), OutCode::INSIDE);
        assert_eq!(s.compute_outcode(10.0, 10.0), OutCode::INSIDE);
        assert_eq!(s.compute_outcode(-1.0, 5.0), OutCode::LEFT);
        assert_eq!(s.compute_outcode(11.0, -1.0), OutCode::RIGHT | OutCode::BOTTOM);
        assert_eq!(s.compute_outcode(5.0, 12.0), OutCode::TOP);
    }

    #[test]
    fn fully_outside_draws_nothing() {
        let mut s = screen(10, 10);
        s.draw_line(-5.0, -5.0, -1.0, 20.0, 3);
        s.draw_line(11.0, 0.0, 30.0, 5.0, 3);
        s.draw_line(-5.0, 12.0, 20.0, 15.0, 3);
        assert!(lit(&s).is_empty());
    }

    #[test]
    fn inside_is_bresenham() {
        let mut s = screen(10, 10);
        s.draw_line(1.0, 1.0, 7.0, 4.0, 3);
        assert_eq!(
            lit(&s),
            [(1, 1), (2, 2), (3, 2), (4, 3), (5, 3), (6, 4), (7, 4)]
        );

        let mut s = screen(10, 10);
        s.draw_line(2.0, 8.0, 2.0, 3.0, 3);
        assert_eq!(lit(&s), [(2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8)]);

        let mut s = screen(10, 10);
        s.draw_line(4.0, 4.0, 4.0, 4.0, 3);
        assert_eq!(lit(&s), [(4, 4)]);
    }

    #[test]
    fn partial_is_clipped() {
        let mut s = screen(10, 10);
        s.draw_line(-10.0, 5.0, 20.0, 5.0, 3);
        let pts = lit(&s);
        assert_eq!(pts.len(), 10);
        assert!(pts.iter().all(|(_, y)| *y == 5));

        let mut s = screen(10, 10);
        s.draw_line(-4.0, -4.0, 14.0, 14.0, 3);
        let pts = lit(&s);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(9, 9)));
        assert!(pts.iter().all(|(x, y)| x == y));
    }

    #[test]
    fn odd_input_is_safe() {
        let mut s = screen(10, 10);
        s.draw_line(f32::NAN, 1.0, 5.0, f32::INFINITY, 3);
        s.draw_line(f32::NEG_INFINITY, 1.0, f32::INFINITY, 9.0, 3);
        s.draw_line(1e30, -1e30, -1e30, 1e30, 3);
        assert_eq!(s.data().len(), 100);
    }
}
