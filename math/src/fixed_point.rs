const FRACBITS: i32 = 16;
const FRACUNIT: i32 = 1 << FRACBITS;

/// A 16.16 fixed point number, Doom's `fixed_t`. Used to step through a
/// picture's texels when it is drawn scaled so that every destination pixel
/// maps back to a source pixel using integer maths only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedPoint(i32);

impl FixedPoint {
    /// 1.0
    pub const ONE: Self = Self(FRACUNIT);
    /// The smallest representable step, one 65536th
    pub const EPSILON: Self = Self(1);
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn from_int(value: i32) -> Self {
        Self(value << FRACBITS)
    }

    /// The raw 16.16 bits
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Round toward negative infinity and drop the fraction
    pub const fn floor_int(self) -> i32 {
        self.0 >> FRACBITS
    }
}

impl std::ops::Add for FixedPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for FixedPoint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for FixedPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Mul<i32> for FixedPoint {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl std::ops::Div<i32> for FixedPoint {
    type Output = Self;

    /// Division by zero saturates rather than panicking
    fn div(self, rhs: i32) -> Self {
        if rhs == 0 {
            return if self.0 < 0 {
                Self(i32::MIN)
            } else {
                Self(i32::MAX)
            };
        }
        Self(self.0.saturating_div(rhs))
    }
}
