use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};

/// A distance in canvas pixels.
///
/// Cards are specified at a fixed pixel size (for example 1242×1660) and the
/// generated PDF uses one user-space unit per pixel, so no conversion is
/// needed between layout maths and page coordinates.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Display,
    From, Into, Sum,
)]
pub struct Px(pub f32);

impl Px {
    /// The zero distance
    pub const ZERO: Px = Px(0.0);

    /// The larger of two distances
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// The smaller of two distances
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }
}

impl std::ops::Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

/// Dividing two distances yields a dimensionless scaling factor
impl std::ops::Div<Px> for Px {
    type Output = f32;

    fn div(self, rhs: Px) -> f32 {
        self.0 / rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(Px(100.0) + Px(50.0), Px(150.0));
        assert_eq!(Px(100.0) * 0.5, Px(50.0));
        assert_eq!(Px(100.0) / Px(50.0), 2.0);
        assert_eq!(Px(10.0).max(Px(20.0)), Px(20.0));
    }
}
