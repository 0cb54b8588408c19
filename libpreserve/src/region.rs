use std::fmt;

/// Part of the surface the animation is expected to touch, in surface pixels
/// with the origin in the top left corner.
///
/// The region is only reported; nothing submits it to the driver yet.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DamageRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DamageRegion {
    /// Offset of the region from each surface edge, as a fraction of the
    /// surface size.
    const INSET: f32 = 0.125;
    /// Extent of the region as a fraction of the surface size.
    const EXTENT: f32 = 0.75;

    /// Computes the damage region for a surface of the given size. Fractional
    /// pixels are truncated.
    #[tracing::instrument(ret, level = "debug")]
    pub fn for_surface(width: i32, height: i32) -> Self {
        let scale = |value: i32, factor: f32| (value as f32 * factor) as i32;
        Self {
            x: scale(width, Self::INSET),
            y: scale(height, Self::INSET),
            width: scale(width, Self::EXTENT),
            height: scale(height, Self::EXTENT),
        }
    }

    /// The region as an `[x, y, width, height]` rectangle, the layout EGL
    /// damage extensions take.
    pub fn as_rect(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl fmt::Display for DamageRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, width, height] = self.as_rect();
        write!(f, "{x}, {y}, {width}, {height}")
    }
}
