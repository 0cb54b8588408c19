use rand::Rng;

/// Number of discrete levels per color channel.
const LEVELS: u8 = 10;

/// Background color applied when the frame buffer is cleared.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl ClearColor {
    /// Color of the very first clear, before any random color is drawn.
    pub const INITIAL: Self = Self::opaque(0.2, 0.0, 0.5);

    pub const fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Picks each RGB channel uniformly from `0.0, 0.1, ..., 0.9`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut channel = || f32::from(rng.gen_range(0..LEVELS)) / f32::from(LEVELS);
        Self::opaque(channel(), channel(), channel())
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn is_level(value: f32) -> bool {
        (0..LEVELS).any(|level| (value - f32::from(level) / 10.0).abs() < 1e-6)
    }

    #[test]
    fn random_channels_are_discrete() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let color = ClearColor::random(&mut rng);
            assert!(is_level(color.red), "{color:?}");
            assert!(is_level(color.green), "{color:?}");
            assert!(is_level(color.blue), "{color:?}");
            assert_eq!(color.alpha, 1.0);
        }
    }

    #[test]
    fn random_covers_every_level() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; LEVELS as usize];
        for _ in 0..1000 {
            let color = ClearColor::random(&mut rng);
            seen[(color.red * 10.0).round() as usize] = true;
        }
        assert!(seen.iter().all(|level| *level));
    }

    #[test]
    fn initial_color_is_purple() {
        assert_eq!(ClearColor::INITIAL.as_array(), [0.2, 0.0, 0.5, 1.0]);
    }
}
