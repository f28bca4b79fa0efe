//! Per-channel contrast stretch into a palette's brightness range.

use std::fmt;

use super::options::FlatChannelPolicy;
use crate::color::Color;

/// An RGB channel, used to report flat channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        })
    }
}

/// Stretch each channel to the full 0..=255 range, then compress it into
/// `target_min..=target_max`.
///
/// For a channel with spread: `stretched = (v - min) / (max - min) * 255`,
/// `v' = stretched * (target_max - target_min) / 255 + target_min`,
/// truncated to 8 bits. Channels without spread take the value chosen by
/// `policy` and are returned.
pub fn stretch_to_range(
    pixels: &mut [Color],
    target_min: f32,
    target_max: f32,
    policy: FlatChannelPolicy,
) -> Vec<Channel> {
    let target_min = f64::from(target_min);
    let scale = (f64::from(target_max) - target_min) / 255.0;
    let mut flat = Vec::new();

    for channel in Channel::ALL {
        let idx = channel.index();
        let (lo, hi) = pixels.iter().fold((u8::MAX, u8::MIN), |(lo, hi), c| {
            let v = c.channel(idx);
            (lo.min(v), hi.max(v))
        });

        if pixels.is_empty() {
            continue;
        }

        if lo == hi {
            flat.push(channel);
            let value = to_u8(f64::from(policy.stretched_value()) * scale + target_min);
            for c in pixels.iter_mut() {
                set_channel(c, idx, value);
            }
            continue;
        }

        let spread = f64::from(hi - lo);
        for c in pixels.iter_mut() {
            let stretched = f64::from(c.channel(idx) - lo) / spread * 255.0;
            set_channel(c, idx, to_u8(stretched * scale + target_min));
        }
    }

    flat
}

// Truncating like an integer cast of the float result
#[inline]
fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

#[inline]
fn set_channel(color: &mut Color, idx: usize, value: u8) {
    match idx {
        0 => color.r = value,
        1 => color.g = value,
        _ => color.b = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extremes_map_to_target_bounds() {
        let mut pixels = vec![Color::new(10, 0, 50), Color::new(200, 255, 60)];
        let flat = stretch_to_range(&mut pixels, 44.3232, 168.4936, FlatChannelPolicy::Floor);

        assert!(flat.is_empty());
        assert_eq!(pixels[0], Color::new(44, 44, 44));
        assert_eq!(pixels[1], Color::new(168, 168, 168));
    }

    #[test]
    fn test_values_are_truncated() {
        let mut pixels = vec![
            Color::new(0, 0, 0),
            Color::new(160, 160, 160),
            Color::new(240, 240, 240),
        ];
        stretch_to_range(&mut pixels, 44.3232, 168.4936, FlatChannelPolicy::Floor);
        // 160/240*255 = 170, 170*(124.1704/255)+44.3232 = 127.10
        assert_eq!(pixels[1], Color::new(127, 127, 127));
    }

    #[test]
    fn test_flat_channel_floor() {
        let mut pixels = vec![Color::new(0, 128, 0), Color::new(255, 128, 10)];
        let flat = stretch_to_range(&mut pixels, 44.3232, 168.4936, FlatChannelPolicy::Floor);

        assert_eq!(flat, vec![Channel::Green]);
        assert!(pixels.iter().all(|c| c.g == 44));
    }

    #[test]
    fn test_flat_channel_midpoint() {
        let mut pixels = vec![Color::new(7, 7, 7); 4];
        let flat = stretch_to_range(&mut pixels, 0.0, 255.0, FlatChannelPolicy::Midpoint);

        assert_eq!(flat, Channel::ALL.to_vec());
        assert!(pixels.iter().all(|&c| c == Color::new(127, 127, 127)));
    }

    #[test]
    fn test_output_stays_within_target_range() {
        let mut pixels: Vec<Color> = (0..=255u8).map(|v| Color::new(v, 255 - v, v / 2)).collect();
        stretch_to_range(&mut pixels, 44.3232, 168.4936, FlatChannelPolicy::Floor);
        for c in &pixels {
            for ch in 0..3 {
                assert!((44..=168).contains(&c.channel(ch)), "{c} out of range");
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let mut pixels: Vec<Color> = Vec::new();
        assert!(stretch_to_range(&mut pixels, 0.0, 255.0, FlatChannelPolicy::Floor).is_empty());
    }
}
