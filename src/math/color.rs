use serde::Serialize;

/// Linear RGB tint in 0..1
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Tint(pub [f32; 3]);

pub const NEUTRAL_TINT: Tint = Tint::from_rgb24(0x7d7d7d);
pub const CUTTER_TINT: Tint = Tint::from_rgb24(0xff530d);
pub const TRACE_TINT: Tint = Tint::from_rgb24(0xffa07a);

impl Tint {
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self([
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        ])
    }

    pub fn rgb(&self) -> [f32; 3] {
        self.0
    }
}
