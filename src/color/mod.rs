mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, blend_colors, fill_black, hsv2rgb};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
