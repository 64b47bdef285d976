//! Plot colors

use embedded_graphics::pixelcolor::Rgb888;

pub const BACKGROUND: Rgb888 = Rgb888::new(64, 64, 64);
pub const CHANNEL0: Rgb888 = Rgb888::new(255, 128, 128);
pub const CHANNEL1: Rgb888 = Rgb888::new(128, 128, 255);
pub const OFFSET: Rgb888 = Rgb888::new(128, 255, 128);
pub const PERIOD: Rgb888 = Rgb888::new(255, 255, 128);
pub const AMPLITUDE0: Rgb888 = Rgb888::new(255, 160, 160);
pub const AMPLITUDE1: Rgb888 = Rgb888::new(160, 160, 255);
pub const AMPLITUDE: Rgb888 = Rgb888::new(200, 200, 200);
pub const LEGEND: Rgb888 = Rgb888::new(0, 0, 0);
