//! OLED display adapter.
//!
//! Implements [`DisplayPort`] over any `embedded-graphics` monochrome draw
//! target that can push a finished frame to the panel ([`FrameFlush`]).
//! On the device that is an SSD1306 128×64 in buffered-graphics mode over
//! I²C; tests use an in-memory framebuffer.
//!
//! Text uses the ISO-8859-1 6×10 font so the degree sign renders.

use embedded_graphics::mono_font::iso_8859_1::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::warn;

use crate::app::ports::DisplayPort;

/// Panel flush failed (I²C NACK, bus timeout, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushError;

/// A draw target with an off-screen buffer that must be pushed explicitly.
pub trait FrameFlush {
    fn flush_frame(&mut self) -> Result<(), FlushError>;
}

#[cfg(target_os = "espidf")]
pub type Ssd1306Oled = ssd1306::Ssd1306<
    ssd1306::prelude::I2CInterface<esp_idf_hal::i2c::I2cDriver<'static>>,
    ssd1306::size::DisplaySize128x64,
    ssd1306::mode::BufferedGraphicsMode<ssd1306::size::DisplaySize128x64>,
>;

#[cfg(target_os = "espidf")]
impl FrameFlush for Ssd1306Oled {
    fn flush_frame(&mut self) -> Result<(), FlushError> {
        self.flush().map_err(|_| FlushError)
    }
}

pub struct OledDisplay<D> {
    target: D,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<D> OledDisplay<D>
where
    D: DrawTarget<Color = BinaryColor> + FrameFlush,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            style: MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }
}

impl<D> DisplayPort for OledDisplay<D>
where
    D: DrawTarget<Color = BinaryColor> + FrameFlush,
{
    fn clear_screen(&mut self) {
        if self.target.clear(BinaryColor::Off).is_err() {
            warn!("oled: clear failed");
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let drawn = Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top)
            .draw(&mut self.target);
        if drawn.is_err() {
            warn!("oled: draw_text failed at ({}, {})", x, y);
        }
    }

    fn flush_screen(&mut self) {
        if self.target.flush_frame().is_err() {
            warn!("oled: flush failed");
        }
    }
}
