//! Addressable LED strip adapter.
//!
//! Implements [`LedStripPort`] over any `smart-leds` writer.  Pixels are
//! buffered locally and pushed in one transfer on
//! [`flush_strip`](LedStripPort::flush_strip), scaled by a global
//! brightness (WS2812s at full power are blinding on a desk).
//!
//! On the device the writer is the RMT-based WS2812 driver on
//! [`LED_MATRIX_GPIO`](crate::pins::LED_MATRIX_GPIO).

use log::warn;
use smart_leds::{brightness, SmartLedsWrite, RGB8};

use crate::app::ports::LedStripPort;

/// Default global brightness (0-255).
pub const DEFAULT_BRIGHTNESS: u8 = 32;

pub struct PixelStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W, const N: usize> PixelStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    /// Buffered (not yet flushed) pixels.
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W, const N: usize> LedStripPort for PixelStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn clear_strip(&mut self) {
        self.pixels = [RGB8::default(); N];
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = RGB8::new(r, g, b);
        }
    }

    fn flush_strip(&mut self) {
        let frame = brightness(self.pixels.iter().copied(), self.brightness);
        if self.writer.write(frame).is_err() {
            warn!("led_strip: write failed");
        }
    }

    fn strip_len(&self) -> usize {
        N
    }
}
