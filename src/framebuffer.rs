use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::frame::DisplayBackend;
use crate::scene::Colour;

/// CPU-side RGBA image that frames are drawn into before presentation.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    image: RgbaImage,
    frames_presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            frames_presented: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Stores `colour` at `(x, y)`; out-of-bounds writes are dropped.
    pub fn put(&mut self, x: u32, y: u32, colour: Colour) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, Rgba(colour.to_rgba8()));
        }
    }

    pub(crate) fn mark_presented(&mut self) {
        self.frames_presented += 1;
    }
}

impl DisplayBackend for FrameBuffer {
    fn draw_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        self.put(x, y, colour);
    }

    fn present(&mut self) -> Result<()> {
        self.mark_presented();
        Ok(())
    }

    fn poll_cancel(&mut self) -> bool {
        false
    }
}
