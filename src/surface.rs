//! Output surfaces the renderer draws onto.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::error::SurfaceError;
use crate::render::palette;

/// Something that can be drawn on and then shown in one piece.
pub trait Surface {
    type Target: DrawTarget<Color = Rgb888>;

    /// The buffer the next frame is drawn into.
    fn target(&mut self) -> &mut Self::Target;

    /// Make everything drawn since the last call visible at once.
    fn present(&mut self);
}

/// Draw error of a surface's target.
pub type DrawError<S> = <<S as Surface>::Target as DrawTarget>::Error;

/// Reject canvases the plot can't be laid out on.
pub(crate) fn check_size(size: Size) -> Result<(), SurfaceError> {
    if size.width < 2 || size.height < 1 {
        return Err(SurfaceError::TooSmall {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

/// In-memory framebuffer with separate draw and display buffers.
///
/// Drawing goes to the back buffer; [`Surface::present`] copies it to the
/// front buffer, so readers never see a half-drawn frame.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: Size,
    back: Vec<Rgb888>,
    front: Vec<Rgb888>,
    presented: u64,
}

impl Canvas {
    pub fn new(size: Size) -> Result<Self, SurfaceError> {
        check_size(size)?;
        let len = size.width as usize * size.height as usize;
        Ok(Self {
            size,
            back: vec![palette::BACKGROUND; len],
            front: vec![palette::BACKGROUND; len],
            presented: 0,
        })
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel of the last presented frame.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|i| self.front[i])
    }

    /// Pixel of the frame currently being drawn.
    pub fn pending_pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|i| self.back[i])
    }

    /// The last presented frame, row-major.
    pub fn frame(&self) -> &[Rgb888] {
        &self.front
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.back[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.back.fill(color);
        Ok(())
    }
}

impl Surface for Canvas {
    type Target = Self;

    fn target(&mut self) -> &mut Self {
        self
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.presented += 1;
    }
}
