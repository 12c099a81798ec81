//! Packed 1-bit pixel grid.

/// A black-and-white image stored one bit per pixel.
///
/// Rows are packed most-significant-bit first with no padding between rows;
/// a set bit is white. Container formats add their own row alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl MonoBitmap {
    /// Create an all-black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = Self::stride_for(width);
        Self {
            width,
            height,
            bits: vec![0; stride * height as usize],
        }
    }

    /// Bytes needed for one packed row of `width` pixels.
    #[inline]
    pub fn stride_for(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per packed row.
    pub fn stride(&self) -> usize {
        Self::stride_for(self.width)
    }

    /// Whether the pixel at `(x, y)` is white.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        let (index, mask) = self.locate(x, y);
        self.bits[index] & mask != 0
    }

    /// Set the pixel at `(x, y)` to white (`true`) or black (`false`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, white: bool) {
        let (index, mask) = self.locate(x, y);
        if white {
            self.bits[index] |= mask;
        } else {
            self.bits[index] &= !mask;
        }
    }

    /// Packed bytes of row `y`, top to bottom.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.bits[start..start + stride]
    }

    /// Number of white pixels.
    pub fn count_white(&self) -> usize {
        (0..self.height)
            .map(|y| (0..self.width).filter(|&x| self.get(x, y)).count())
            .sum()
    }

    /// Expand to an 8-bit image with 0 for black and 255 for white.
    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width, self.height, |x, y| {
            image::Luma([if self.get(x, y) { 255 } else { 0 }])
        })
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        let index = y as usize * self.stride() + x as usize / 8;
        (index, 0x80 >> (x % 8))
    }
}
