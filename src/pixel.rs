/// One 24-bit truecolor sample: red, green and blue, 8 bits each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Samples in on-disk BMP order.
    #[inline]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b]
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Self {
            r: p.r,
            g: p.g,
            b: p.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.r, p.g, p.b)
    }
}
