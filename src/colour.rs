/// A colour, expressed in RGB or greyscale colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// The default card palette, matching the reference card design
pub mod colours {
    use super::*;

    /// The off-white paper the card is printed on
    pub const PAPER: Colour = Colour::RGB {
        r: 0xF8 as f32 / 255.0,
        g: 0xF9 as f32 / 255.0,
        b: 0xF4 as f32 / 255.0,
    };
    /// Body text ink
    pub const INK: Colour = Colour::RGB {
        r: 0x2C as f32 / 255.0,
        g: 0x2C as f32 / 255.0,
        b: 0x2C as f32 / 255.0,
    };
    /// Title ink, near black
    pub const TITLE_INK: Colour = Colour::RGB {
        r: 0x11 as f32 / 255.0,
        g: 0x18 as f32 / 255.0,
        b: 0x27 as f32 / 255.0,
    };
    /// Username ink in the header block
    pub const HEADER_INK: Colour = Colour::RGB {
        r: 0x1F as f32 / 255.0,
        g: 0x29 as f32 / 255.0,
        b: 0x37 as f32 / 255.0,
    };
    /// Secondary text such as the date line
    pub const MUTED: Colour = Colour::RGB {
        r: 0x6B as f32 / 255.0,
        g: 0x72 as f32 / 255.0,
        b: 0x80 as f32 / 255.0,
    };
    /// Barely-there text such as the page ordinal
    pub const FAINT: Colour = Colour::RGB {
        r: 0x9C as f32 / 255.0,
        g: 0xA3 as f32 / 255.0,
        b: 0xAF as f32 / 255.0,
    };
    /// Background of the avatar placeholder
    pub const PLACEHOLDER: Colour = Colour::RGB {
        r: 0xE5 as f32 / 255.0,
        g: 0xE7 as f32 / 255.0,
        b: 0xEB as f32 / 255.0,
    };

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
}
