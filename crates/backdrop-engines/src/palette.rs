//! Color tables for the starfield.

use backdrop_core::Rgba;

/// Star tints: white, light blue, cream, soft purple, soft peach, light
/// pink, sky blue, light salmon, plum, pale green.
pub const STAR_COLORS: &[Rgba] = &[
    Rgba::rgb(255, 255, 255),
    Rgba::rgb(173, 216, 230),
    Rgba::rgb(255, 253, 208),
    Rgba::rgb(230, 190, 255),
    Rgba::rgb(255, 223, 186),
    Rgba::rgb(255, 182, 193),
    Rgba::rgb(135, 206, 235),
    Rgba::rgb(255, 160, 122),
    Rgba::rgb(221, 160, 221),
    Rgba::rgb(152, 251, 152),
];

/// Planet body colors, loosely Mars, Earth, Neptune, Jupiter, coral,
/// purple and a dusty red.
pub const PLANET_COLORS: &[Rgba] = &[
    Rgba::rgb(0xE6, 0xB8, 0x9C),
    Rgba::rgb(0x88, 0xB0, 0x4B),
    Rgba::rgb(0x92, 0xA8, 0xD1),
    Rgba::rgb(0xF7, 0xCA, 0xC9),
    Rgba::rgb(0xFF, 0x6F, 0x61),
    Rgba::rgb(0x6B, 0x5B, 0x95),
    Rgba::rgb(0x95, 0x52, 0x51),
];
