//! Sprite frames and colour palettes: the only input the drawing layer needs.
//!
//! Each frame is a 16×16 grid of symbolic pixel codes. `.` is transparent
//! and never appears in a palette. Frame indices handed in from the
//! simulation are wrapped modulo the variant's frame count here, so a
//! stale index from a previous variant can never go out of range.

use crate::{types::FrameIndex, variant::PetVariant};
use serde::{Deserialize, Serialize};

pub const SPRITE_SIZE: usize = 16;
pub const TRANSPARENT: char = '.';

pub type Frame = [&'static str; SPRITE_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK:  Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE:  Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 0.8, 0.0);
}

/// Pixel rows for `frame_index` of `variant` (index wrapped).
pub fn frame_rows(variant: PetVariant, frame_index: FrameIndex) -> &'static [&'static str] {
    let frames = frames(variant);
    let idx = (frame_index % frames.len() as u64) as usize;
    &frames[idx]
}

/// All animation frames for a variant, in playback order.
pub fn frames(variant: PetVariant) -> &'static [Frame] {
    match variant {
        PetVariant::Dog    => &DOG_FRAMES,
        PetVariant::Demon  => &DEMON_FRAMES,
        PetVariant::Dragon => &DRAGON_FRAMES,
        PetVariant::Slime  => &SLIME_FRAMES,
        PetVariant::Ghost  => &GHOST_FRAMES,
        PetVariant::Fairy  => &FAIRY_FRAMES,
    }
}

const DOG_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(0.6, 0.4, 0.2)),  // body
    ('L', Rgb::new(0.8, 0.6, 0.4)),  // light fur
    ('E', Rgb::BLACK),
    ('N', Rgb::new(0.3, 0.2, 0.1)),  // nose
    ('W', Rgb::WHITE),
];

const DEMON_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(0.5, 0.1, 0.1)),
    ('L', Rgb::new(0.8, 0.2, 0.2)),
    ('E', Rgb::YELLOW),
    ('H', Rgb::new(0.3, 0.0, 0.0)),  // horn
    ('W', Rgb::WHITE),
    ('F', Rgb::new(1.0, 0.5, 0.0)),  // fire
];

const DRAGON_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(0.2, 0.5, 0.3)),
    ('L', Rgb::new(0.4, 0.7, 0.5)),
    ('E', Rgb::new(1.0, 0.3, 0.0)),
    ('H', Rgb::new(0.1, 0.3, 0.2)),  // spikes
    ('W', Rgb::WHITE),
    ('F', Rgb::new(1.0, 0.5, 0.0)),
    ('Y', Rgb::YELLOW),              // belly
];

const SLIME_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(0.2, 0.6, 0.8)),
    ('L', Rgb::new(0.4, 0.8, 1.0)),
    ('E', Rgb::BLACK),
    ('W', Rgb::WHITE),
    ('S', Rgb::new(0.6, 0.9, 1.0)),  // shine
];

const GHOST_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(0.9, 0.9, 0.95)),
    ('L', Rgb::new(0.7, 0.7, 0.8)),
    ('E', Rgb::BLACK),
    ('W', Rgb::WHITE),
    ('P', Rgb::new(0.6, 0.5, 0.8)),
];

const FAIRY_PALETTE: &[(char, Rgb)] = &[
    ('B', Rgb::new(1.0, 0.8, 0.9)),
    ('L', Rgb::new(1.0, 0.9, 0.95)),
    ('E', Rgb::new(0.3, 0.3, 0.8)),
    ('W', Rgb::WHITE),
    ('G', Rgb::new(0.8, 1.0, 0.8)),  // wings
    ('Y', Rgb::YELLOW),              // sparkle
    ('H', Rgb::new(1.0, 0.9, 0.5)),  // hair
];

/// Symbolic code → colour for a variant.
pub fn palette(variant: PetVariant) -> &'static [(char, Rgb)] {
    match variant {
        PetVariant::Dog    => DOG_PALETTE,
        PetVariant::Demon  => DEMON_PALETTE,
        PetVariant::Dragon => DRAGON_PALETTE,
        PetVariant::Slime  => SLIME_PALETTE,
        PetVariant::Ghost  => GHOST_PALETTE,
        PetVariant::Fairy  => FAIRY_PALETTE,
    }
}

/// Colour for one symbolic code, `None` for transparent or unknown codes.
pub fn color_for(variant: PetVariant, code: char) -> Option<Rgb> {
    if code == TRANSPARENT {
        return None;
    }
    palette(variant)
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rgb)| *rgb)
}

// ── Frame data ─────────────────────────────────────────────────

pub const DOG_FRAMES: [Frame; 4] = [
    // idle
    [
        "................",
        "................",
        "...BB....BB.....",
        "..BBBB..BBBB....",
        "..BLLLBBBLLL....",
        "..LLLLLLLLLL....",
        "..LEWLLEWLLL....",
        "..LLLLLLLLL.....",
        "...LLLNLLL......",
        "....LLLLL.......",
        "...BBBBBBB......",
        "..BBLLLLLBB.....",
        "..BLLLLLLLLB....",
        "..BLL..LLLLB....",
        "...BB...BB......",
        "................",
    ],
    // blink
    [
        "................",
        "................",
        "...BB....BB.....",
        "..BBBB..BBBB....",
        "..BLLLBBBLLL....",
        "..LLLLLLLLLL....",
        "..LEELLEELLL....",
        "..LLLLLLLLL.....",
        "...LLLNLLL......",
        "....LLLLL.......",
        "...BBBBBBB......",
        "..BBLLLLLBB.....",
        "..BLLLLLLLLB....",
        "..BLL..LLLLB....",
        "...BB...BB......",
        "................",
    ],
    // tail wag left
    [
        "................",
        "................",
        "...BB....BB.....",
        "..BBBB..BBBB....",
        "..BLLLBBBLLL....",
        "..LLLLLLLLLL....",
        "..LEWLLEWLLL....",
        "..LLLLLLLLL.....",
        "...LLLNLLL......",
        "....LLLLL.......",
        "...BBBBBBB......",
        "..BBLLLLLBBB....",
        "..BLLLLLLLLB....",
        "..BLL..LLLLB....",
        "...BB...BB......",
        "................",
    ],
    // tail wag right
    [
        "................",
        "................",
        "...BB....BB.....",
        "..BBBB..BBBB....",
        "..BLLLBBBLLL....",
        "..LLLLLLLLLL....",
        "..LEWLLEWLLL....",
        "..LLLLLLLLL.....",
        "...LLLNLLL......",
        "....LLLLL.......",
        "...BBBBBBB......",
        ".BBBLLLLLBB.....",
        "..BLLLLLLLLB....",
        "..BLL..LLLLB....",
        "...BB...BB......",
        "................",
    ],
];

pub const DEMON_FRAMES: [Frame; 4] = [
    // idle
    [
        "..H........H....",
        "..HH......HH....",
        "...HBBBBBBH.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "...BBLLLLBB.....",
        "...BBLWWLBB.....",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBLLLLLBB....",
        "..BB.BBBB.BB....",
        "..B...BB...B....",
        ".FF...FF...FF...",
        "................",
    ],
    // blink
    [
        "..H........H....",
        "..HH......HH....",
        "...HBBBBBBH.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBEEBBEEBBB...",
        "..BBBBBBBBBB....",
        "...BBLLLLBB.....",
        "...BBLWWLBB.....",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBLLLLLBB....",
        "..BB.BBBB.BB....",
        "..B...BB...B....",
        ".FF...FF...FF...",
        "................",
    ],
    // wings up
    [
        "..H........H....",
        "..HH......HH....",
        "...HBBBBBBH.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "...BBLLLLBB.....",
        "F..BBLWWLBB..F..",
        ".F..BBBBBB..F...",
        "..FBBBBBBBBF....",
        "..BBBLLLLLBB....",
        "..BB.BBBB.BB....",
        "..B...BB...B....",
        "......FF........",
        "................",
    ],
    // fire
    [
        "..H........H....",
        "..HH......HH....",
        "...HBBBBBBH.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "...BBLLLLBB.....",
        "...BBLWWLBB.....",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBLLLLLBB....",
        "..BB.BBBB.BB....",
        "..B...BB...B....",
        "..F..FFFF..F....",
        ".FFF.F..F.FFF...",
    ],
];

pub const DRAGON_FRAMES: [Frame; 4] = [
    // idle
    [
        "......HH........",
        ".....HBBH.......",
        "....HBBBBH......",
        "...BBBBBBBB.....",
        "..BBBELBLEBBB...",
        "..BBBBBBBBBB....",
        "...BBBBBBB......",
        "....BYYYB.......",
        "...BBYYYBB......",
        "..BBBYYYBBB.....",
        ".BBBB.B.BBBB....",
        ".BB.......BB....",
        ".B.........B....",
        "................",
        "..........BBB...",
        ".........BBBBB..",
    ],
    // blink
    [
        "......HH........",
        ".....HBBH.......",
        "....HBBBBH......",
        "...BBBBBBBB.....",
        "..BBBEEBLEEBB...",
        "..BBBBBBBBBB....",
        "...BBBBBBB......",
        "....BYYYB.......",
        "...BBYYYBB......",
        "..BBBYYYBBB.....",
        ".BBBB.B.BBBB....",
        ".BB.......BB....",
        ".B.........B....",
        "................",
        "..........BBB...",
        ".........BBBBB..",
    ],
    // tail swing
    [
        "......HH........",
        ".....HBBH.......",
        "....HBBBBH......",
        "...BBBBBBBB.....",
        "..BBBELBLEBBB...",
        "..BBBBBBBBBB....",
        "...BBBBBBB......",
        "....BYYYB.......",
        "...BBYYYBB......",
        "..BBBYYYBBB.....",
        ".BBBB.B.BBBB....",
        ".BB.......BB....",
        ".B.........B....",
        "................",
        ".........BBB....",
        "........BBBBB...",
    ],
    // fire breath
    [
        "......HH........",
        ".....HBBH.......",
        "....HBBBBH..FF..",
        "...BBBBBBBBFFFF.",
        "..BBBELBLEBBBFF.",
        "..BBBBBBBBBB.F..",
        "...BBBBBBB......",
        "....BYYYB.......",
        "...BBYYYBB......",
        "..BBBYYYBBB.....",
        ".BBBB.B.BBBB....",
        ".BB.......BB....",
        ".B.........B....",
        "................",
        "..........BBB...",
        ".........BBBBB..",
    ],
];

pub const SLIME_FRAMES: [Frame; 4] = [
    // idle
    [
        "................",
        "................",
        "................",
        ".....SSSS.......",
        "....SLLLLB......",
        "...SLLLLLBB.....",
        "...BLLLLLLB.....",
        "..BLEWBLEWLB....",
        "..BLLLBBLLLB....",
        "..BBLLLLLLBB....",
        "...BBLLLLBB.....",
        "...BBBLLBBB.....",
        "....BBBBBB......",
        ".....BBBB.......",
        "................",
        "................",
    ],
    // blink
    [
        "................",
        "................",
        "................",
        ".....SSSS.......",
        "....SLLLLB......",
        "...SLLLLLBB.....",
        "...BLLLLLLB.....",
        "..BLEEBBEELB....",
        "..BLLLBBLLLB....",
        "..BBLLLLLLBB....",
        "...BBLLLLBB.....",
        "...BBBLLBBB.....",
        "....BBBBBB......",
        ".....BBBB.......",
        "................",
        "................",
    ],
    // squish down
    [
        "................",
        "................",
        "................",
        "................",
        ".....SSSS.......",
        "...SSLLLLBB.....",
        "..SLLLLLLLLB....",
        "..BLEWBBLEWLB...",
        "..BLLLBBBLLLB...",
        "..BBBLLLLLLBBB..",
        "...BBBBLLBBBB...",
        "....BBBBBBBB....",
        ".....BBBBBB.....",
        "................",
        "................",
        "................",
    ],
    // bounce up
    [
        "................",
        ".....SSSS.......",
        "....SLLLLB......",
        "...SLLLLLBB.....",
        "...BLLLLLLB.....",
        "..BLEWBLEWLB....",
        "..BLLLBBLLLB....",
        "..BBLLLLLLBB....",
        "...BBLLLLBB.....",
        "...BBBLLBBB.....",
        "....BBBBBB......",
        ".....BBBB.......",
        "................",
        "................",
        "................",
        "................",
    ],
];

pub const GHOST_FRAMES: [Frame; 4] = [
    // idle
    [
        "................",
        ".....BBBB.......",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "..BBBBBBBBBB....",
        "...BLLLLLBB.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBLBBLBBLB....",
        "...B..B..B......",
        "................",
        "................",
        "................",
    ],
    // blink
    [
        "................",
        ".....BBBB.......",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBEEBBEEBB....",
        "..BBBBBBBBBB....",
        "..BBBBBBBBBB....",
        "...BLLLLLBB.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBLBBLBBLB....",
        "...B..B..B......",
        "................",
        "................",
        "................",
    ],
    // float up
    [
        ".....BBBB.......",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "..BBBBBBBBBB....",
        "...BLLLLLBB.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBLBBLBBLB....",
        "...B..B..B......",
        "................",
        "................",
        "................",
        "................",
    ],
    // float down
    [
        "................",
        "................",
        ".....BBBB.......",
        "....BBBBBB......",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBELBBLEBBB...",
        "..BBBBBBBBBB....",
        "..BBBBBBBBBB....",
        "...BLLLLLBB.....",
        "...BBBBBBBB.....",
        "..BBBBBBBBBB....",
        "..BBLBBLBBLB....",
        "...B..B..B......",
        "................",
        "................",
    ],
];

pub const FAIRY_FRAMES: [Frame; 4] = [
    // idle
    [
        "......YY........",
        ".....YHHH.......",
        "....HHHHHH......",
        "....BBBBBB......",
        "...BBELBLEBBB...",
        "...BBBLLBBB.....",
        "....BLLLLB......",
        "..G.BBBBBB.G....",
        ".GGG.BBBB.GGG...",
        ".GG...BB...GG...",
        ".G....BB....G...",
        "......BB........",
        ".....B..B.......",
        "................",
        "................",
        "................",
    ],
    // blink
    [
        "......YY........",
        ".....YHHH.......",
        "....HHHHHH......",
        "....BBBBBB......",
        "...BBEEBBEEBB...",
        "...BBBLLBBB.....",
        "....BLLLLB......",
        "..G.BBBBBB.G....",
        ".GGG.BBBB.GGG...",
        ".GG...BB...GG...",
        ".G....BB....G...",
        "......BB........",
        ".....B..B.......",
        "................",
        "................",
        "................",
    ],
    // wings up
    [
        "......YY........",
        ".....YHHH.......",
        "....HHHHHH......",
        "....BBBBBB......",
        "...BBELBLEBBB...",
        "...BBBLLBBB.....",
        ".GG.BLLLLB.GG...",
        ".GGG.BBBBBB.GGG.",
        "..G..BBBB..G....",
        "......BB........",
        "......BB........",
        ".....B..B.......",
        "................",
        "................",
        "................",
        "................",
    ],
    // sparkle
    [
        "..Y...YY....Y...",
        ".....YHHH.......",
        "....HHHHHH......",
        "Y...BBBBBB...Y..",
        "...BBELBLEBBB...",
        "...BBBLLBBB.....",
        "....BLLLLB......",
        "..G.BBBBBB.G....",
        ".GGG.BBBB.GGG...",
        ".GG...BB...GG...",
        ".G....BB....G...",
        "......BB........",
        ".....B..B.......",
        "..Y..........Y..",
        "................",
        "................",
    ],
];
