use crate::constants::voxel::{MAX_LIGHT_CHANNEL, MAX_LIGHT_LEVEL, MAX_WATER_LEVEL};
use crate::world::core::BlockType;
use bytemuck::{Pod, Zeroable};

const BLOCK_TYPE_MASK: u32 = 0xFF;
const WATER_SHIFT: u32 = 8;
const WATER_MASK: u32 = 0x7;
const LIGHT_SHIFT: u32 = 11;
const LIGHT_MASK: u32 = 0xF;

/// Set in the tint word once a color has been written, so black stays distinct from unset
const TINT_SET_FLAG: u32 = 1 << 24;

/// Packed per-voxel state
///
/// Word 0:
/// - Bits 0-7: Block type
/// - Bits 8-10: Water level (0-7)
/// - Bits 11-14: Light level (0-15)
/// - Bits 15-31: Reserved
///
/// Word 1: RGB8 light tint in bits 0-23, bit 24 marks it as set. An unset
/// tint reads back as white.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct VoxelCell {
    bits: u32,
    tint: u32,
}

impl Default for VoxelCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl VoxelCell {
    /// Air at full light with an unset tint
    pub const EMPTY: Self = Self {
        bits: (MAX_LIGHT_LEVEL as u32) << LIGHT_SHIFT,
        tint: 0,
    };

    /// Pack a cell; out-of-range levels are clamped to their maximum
    #[inline]
    pub fn new(block_type: BlockType, water_level: u8, light_level: u8) -> Self {
        let mut cell = Self { bits: 0, tint: 0 };
        cell.set_block_type(block_type);
        cell.set_water_level(water_level);
        cell.set_light_level(light_level);
        cell
    }

    /// Full-light cell of the given type
    #[inline]
    pub fn of(block_type: BlockType) -> Self {
        Self::new(block_type, 0, MAX_LIGHT_LEVEL)
    }

    #[inline]
    pub fn unpack(self) -> (BlockType, u8, u8) {
        (self.block_type(), self.water_level(), self.light_level())
    }

    #[inline]
    pub fn block_type(self) -> BlockType {
        BlockType((self.bits & BLOCK_TYPE_MASK) as u8)
    }

    #[inline]
    pub fn set_block_type(&mut self, block_type: BlockType) {
        self.bits = (self.bits & !BLOCK_TYPE_MASK) | block_type.0 as u32;
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.block_type().is_air()
    }

    #[inline]
    pub fn water_level(self) -> u8 {
        ((self.bits >> WATER_SHIFT) & WATER_MASK) as u8
    }

    #[inline]
    pub fn set_water_level(&mut self, level: u8) {
        let level = level.min(MAX_WATER_LEVEL) as u32;
        self.bits = (self.bits & !(WATER_MASK << WATER_SHIFT)) | (level << WATER_SHIFT);
    }

    #[inline]
    pub fn light_level(self) -> u8 {
        ((self.bits >> LIGHT_SHIFT) & LIGHT_MASK) as u8
    }

    #[inline]
    pub fn set_light_level(&mut self, level: u8) {
        let level = level.min(MAX_LIGHT_LEVEL) as u32;
        self.bits = (self.bits & !(LIGHT_MASK << LIGHT_SHIFT)) | (level << LIGHT_SHIFT);
    }

    #[inline]
    pub fn light_color(self) -> LightColor {
        if self.tint & TINT_SET_FLAG == 0 {
            return LightColor::WHITE;
        }
        LightColor {
            r: ((self.tint >> 16) & 0xFF) as u8,
            g: ((self.tint >> 8) & 0xFF) as u8,
            b: (self.tint & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn set_light_color(&mut self, color: LightColor) {
        self.tint = TINT_SET_FLAG | (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32;
    }

    /// Raw packed type/water/light word
    #[inline]
    pub fn raw(self) -> u32 {
        self.bits
    }
}

/// RGB light tint, 0-255 per channel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LightColor {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for LightColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Colored light grid entry: 4 bits per R, G, B channel, 4 bits padding
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedLight(pub u16);

impl PackedLight {
    /// Pack three channels, clamping each to 0-15
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        let clamp = |c: u8| c.min(MAX_LIGHT_CHANNEL) as u16;
        Self(clamp(r) | clamp(g) << 4 | clamp(b) << 8)
    }

    #[inline]
    pub fn r(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}
