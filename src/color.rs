use crate::shared_types::Rgba8;

/// Bit 15 of a packed color: the hardware's semi-transparency (STP) flag.
pub const STP_BIT: u16 = 1 << 15;

/// Reduces an 8 bit channel to 5 bits by dropping the low 3 bits.
pub const fn reduce_channel(c: u8) -> u8 {
	c >> 3
}

/// A 15 bit color plus transparency bit: `STP | B << 10 | G << 5 | R`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackedColor15(pub u16);

impl PackedColor15 {
	/// With `override_transparency` set the STP bit is always 0, otherwise it
	/// is 1 for any non-zero alpha.
	pub fn from_rgba(color: Rgba8, override_transparency: bool) -> PackedColor15 {
		let red: u16 = reduce_channel(color.red) as u16;
		let green: u16 = reduce_channel(color.green) as u16;
		let blue: u16 = reduce_channel(color.blue) as u16;

		let stp: u16 = if !override_transparency && color.alpha != 0 {
			STP_BIT
		} else {
			0
		};

		PackedColor15(stp | blue << 10 | green << 5 | red)
	}

	pub const fn to_le_bytes(self) -> [u8; 2] {
		self.0.to_le_bytes()
	}
}
