use crate::error::ConvertError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetDepth {
	Four,
	Eight,
	Sixteen,
}

impl TargetDepth {
	pub const fn bits(self) -> u8 {
		match self {
			TargetDepth::Four => 4,
			TargetDepth::Eight => 8,
			TargetDepth::Sixteen => 16,
		}
	}

	pub const fn is_paletted(self) -> bool {
		!matches!(self, TargetDepth::Sixteen)
	}

	/// Number of CLUT entries, 2^bpp. Only meaningful for paletted depths.
	pub const fn clut_entries(self) -> usize {
		1usize << self.bits()
	}
}


/// Maps the source's native bits per pixel onto a depth TIM can hold.
pub fn select_target_depth(native_bpp: u8) -> Result<TargetDepth, ConvertError> {
	match native_bpp {
		24 | 32 => Ok(TargetDepth::Sixteen),
		8 => Ok(TargetDepth::Eight),
		4 => Ok(TargetDepth::Four),
		other => Err(ConvertError::UnsupportedBitDepth(other)),
	}
}


/// Width of one image row in VRAM halfwords.
///
/// Rows that would end partway through a halfword are rejected rather than
/// truncated.
pub fn vram_width(width: u32, depth: TargetDepth) -> Result<u32, ConvertError> {
	let bits: u64 = width as u64 * depth.bits() as u64;

	if bits % 16 != 0 {
		return Err(ConvertError::UnalignedWidth {
			width: width,
			bpp: depth.bits(),
		});
	}

	return Ok((bits / 16) as u32);
}
