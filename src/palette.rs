use tracing::debug;

use crate::{
	bit_depth::TargetDepth,
	color::PackedColor15,
	error::ConvertError,
	shared_types::Rgba8,
};


/// Converts the source palette into CLUT entries.
///
/// The palette must hold exactly 2^bpp colors; short palettes are not padded.
pub fn build_clut(palette: &[Rgba8], depth: TargetDepth, override_transparency: bool) -> Result<Vec<PackedColor15>, ConvertError> {
	let color_count: usize = depth.clut_entries();

	if palette.len() != color_count {
		return Err(ConvertError::PaletteSizeMismatch {
			expected: color_count,
			found: palette.len(),
		});
	}

	let mut clut: Vec<PackedColor15> = Vec::with_capacity(color_count);

	for color in palette {
		clut.push(PackedColor15::from_rgba(*color, override_transparency));
	}

	debug!(colors = clut.len(), override_transparency, "built CLUT");
	return Ok(clut);
}
