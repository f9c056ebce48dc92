use crate::{
	bit_depth::TargetDepth,
	color::PackedColor15,
	error::ConvertError,
	shared_types::Rgba8,
};


/// Swaps the two pixels held in each byte.
///
/// PNG stores the leftmost 4 bit pixel in the high nibble, the GPU reads it
/// from the low nibble. Applying this twice gives back the input.
pub fn pack4(input_pixels: &[u8]) -> Vec<u8> {
	input_pixels.iter().map(|byte| byte >> 4 | byte << 4).collect()
}


/// RGBA-8888 to little endian 15 bit colors, one per 4 input bytes.
pub fn pack16(input_pixels: &[u8], override_transparency: bool) -> Vec<u8> {
	let mut output_pixels: Vec<u8> = Vec::with_capacity(input_pixels.len() / 2);

	for rgba in input_pixels.chunks_exact(4) {
		let color: Rgba8 = Rgba8::new(rgba[0], rgba[1], rgba[2], rgba[3]);
		output_pixels.extend_from_slice(&PackedColor15::from_rgba(color, override_transparency).to_le_bytes());
	}

	return output_pixels;
}


/// Byte length of a packed image, `width * height * bpp / 8`.
pub fn packed_size(width: u32, height: u32, depth: TargetDepth) -> Result<usize, ConvertError> {
	let bits: u64 = width as u64 * height as u64 * depth.bits() as u64;

	if bits % 8 != 0 {
		return Err(ConvertError::UnalignedWidth {
			width: width,
			bpp: depth.bits(),
		});
	}

	return Ok((bits / 8) as usize);
}


/// Turns a decoded pixel buffer into TIM pixel data.
///
/// `input_pixels` holds packed indices for paletted depths and RGBA-8888 for
/// 16 bpp. The result is always a new buffer.
pub fn pack_pixels(input_pixels: &[u8], width: u32, height: u32, depth: TargetDepth, override_transparency: bool) -> Result<Vec<u8>, ConvertError> {
	let size: usize = packed_size(width, height, depth)?;

	// 16 bpp input is RGBA, twice as wide as the output
	let required: usize = match depth {
		TargetDepth::Sixteen => size * 2,
		_ => size,
	};

	if input_pixels.len() < required {
		return Err(ConvertError::PixelBufferSize {
			expected: required,
			found: input_pixels.len(),
		});
	}

	let source: &[u8] = &input_pixels[..required];

	let output_pixels: Vec<u8> = match depth {
		TargetDepth::Four => pack4(source),
		TargetDepth::Eight => source.to_vec(),
		TargetDepth::Sixteen => pack16(source, override_transparency),
	};

	return Ok(output_pixels);
}
