use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use bitstream_io::{ByteWrite, ByteWriter, LittleEndian};
use tracing::{debug, info};

use crate::{
	Parameters,
	bit_depth,
	bit_depth::TargetDepth,
	color::PackedColor15,
	error::ConvertError,
	image_source::ImageSource,
	palette,
	pixel_pack,
	shared_types::{ClutPosition, DecodedImage, PixelRequest},
	tim_header,
	tim_header::{Flags, SubHeader},
	vram,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ClutBlock {
	pub position: ClutPosition,
	pub colors: Vec<PackedColor15>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBlock {
	pub x: u16,
	pub y: u16,
	pub vram_width: u16,
	pub height: u16,
	pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimImage {
	pub flags: Flags,
	pub clut: Option<ClutBlock>,
	pub pixels: PixelBlock,
}

impl ClutBlock {
	pub fn header(&self) -> SubHeader {
		SubHeader::new(self.colors.len() * 2, self.position.x, self.position.y, self.colors.len() as u16, 1)
	}
}

impl PixelBlock {
	pub fn header(&self) -> SubHeader {
		SubHeader::new(self.data.len(), self.x, self.y, self.vram_width, self.height)
	}
}

impl TimImage {
	/// Serializes the whole file into memory.
	pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
		let mut data: Vec<u8> = Vec::new();
		let mut writer = ByteWriter::endian(&mut data, LittleEndian);

		tim_header::write_header(&mut writer, self.flags)?;

		if let Some(ref clut) = self.clut {
			clut.header().write(&mut writer)?;

			for color in clut.colors.iter() {
				writer.write::<u16>(color.0)?;
			}
		}

		self.pixels.header().write(&mut writer)?;
		writer.write_bytes(&self.pixels.data)?;

		drop(writer);
		Ok(data)
	}
}


/// Runs the conversion pipeline for one file, without touching the output.
pub fn convert<S>(source: &S, parameters: &Parameters) -> Result<TimImage, ConvertError>
where
	S: ImageSource + ?Sized,
{
	let path: &Path = &parameters.source_path;

	let image: DecodedImage = source.decode(path, PixelRequest::Rgba8).map_err(|error| ConvertError::Decode {
		path: path.to_path_buf(),
		source: error,
	})?;

	debug!(
		width = image.width,
		height = image.height,
		color_type = ?image.native.color_type,
		bpp = image.native.bits_per_pixel,
		"decoded source"
	);

	let depth: TargetDepth = bit_depth::select_target_depth(image.native.bits_per_pixel)?;
	let vram_width: u32 = bit_depth::vram_width(image.width, depth)?;
	vram::validate_placement(parameters.image_position, vram_width, image.height)?;

	info!(bpp = depth.bits(), vram_width, "selected target depth");

	// Paletted targets need the indices, not the expanded colors
	let image: DecodedImage = if depth.is_paletted() {
		drop(image);
		source.decode(path, PixelRequest::Indexed(depth.bits())).map_err(|error| ConvertError::PaletteDecode {
			path: path.to_path_buf(),
			source: error,
		})?
	} else {
		image
	};

	// Dimensions now come from the second decode
	let vram_width: u32 = bit_depth::vram_width(image.width, depth)?;
	vram::validate_placement(parameters.image_position, vram_width, image.height)?;

	let clut: Option<ClutBlock> = if depth.is_paletted() {
		Some(ClutBlock {
			position: parameters.clut_position,
			colors: palette::build_clut(&image.palette, depth, parameters.override_transparency)?,
		})
	} else {
		None
	};

	let data: Vec<u8> = pixel_pack::pack_pixels(
		&image.pixels,
		image.width,
		image.height,
		depth,
		parameters.override_transparency,
	)?;

	// In range after placement validation: x, y >= 0, x + w <= 1024, y + h <= 512
	return Ok(TimImage {
		flags: Flags::for_depth(depth),
		clut: clut,
		pixels: PixelBlock {
			x: parameters.image_position.x as u16,
			y: parameters.image_position.y as u16,
			vram_width: vram_width as u16,
			height: image.height as u16,
			data: data,
		},
	});
}


/// Writes a serialized TIM to `target_path`. The file is only created once
/// the image is fully serialized, and is removed again if writing fails.
pub fn write_tim(target_path: &Path, tim: &TimImage) -> Result<(), ConvertError> {
	let output_error = |source: io::Error| ConvertError::OutputCreate {
		path: target_path.to_path_buf(),
		source: source,
	};

	let bytes: Vec<u8> = tim.to_bytes().map_err(output_error)?;
	let mut tim_file: File = File::create(target_path).map_err(output_error)?;

	if let Err(source) = tim_file.write_all(&bytes).and_then(|_| tim_file.flush()) {
		drop(tim_file);
		let _ = fs::remove_file(target_path);
		return Err(output_error(source));
	}

	debug!(path = %target_path.display(), bytes = bytes.len(), "wrote TIM");
	return Ok(());
}
