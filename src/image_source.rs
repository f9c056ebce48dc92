use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::{
	error::DecodeError,
	shared_types::{DecodedImage, NativeFormat, PixelRequest, Rgba8},
};

/// Anything that can turn a file into pixels for the converter.
pub trait ImageSource {
	fn decode(&self, path: &Path, request: PixelRequest) -> Result<DecodedImage, DecodeError>;
}

/// PNG files, decoded with the `png` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSource;

impl ImageSource for PngSource {
	fn decode(&self, path: &Path, request: PixelRequest) -> Result<DecodedImage, DecodeError> {
		match request {
			PixelRequest::Rgba8 => get_png_rgba(path),
			PixelRequest::Indexed(bit_depth) => get_png_indexed(path, bit_depth),
		}
	}
}


/// Bits per pixel as the file stores them. Only RGB and RGBA count every
/// channel; grayscale and indexed images report their sample depth.
fn native_format(info: &png::Info) -> NativeFormat {
	let sample_bits: u8 = info.bit_depth as u8;

	let bits_per_pixel: u8 = match info.color_type {
		png::ColorType::Rgb | png::ColorType::Rgba => sample_bits * info.color_type.samples() as u8,
		_ => sample_bits,
	};

	NativeFormat {
		color_type: info.color_type,
		bits_per_pixel: bits_per_pixel,
	}
}


fn open_png(path: &Path, transformations: png::Transformations) -> Result<png::Reader<BufReader<File>>, DecodeError> {
	let file: File = File::open(path)?;

	let mut decoder = png::Decoder::new(BufReader::new(file));
	decoder.set_transformations(transformations);

	Ok(decoder.read_info()?)
}


fn get_png_rgba(path: &Path) -> Result<DecodedImage, DecodeError> {
	let mut reader = open_png(path, png::Transformations::EXPAND | png::Transformations::STRIP_16)?;
	let native: NativeFormat = native_format(reader.info());

	let mut buffer: Vec<u8> = vec![0; reader.output_buffer_size()];
	let frame = reader.next_frame(&mut buffer)?;
	let source_bytes: &[u8] = &buffer[..frame.buffer_size()];

	// Everything is 8 bits per sample after EXPAND | STRIP_16
	let pixel_count: usize = frame.width as usize * frame.height as usize;
	let mut pixels: Vec<u8> = Vec::with_capacity(pixel_count * 4);

	match frame.color_type {
		png::ColorType::Rgba => pixels.extend_from_slice(source_bytes),

		png::ColorType::Rgb => {
			for rgb in source_bytes.chunks_exact(3) {
				pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 0xFF]);
			}
		},

		png::ColorType::GrayscaleAlpha => {
			for ga in source_bytes.chunks_exact(2) {
				pixels.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
			}
		},

		png::ColorType::Grayscale => {
			for g in source_bytes.iter() {
				pixels.extend_from_slice(&[*g, *g, *g, 0xFF]);
			}
		},

		other => return Err(DecodeError::UnsupportedLayout(other)),
	}

	debug!(path = %path.display(), width = frame.width, height = frame.height, "decoded PNG as RGBA");

	Ok(DecodedImage {
		width: frame.width,
		height: frame.height,
		native: native,
		pixels: pixels,
		palette: vec![],
	})
}


fn get_png_indexed(path: &Path, bit_depth: u8) -> Result<DecodedImage, DecodeError> {
	let mut reader = open_png(path, png::Transformations::IDENTITY)?;
	let native: NativeFormat = native_format(reader.info());

	if native.color_type != png::ColorType::Indexed {
		return Err(DecodeError::NotIndexed(native.color_type));
	}

	if native.bits_per_pixel != bit_depth {
		return Err(DecodeError::DepthMismatch {
			requested: bit_depth,
			found: native.bits_per_pixel,
		});
	}

	// Colors without a tRNS entry are opaque
	let mut palette: Vec<Rgba8> = Vec::new();

	if let Some(ref pal_data) = reader.info().palette {
		let alpha: &[u8] = reader.info().trns.as_deref().unwrap_or(&[]);

		for (index, rgb) in pal_data.chunks_exact(3).enumerate() {
			palette.push(Rgba8::new(rgb[0], rgb[1], rgb[2], alpha.get(index).copied().unwrap_or(0xFF)));
		}
	}

	let mut buffer: Vec<u8> = vec![0; reader.output_buffer_size()];
	let frame = reader.next_frame(&mut buffer)?;
	buffer.truncate(frame.buffer_size());

	debug!(path = %path.display(), colors = palette.len(), bit_depth, "decoded PNG as indexed");

	Ok(DecodedImage {
		width: frame.width,
		height: frame.height,
		native: native,
		pixels: buffer,
		palette: palette,
	})
}


#[cfg(test)]
mod tests {
	use std::io::BufWriter;
	use std::path::PathBuf;

	use super::*;

	struct PngFixture<'a> {
		width: u32,
		height: u32,
		color: png::ColorType,
		depth: png::BitDepth,
		data: &'a [u8],
		palette: Option<Vec<u8>>,
		trns: Option<Vec<u8>>,
	}

	fn write_png(dir: &Path, name: &str, fixture: PngFixture) -> PathBuf {
		let path: PathBuf = dir.join(name);
		let file = File::create(&path).unwrap();

		let mut encoder = png::Encoder::new(BufWriter::new(file), fixture.width, fixture.height);
		encoder.set_color(fixture.color);
		encoder.set_depth(fixture.depth);

		if let Some(palette) = fixture.palette {
			encoder.set_palette(palette);
		}

		if let Some(trns) = fixture.trns {
			encoder.set_trns(trns);
		}

		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(fixture.data).unwrap();
		writer.finish().unwrap();
		path
	}

	#[test]
	fn test_rgba() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_png(dir.path(), "rgba.png", PngFixture {
			width: 2,
			height: 1,
			color: png::ColorType::Rgba,
			depth: png::BitDepth::Eight,
			data: &[255, 255, 255, 255, 255, 0, 0, 0],
			palette: None,
			trns: None,
		});

		let image = PngSource.decode(&path, PixelRequest::Rgba8).unwrap();
		assert_eq!(image.width, 2);
		assert_eq!(image.height, 1);
		assert_eq!(image.native.bits_per_pixel, 32);
		assert_eq!(image.pixels, vec![255, 255, 255, 255, 255, 0, 0, 0]);
	}

	#[test]
	fn test_rgb_gets_opaque_alpha() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_png(dir.path(), "rgb.png", PngFixture {
			width: 1,
			height: 1,
			color: png::ColorType::Rgb,
			depth: png::BitDepth::Eight,
			data: &[10, 20, 30],
			palette: None,
			trns: None,
		});

		let image = PngSource.decode(&path, PixelRequest::Rgba8).unwrap();
		assert_eq!(image.native.bits_per_pixel, 24);
		assert_eq!(image.pixels, vec![10, 20, 30, 255]);
	}

	#[test]
	fn test_grayscale_reports_sample_depth() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_png(dir.path(), "gray.png", PngFixture {
			width: 2,
			height: 1,
			color: png::ColorType::Grayscale,
			depth: png::BitDepth::Eight,
			data: &[0, 200],
			palette: None,
			trns: None,
		});

		let image = PngSource.decode(&path, PixelRequest::Rgba8).unwrap();
		assert_eq!(image.native.bits_per_pixel, 8);
		assert_eq!(image.pixels, vec![0, 0, 0, 255, 200, 200, 200, 255]);

		assert!(matches!(
			PngSource.decode(&path, PixelRequest::Indexed(8)),
			Err(DecodeError::NotIndexed(png::ColorType::Grayscale))
		));
	}

	#[test]
	fn test_indexed_4bpp() {
		let dir = tempfile::tempdir().unwrap();
		let palette: Vec<u8> = (0..16u8).flat_map(|i| [i * 16, i, 0]).collect();
		let path = write_png(dir.path(), "pal4.png", PngFixture {
			width: 4,
			height: 1,
			color: png::ColorType::Indexed,
			depth: png::BitDepth::Four,
			data: &[0x01, 0x23],
			palette: Some(palette),
			trns: Some(vec![0]),
		});

		let rgba = PngSource.decode(&path, PixelRequest::Rgba8).unwrap();
		assert_eq!(rgba.native.color_type, png::ColorType::Indexed);
		assert_eq!(rgba.native.bits_per_pixel, 4);
		assert_eq!(rgba.pixels.len(), 16);

		let image = PngSource.decode(&path, PixelRequest::Indexed(4)).unwrap();
		assert_eq!(image.pixels, vec![0x01, 0x23]);
		assert_eq!(image.palette.len(), 16);
		assert_eq!(image.palette[0], Rgba8::new(0, 0, 0, 0));
		assert_eq!(image.palette[3], Rgba8::new(48, 3, 0, 255));
	}

	#[test]
	fn test_indexed_depth_mismatch() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_png(dir.path(), "pal8.png", PngFixture {
			width: 2,
			height: 1,
			color: png::ColorType::Indexed,
			depth: png::BitDepth::Eight,
			data: &[0, 1],
			palette: Some(vec![0, 0, 0, 255, 255, 255]),
			trns: None,
		});

		assert!(matches!(
			PngSource.decode(&path, PixelRequest::Indexed(4)),
			Err(DecodeError::DepthMismatch { requested: 4, found: 8 })
		));
	}

	#[test]
	fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = PngSource.decode(&dir.path().join("nope.png"), PixelRequest::Rgba8);
		assert!(matches!(result, Err(DecodeError::Io { .. })));
	}

	#[test]
	fn test_not_a_png() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("text.png");
		std::fs::write(&path, b"definitely not a png").unwrap();

		assert!(matches!(PngSource.decode(&path, PixelRequest::Rgba8), Err(DecodeError::Png { .. })));
	}
}
