use std::io;
use thiserror::Error;

use crate::PathBuf;

#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("I/O error")]
	Io {
		#[from]
		source: io::Error,
	},
	#[error("PNG error")]
	Png {
		#[from]
		source: png::DecodingError,
	},
	#[error("image is not palette-indexed (color type {0:?})")]
	NotIndexed(png::ColorType),
	#[error("palette has {found} bits per pixel, {requested} were requested")]
	DepthMismatch {
		requested: u8,
		found: u8,
	},
	#[error("cannot expand {0:?} pixels to RGBA")]
	UnsupportedLayout(png::ColorType),
}

#[derive(Debug, Error)]
pub enum ConvertError {
	#[error("{0}")]
	Usage(String),
	#[error("'{}' not found or not a png", .path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: DecodeError,
	},
	#[error("PNG file must be 4/8/24/32 bits (current PNG is {0} bits)")]
	UnsupportedBitDepth(u8),
	#[error("error loading '{}' as paletted", .path.display())]
	PaletteDecode {
		path: PathBuf,
		#[source]
		source: DecodeError,
	},
	#[error("palette has {found} colors, {expected} are required")]
	PaletteSizeMismatch {
		expected: usize,
		found: usize,
	},
	#[error("image width {width} at {bpp} bpp is not a whole number of VRAM halfwords")]
	UnalignedWidth {
		width: u32,
		bpp: u8,
	},
	#[error("pixel buffer holds {found} bytes, {expected} are required")]
	PixelBufferSize {
		expected: usize,
		found: usize,
	},
	#[error("pixel VRAM coordinates must be within 1024x512 (image at {x},{y} is {width}x{height} halfwords)")]
	InvalidPlacement {
		x: i32,
		y: i32,
		width: u32,
		height: u32,
	},
	#[error("cannot create '{}'", .path.display())]
	OutputCreate {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}
