use crate::PathBuf;

#[derive(Clone, Debug)]
pub struct Parameters {
	pub source_path: PathBuf,
	pub target_path: PathBuf,
	pub image_position: Position,
	pub clut_position: ClutPosition,
	pub override_transparency: bool,
	pub verbose: bool,
}

/// Image origin in VRAM halfwords. Signed so that negative requests reach
/// the placement check instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
	pub x: i32,
	pub y: i32,
}

/// CLUT origin, written to the file as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClutPosition {
	pub x: u16,
	pub y: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8 {
	pub red: u8,
	pub green: u8,
	pub blue: u8,
	pub alpha: u8,
}

impl Rgba8 {
	pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Rgba8 {
		Rgba8 { red, green, blue, alpha }
	}
}

/// What the decoder found in the file, before any transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeFormat {
	pub color_type: png::ColorType,
	pub bits_per_pixel: u8,
}

/// Pixel layout requested from an image source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelRequest {
	/// 4 bytes per pixel, R G B A.
	Rgba8,
	/// Packed palette indices at the given bit depth, high bits first.
	Indexed(u8),
}

#[derive(Debug)]
pub struct DecodedImage {
	pub width: u32,
	pub height: u32,
	pub native: NativeFormat,
	pub pixels: Vec<u8>,
	pub palette: Vec<Rgba8>,
}
