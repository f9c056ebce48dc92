use std::ffi::OsStr;

use clap::Parser;

use crate::{
	PathBuf,
	Parameters,
	error::ConvertError,
	shared_types::{ClutPosition, Position},
};

pub const TIM_EXTENSION: &str = "tim";

/// PNG to TIM convert utility.
///
/// PNG files of 4/8/24/32 bits are supported; TIM output is 4/8/16 bits.
#[derive(Debug, Parser)]
#[command(name = "png2tim", version)]
pub struct Cli {
	/// Input PNG file
	pub file: PathBuf,

	/// Pixel position in VRAM halfwords
	#[arg(short = 'p', num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true, default_values_t = [0, 0])]
	pub position: Vec<i32>,

	/// CLUT (palette) position in VRAM halfwords
	#[arg(short = 'c', num_args = 2, value_names = ["X", "Y"], default_values_t = [0u16, 0])]
	pub clut: Vec<u16>,

	/// Force every transparency bit to 0, ignoring the PNG alpha
	#[arg(short = 't')]
	pub transparent: bool,

	/// Print debug logging
	#[arg(short = 'v', long)]
	pub verbose: bool,
}


fn coordinate_pair<T: Copy>(values: &[T], option: &str) -> Result<(T, T), ConvertError> {
	match values {
		[x, y] => Ok((*x, *y)),
		_ => Err(ConvertError::Usage(format!("{} option needs exactly one x y pair", option))),
	}
}


/// Builds the run configuration from parsed arguments.
pub fn validate(cli: Cli) -> Result<Parameters, ConvertError> {
	let (px, py) = coordinate_pair(&cli.position, "-p")?;
	let (cx, cy) = coordinate_pair(&cli.clut, "-c")?;

	// Output replaces the input's extension, so the input must not already be a TIM
	let is_tim: bool = cli.file.extension()
		.and_then(OsStr::to_str)
		.map(|extension| extension.eq_ignore_ascii_case(TIM_EXTENSION))
		.unwrap_or(false);

	if is_tim {
		return Err(ConvertError::Usage(format!(
			"'{}' is already a .{} file and would be overwritten",
			cli.file.display(),
			TIM_EXTENSION
		)));
	}

	let target_path: PathBuf = cli.file.with_extension(TIM_EXTENSION);

	return Ok(Parameters {
		source_path: cli.file,
		target_path: target_path,
		image_position: Position { x: px, y: py },
		clut_position: ClutPosition { x: cx, y: cy },
		override_transparency: cli.transparent,
		verbose: cli.verbose,
	});
}
