use crate::{
	error::ConvertError,
	shared_types::Position,
};

/// VRAM size in halfwords.
pub const VRAM_WIDTH: i64 = 1024;
pub const VRAM_HEIGHT: i64 = 512;


/// Checks that an image of `vram_width` x `height` halfwords placed at
/// `position` stays inside VRAM.
pub fn validate_placement(position: Position, vram_width: u32, height: u32) -> Result<(), ConvertError> {
	let x: i64 = position.x as i64;
	let y: i64 = position.y as i64;

	if x < 0 || y < 0 || x + vram_width as i64 > VRAM_WIDTH || y + height as i64 > VRAM_HEIGHT {
		return Err(ConvertError::InvalidPlacement {
			x: position.x,
			y: position.y,
			width: vram_width,
			height: height,
		});
	}

	return Ok(());
}
