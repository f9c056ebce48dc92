use std::io;

use bitflags::bitflags;
use bitstream_io::{ByteWrite, ByteWriter, LittleEndian};

use crate::bit_depth::TargetDepth;

pub const MAGIC: u32 = 0x10;

/// Size of a block header: byte count, x, y, width, height.
pub const SUB_HEADER_SIZE: u32 = 12;

bitflags! {
	#[derive(Clone, Copy, Debug, PartialEq, Eq)]
	pub struct Flags: u32 {
		// 4 bpp is the absence of both depth bits
		const BPP_8 = 1;
		const BPP_16 = 2;
		const INDEXED = 8;
	}
}

impl Flags {
	pub fn for_depth(depth: TargetDepth) -> Flags {
		match depth {
			TargetDepth::Four => Flags::INDEXED,
			TargetDepth::Eight => Flags::INDEXED | Flags::BPP_8,
			TargetDepth::Sixteen => Flags::BPP_16,
		}
	}
}

/// Header shared by the CLUT and pixel blocks. `size` counts the header
/// itself plus the payload that follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubHeader {
	pub size: u32,
	pub x: u16,
	pub y: u16,
	pub width: u16,
	pub height: u16,
}

impl SubHeader {
	pub fn new(payload_len: usize, x: u16, y: u16, width: u16, height: u16) -> SubHeader {
		SubHeader {
			size: SUB_HEADER_SIZE + payload_len as u32,
			x: x,
			y: y,
			width: width,
			height: height,
		}
	}

	pub fn write<W>(&self, writer: &mut ByteWriter<W, LittleEndian>) -> io::Result<()>
	where
		W: io::Write,
	{
		writer.write::<u32>(self.size)?;
		writer.write::<u16>(self.x)?;
		writer.write::<u16>(self.y)?;
		writer.write::<u16>(self.width)?;
		writer.write::<u16>(self.height)?;
		Ok(())
	}
}


/// Writes the 8 byte file header: magic, then flags.
pub fn write_header<W>(writer: &mut ByteWriter<W, LittleEndian>, flags: Flags) -> io::Result<()>
where
	W: io::Write,
{
	writer.write::<u32>(MAGIC)?;
	writer.write::<u32>(flags.bits())?;
	Ok(())
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_flags() {
		assert_eq!(Flags::for_depth(TargetDepth::Four).bits(), 8);
		assert_eq!(Flags::for_depth(TargetDepth::Eight).bits(), 9);
		assert_eq!(Flags::for_depth(TargetDepth::Sixteen).bits(), 2);
	}

	#[test]
	fn test_header_bytes() {
		let mut data: Vec<u8> = Vec::new();
		{
			let mut writer = ByteWriter::endian(&mut data, LittleEndian);
			write_header(&mut writer, Flags::for_depth(TargetDepth::Eight)).unwrap();
		}
		assert_eq!(data, vec![0x10, 0, 0, 0, 0x09, 0, 0, 0]);
	}

	#[test]
	fn test_sub_header_bytes() {
		let header = SubHeader::new(32, 0x0102, 0x0304, 16, 1);
		assert_eq!(header.size, 44);

		let mut data: Vec<u8> = Vec::new();
		{
			let mut writer = ByteWriter::endian(&mut data, LittleEndian);
			header.write(&mut writer).unwrap();
		}
		assert_eq!(data, vec![44, 0, 0, 0, 0x02, 0x01, 0x04, 0x03, 16, 0, 1, 0]);
	}
}
