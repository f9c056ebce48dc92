use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub mod shared_types;
pub mod error;
pub mod param_validator;
pub mod bit_depth;
pub mod color;
pub mod palette;
pub mod pixel_pack;
pub mod vram;
pub mod image_source;
pub mod tim_header;
pub mod tim_make;

use crate::{
	error::ConvertError,
	image_source::{ImageSource, PngSource},
	param_validator::Cli,
	shared_types::Parameters,
};


pub fn main() -> ExitCode {
	let cli: Cli = match Cli::try_parse() {
		Ok(cli) => cli,

		Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
			let _ = error.print();
			return ExitCode::SUCCESS;
		},

		Err(error) => {
			println!("{}", error.render());
			help_message();
			return ExitCode::FAILURE;
		},
	};

	let parameters: Parameters = match param_validator::validate(cli) {
		Ok(parameters) => parameters,

		Err(error) => {
			report(&error);
			help_message();
			return ExitCode::FAILURE;
		},
	};

	init_logging(parameters.verbose);

	match process_file(&PngSource, &parameters) {
		Ok(()) => {
			println!("Image converted to '{}'", parameters.target_path.display());
			ExitCode::SUCCESS
		},

		Err(error) => {
			report(&error);
			ExitCode::FAILURE
		},
	}
}


pub fn help_message() {
	println!();
	println!("PNG to TIM convert utility v{}", env!("CARGO_PKG_VERSION"));
	println!();
	println!("Usage: png2tim [-p x y] [-c x y] [-t] [-v] file.png");
	println!();
	println!("PNG files supported: 4/8/24/32 bits. TIM output: 4/8/16 bits only.");
	println!("    -p x y   Pixel x y position in VRAM");
	println!("    -c x y   CLUT (palette) x y position in VRAM");
	println!("    -t       Force black to be transparent (override the PNG alpha)");
	println!("    -v       Print debug logging");
	println!();
}


fn init_logging(verbose: bool) {
	let level: Level = if verbose { Level::DEBUG } else { Level::WARN };

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
		.init();
}


/// Prints an error followed by its chain of causes.
fn report(error: &ConvertError) {
	println!("{}", error);

	let mut cause: Option<&dyn Error> = error.source();

	while let Some(inner) = cause {
		println!("\t{}", inner);
		cause = inner.source();
	}
}


fn process_file<S>(source: &S, parameters: &Parameters) -> Result<(), ConvertError>
where
	S: ImageSource + ?Sized,
{
	tracing::info!("Converting {:?} -> {:?}", parameters.source_path, parameters.target_path);

	let tim = tim_make::convert(source, parameters)?;
	tim_make::write_tim(&parameters.target_path, &tim)
}
