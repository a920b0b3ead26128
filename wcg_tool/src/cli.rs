use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lib_wcg::EncoderOptions;
use log::LevelFilter;

use crate::command::{convert::convert, info::info, to_png::to_png, to_wcg::to_wcg};
use crate::error::ToolError;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a WCG image into PNG format
    ToPng {
        /// Input file (.wcg)
        input: PathBuf,
        /// Optional output path. If not specified, the extension will be replaced with .png
        output: Option<PathBuf>,
    },
    /// Convert an image (PNG, JPEG, BMP...) into WCG format
    ToWcg {
        /// Input file (e.g. PNG)
        input: PathBuf,
        /// Optional output path. If not specified, the extension will be replaced with .wcg
        output: Option<PathBuf>,
        /// Write exact palettes instead of padding them past 4096 entries
        #[arg(long = "no-pad-palette")]
        no_pad_palette: bool,
    },
    /// Convert many files in parallel: .wcg → .png and images → .wcg, next to each input
    Convert {
        #[arg(required = true, value_name = "PATHS")]
        paths: Vec<PathBuf>,
        /// Write exact palettes instead of padding them past 4096 entries
        #[arg(long = "no-pad-palette")]
        no_pad_palette: bool,
    },
    /// Print header and plane block information of a WCG file
    Info {
        input: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(
    name = "wcg-tool",
    version,
    about = "WCG ↔ PNG converter",
    long_about = "wcg-tool converts visual novel WCG images to and from common image formats."
)]
pub struct Cli {
    /// Log codec internals
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn encoder_options(no_pad_palette: bool) -> EncoderOptions {
    EncoderOptions {
        pad_palette: !no_pad_palette,
    }
}

pub fn run_command(cmd: Command) -> Result<(), ToolError> {
    match cmd {
        Command::ToPng { input, output } => to_png(&input, output.as_ref()).map(|_| ()),
        Command::ToWcg {
            input,
            output,
            no_pad_palette,
        } => to_wcg(&input, output.as_ref(), &encoder_options(no_pad_palette)).map(|_| ()),
        Command::Convert {
            paths,
            no_pad_palette,
        } => convert(&paths, &encoder_options(no_pad_palette)),
        Command::Info { input } => info(&input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_to_wcg() {
        let cli = Cli::try_parse_from(["wcg-tool", "-v", "to-wcg", "in.png", "--no-pad-palette"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        match cli.command {
            Command::ToWcg {
                input,
                output,
                no_pad_palette,
            } => {
                assert_eq!(input, PathBuf::from("in.png"));
                assert_eq!(output, None);
                assert!(no_pad_palette);
                assert!(!encoder_options(no_pad_palette).pad_palette);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_paths() {
        assert!(Cli::try_parse_from(["wcg-tool", "convert"]).is_err());
    }
}
