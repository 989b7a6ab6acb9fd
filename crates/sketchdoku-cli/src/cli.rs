//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sketchdoku_core::GridSize;

/// Converts grid annotations into solver constraint expressions.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Side length of the grid.
    #[arg(long, global = true, value_name = "N", default_value = "9", value_parser = parse_grid_size)]
    pub size: GridSize,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map a canvas point to the grid cell under it.
    Cell {
        /// Horizontal coordinate.
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Vertical coordinate.
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Decode expressions and print them as JSON, one per line.
    Decode {
        /// Expressions such as `killer:10;R1C1R1C2`.
        #[arg(required = true, value_name = "EXPR")]
        expressions: Vec<String>,
    },
    /// Decode expressions and print them again in canonical form.
    Fmt {
        /// Expressions such as `killer:10;R1C1R1C2`.
        #[arg(required = true, value_name = "EXPR")]
        expressions: Vec<String>,
        /// Fold cell groups into ranges and lists.
        #[arg(long)]
        compact: bool,
    },
    /// Compile a classifier response into quoted expressions, one per line.
    Rules {
        /// JSON file with `{"rules": [...]}`, or `-` for standard input.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Fold cell groups into ranges and lists.
        #[arg(long)]
        compact: bool,
    },
    /// Validate drawings and export them with the cell under each point.
    Drawings {
        /// JSON file with an array of drawings, or `-` for standard input.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
}

/// Canvas extent in the same units as the points.
#[derive(Debug, Clone, Copy, Args)]
pub struct CanvasArgs {
    /// Canvas width.
    #[arg(long, value_name = "W", default_value_t = 900.0)]
    pub width: f64,
    /// Canvas height.
    #[arg(long, value_name = "H", default_value_t = 900.0)]
    pub height: f64,
}

fn parse_grid_size(s: &str) -> Result<GridSize, String> {
    let size = s.parse::<u8>().map_err(|e| e.to_string())?;
    GridSize::new(size).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cell() {
        let cli = Cli::try_parse_from(["sketchdoku", "cell", "150", "-3", "--width", "450"]).unwrap();
        assert_eq!(cli.size, GridSize::NINE);
        let Command::Cell { x, y, canvas } = cli.command else {
            panic!("expected cell");
        };
        assert!((x - 150.0).abs() < f64::EPSILON);
        assert!((y + 3.0).abs() < f64::EPSILON);
        assert!((canvas.width - 450.0).abs() < f64::EPSILON);
        assert!((canvas.height - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_size_bounds() {
        assert!(Cli::try_parse_from(["sketchdoku", "--size", "31", "decode", "king"]).is_ok());
        assert!(Cli::try_parse_from(["sketchdoku", "--size", "32", "decode", "king"]).is_err());
        assert!(Cli::try_parse_from(["sketchdoku", "decode", "king", "--size", "0"]).is_err());
        assert!(Cli::try_parse_from(["sketchdoku", "decode"]).is_err());
    }
}
