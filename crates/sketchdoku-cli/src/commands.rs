//! Subcommand implementations.
//!
//! Every command returns its standard output as a string so the binary only
//! has to print it.

use std::{
    io::{self, Read as _},
    path::Path,
};

use serde::Serialize;
use sketchdoku_canvas::{DrawingDto, drawings_to_dtos, dtos_to_drawings};
use sketchdoku_core::{Canvas, CellAddress, GridSize, Point};
use sketchdoku_grammar::{ClassifiedRulesDto, Compiler, EncodeOptions};

use crate::{CanvasArgs, Cli, CliError, Command};

/// Runs the parsed command line.
///
/// # Errors
///
/// Returns the first error that stops the command.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let compiler = |compact| Compiler::new(cli.size, EncodeOptions { compact });
    match &cli.command {
        Command::Cell { x, y, canvas } => cell(Point::new(*x, *y), canvas.to_canvas(cli.size)),
        Command::Decode { expressions } => decode(&compiler(false), expressions),
        Command::Fmt {
            expressions,
            compact,
        } => fmt(&compiler(*compact), expressions),
        Command::Rules { file, compact } => rules(&compiler(*compact), &read_input(file)?),
        Command::Drawings { file, canvas } => {
            drawings(canvas.to_canvas(cli.size), &read_input(file)?)
        }
    }
}

impl CanvasArgs {
    /// Builds the canvas for a grid of the given size.
    #[must_use]
    pub fn to_canvas(self, size: GridSize) -> Canvas {
        Canvas::new(self.width, self.height, size)
    }
}

#[derive(Debug, Serialize)]
struct CellReport {
    row: u8,
    col: u8,
    index: usize,
    text: String,
}

impl CellReport {
    fn new(cell: CellAddress, size: GridSize) -> Self {
        Self {
            row: cell.row(),
            col: cell.col(),
            index: cell.to_linear(size),
            text: cell.to_string(),
        }
    }
}

/// Prints the cell under `point` as JSON, or `null` if there is none.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn cell(point: Point, canvas: Canvas) -> Result<String, CliError> {
    let report = canvas
        .cell_at(point)
        .map(|cell| CellReport::new(cell, canvas.size));
    if report.is_none() {
        log::info!(
            "({}, {}) is outside the {}x{} canvas",
            point.x,
            point.y,
            canvas.width,
            canvas.height
        );
    }
    Ok(serde_json::to_string(&report)?)
}

/// Decodes each expression into one line of JSON.
///
/// # Errors
///
/// Returns [`CliError::Grammar`] for the first expression that does not decode.
pub fn decode(compiler: &Compiler, expressions: &[String]) -> Result<String, CliError> {
    let mut lines = Vec::with_capacity(expressions.len());
    for text in expressions {
        log::debug!("decoding {text:?}");
        let spec = compiler.decode(text)?;
        lines.push(serde_json::to_string(&spec)?);
    }
    Ok(lines.join("\n"))
}

/// Re-encodes each expression.
///
/// # Errors
///
/// Returns [`CliError::Grammar`] for the first expression that does not decode.
pub fn fmt(compiler: &Compiler, expressions: &[String]) -> Result<String, CliError> {
    let mut lines = Vec::with_capacity(expressions.len());
    for text in expressions {
        let spec = compiler.decode(text)?;
        lines.push(compiler.encode(&spec)?);
    }
    Ok(lines.join("\n"))
}

/// Compiles a classifier response into quoted expressions.
///
/// Rules the compiler rejects are logged and dropped.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the response is not valid JSON.
pub fn rules(compiler: &Compiler, json: &str) -> Result<String, CliError> {
    let response: ClassifiedRulesDto = serde_json::from_str(json)?;
    log::debug!("compiling {} classified rule(s)", response.rules.len());
    let mut lines = Vec::new();
    for (rule, result) in response.rules.iter().zip(compiler.compile_rules(&response)) {
        match result {
            Ok(expression) => lines.push(format!("\"{expression}\"")),
            Err(err) => log::warn!("dropping {} rule: {err}", rule.kind),
        }
    }
    Ok(lines.join("\n"))
}

/// Validates drawings and re-exports them with cell indices.
///
/// # Errors
///
/// Returns [`CliError::Json`] for invalid JSON and [`CliError::Annotation`]
/// for the first invalid drawing.
pub fn drawings(canvas: Canvas, json: &str) -> Result<String, CliError> {
    let dtos: Vec<DrawingDto> = serde_json::from_str(json)?;
    log::debug!("exporting {} drawing(s)", dtos.len());
    let set = dtos_to_drawings(dtos)?;
    Ok(serde_json::to_string_pretty(&drawings_to_dtos(&set, &canvas))?)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.display().to_string(),
        source,
    };
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(read_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(900.0, 900.0, GridSize::NINE)
    }

    #[test]
    fn test_cell() {
        assert_eq!(
            cell(Point::new(150.0, 150.0), canvas()).unwrap(),
            r#"{"row":1,"col":1,"index":10,"text":"R2C2"}"#
        );
        assert_eq!(cell(Point::new(900.0, 10.0), canvas()).unwrap(), "null");
    }

    #[test]
    fn test_fmt() {
        let compiler = Compiler::new(GridSize::NINE, EncodeOptions { compact: true });
        let out = fmt(
            &compiler,
            &["THERMO:r1c1r1c2r1c3".to_owned(), "king".to_owned()],
        )
        .unwrap();
        assert_eq!(out, "thermo:R1C1-3\nking");

        let err = fmt(&compiler, &["thermo:R5-2C3".to_owned()]).unwrap_err();
        assert!(matches!(err, CliError::Grammar(_)));
    }

    #[test]
    fn test_decode() {
        let out = decode(&Compiler::default(), &["taxi:3".to_owned()]).unwrap();
        assert_eq!(out, r#"{"kind":"taxi","scalars":[3],"groups":[]}"#);
    }

    #[test]
    fn test_rules_drop_rejected() {
        let json = r#"{ "rules": [
            { "type": "killer", "cells": [0, 1, 9], "total": 10 },
            { "type": "spiral", "cells": [0] },
            { "type": "even", "cells": [[4, 4]] }
        ] }"#;
        assert_eq!(
            rules(&Compiler::default(), json).unwrap(),
            "\"killer:10;R1C1R1C2R2C1\"\n\"even:R5C5\""
        );
        assert!(matches!(
            rules(&Compiler::default(), "{"),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn test_drawings() {
        let json = r##"[{ "type": "line", "points": [{ "x": 150, "y": 150 }, { "x": 950, "y": 0 }], "color": "red" }]"##;
        let out: serde_json::Value = serde_json::from_str(&drawings(canvas(), json).unwrap()).unwrap();
        assert_eq!(out[0]["color"], "#EF4444");
        assert_eq!(out[0]["cellIndices"], serde_json::json!([10, null]));

        let bad = r#"[{ "type": "line", "points": [{ "x": 1, "y": 1 }], "color": "red" }]"#;
        assert!(matches!(
            drawings(canvas(), bad),
            Err(CliError::Annotation(_))
        ));
    }
}
