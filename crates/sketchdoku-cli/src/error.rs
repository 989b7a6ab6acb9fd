use sketchdoku_canvas::AnnotationError;
use sketchdoku_grammar::GrammarError;

/// Errors that stop a subcommand.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    /// An input file could not be read.
    #[display("failed to read {path}: {source}")]
    Read {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Input or output JSON was invalid.
    #[display("invalid JSON: {_0}")]
    Json(#[from] serde_json::Error),
    /// An expression could not be decoded or encoded.
    #[display("{_0}")]
    Grammar(#[from] GrammarError),
    /// A drawing was rejected.
    #[display("{_0}")]
    Annotation(#[from] AnnotationError),
}
