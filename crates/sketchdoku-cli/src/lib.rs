//! Command line front end for sketchdoku.
//!
//! Exposes the grid mapping, the constraint grammar and the drawing export to
//! callers that sit outside the Rust process, such as the server that talks to
//! the classifier and the solving engine.

pub mod commands;
pub mod version;

mod cli;
mod error;

pub use self::{
    cli::{CanvasArgs, Cli, Command},
    error::CliError,
};
