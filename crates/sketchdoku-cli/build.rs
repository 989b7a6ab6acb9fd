//! Embeds the commit the `sketchdoku` binary was built from.

use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Provides VERGEN_GIT_SHA and VERGEN_GIT_DIRTY for `version::build_version`.
    let git = GitclBuilder::all_git()?;
    Emitter::default().add_instructions(&git)?.emit()?;
    Ok(())
}
