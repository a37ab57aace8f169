use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Emits VERGEN_GIT_SHA (short) and VERGEN_GIT_DESCRIBE, plus rerun hooks on
    // the current git ref.
    let git = GitclBuilder::default()
        .sha(true)
        .describe(true, false, None)
        .build()?;
    Emitter::default().add_instructions(&git)?.emit()?;
    Ok(())
}
