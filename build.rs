use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    // Shown by `iss_speed --version` so result files can be traced to a build
    EmitBuilder::builder()
        .build_date()
        .git_sha(true)
        .emit()?;
    Ok(())
}
