use std::path::{Path, PathBuf};

use tendril_codegen::{GenerateTarget, ScaffoldGenerator};
use tendril_core::{GeneratorConfig, TendrilError, TestFramework};

pub fn run(
    project_root: &Path,
    target: &GenerateTarget,
    path: Option<PathBuf>,
    test: Option<TestFramework>,
) -> Result<(), TendrilError> {
    let config = GeneratorConfig::load(project_root)?.with_overrides(path, test);
    config.validate()?;
    tracing::debug!(?config, root = %project_root.display(), "resolved configuration");

    let generator = ScaffoldGenerator::new(project_root.to_path_buf(), config)?;
    let report = generator.generate(target)?;

    for file in &report.files {
        println!("{:>10}  {}", file.outcome.verb(), file.relative.display());
    }
    println!(
        "✓ Generated {} {} in {} ({} files)",
        target.kind(),
        target,
        target.app(),
        report.files.len()
    );

    Ok(())
}
