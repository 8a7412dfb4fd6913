//! The one command this tool has: analyse the project and print the script.

use anyhow::Result;
use std::env;
use std::io::Write;
use std::path::PathBuf;

use super::Cli;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{ProjectContext, RenderContext, VendorError};
use crate::render::render_vendor_script;
use crate::scan::ImportCollector;
use crate::utils::import_prefix_from_gopath;

pub fn run(cli: Cli) -> Result<()> {
    // Doubles as the root-must-exist check.
    let root = cli
        .directory
        .canonicalize()
        .map_err(|e| VendorError::filesystem(cli.directory.clone(), e))?;

    let config = load_config(&root, cli.config.as_deref())?;
    let overrides = CliOverrides { recursive: cli.recursive, submodules: cli.submodules };
    let settings = merge_cli_with_config(&overrides, &config);

    let gopath = env::var("GOPATH").ok();
    let project = ProjectContext {
        root: root.clone(),
        import_prefix: import_prefix_from_gopath(&root, gopath.as_deref()),
    };
    tracing::debug!(
        root = %project.root.display(),
        prefix = %project.import_prefix,
        recursive = settings.recursive,
        "analysing project"
    );

    let mut collector = ImportCollector::new(project.root.clone())
        .recursive(settings.recursive)
        .import_prefix(project.import_prefix.clone())
        .extra_prune_dirs(settings.exclude.clone());
    let packages = collector.collect()?;
    tracing::debug!(stats = ?collector.stats(), "walk finished");

    // Nothing external to vendor: exit silently, not even an empty script.
    if packages.is_empty() {
        tracing::debug!("no external imports found; nothing to do");
        return Ok(());
    }

    if settings.submodules && git2::Repository::discover(&project.root).is_err() {
        tracing::warn!(
            "{} is not inside a git repository; the generated submodule commands will fail",
            project.root.display()
        );
    }

    let cwd = env::current_dir().map_err(|e| VendorError::filesystem(PathBuf::from("."), e))?;
    let ctx = RenderContext {
        cwd: cwd.display().to_string(),
        packages,
        add_submodules: settings.submodules,
        package_prefix: project.import_prefix,
    };

    let script = render_vendor_script(&ctx);
    std::io::stdout().lock().write_all(script.as_bytes())?;
    Ok(())
}
