use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use docpages::{Manifest, PageRenderer, PageWriter, WriteOutcome};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn cli() -> Command {
    Command::new("docpages")
        .about("Render reStructuredText API pages from a package tree manifest")
        .arg(
            Arg::new("manifest")
                .help("JSON manifest describing the package tree, or - for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory receiving one page per package")
                .default_value("."),
        )
        .arg(
            Arg::new("suffix")
                .short('s')
                .long("suffix")
                .help("File suffix for generated pages")
                .default_value("rst"),
        )
        .arg(
            Arg::new("root-package")
                .long("root-package")
                .help("Package whose page is titled \"API Documentation\""),
        )
        .arg(
            Arg::new("module-first")
                .short('M')
                .long("module-first")
                .help("Put module documentation before the children's table of contents")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .short('d')
                .long("max-depth")
                .help("Maximum depth requested from each toctree")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("automodule-option")
                .long("automodule-option")
                .help("Flag for the automodule directive; repeat to pass several")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite existing files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Report the files that would be written without writing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print pages to standard output instead of writing files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "docpages=debug" } else { "docpages=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn read_manifest(source: &str) -> Result<Manifest> {
    let manifest = if source == "-" {
        Manifest::from_reader(io::stdin().lock())
            .context("Failed to parse manifest from stdin")?
    } else {
        let json = fs::read_to_string(source)
            .with_context(|| format!("Failed to read manifest {}", source))?;
        Manifest::from_json(&json)
            .with_context(|| format!("Failed to parse manifest {}", source))?
    };
    Ok(manifest)
}

/// Command-line flags take precedence over the manifest's global options.
fn apply_overrides(manifest: &mut Manifest, matches: &ArgMatches) {
    if let Some(root) = matches.get_one::<String>("root-package") {
        manifest.set_root_package(root.clone());
    }
    if matches.get_flag("module-first") {
        manifest.set_option("module_first", true);
    }
    if let Some(depth) = matches.get_one::<u32>("max-depth") {
        manifest.set_option("max_depth", *depth);
    }
    if let Some(options) = matches.get_many::<String>("automodule-option") {
        manifest.set_option("automodule_options", options.cloned().collect::<Vec<_>>());
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let source = matches
        .get_one::<String>("manifest")
        .context("manifest argument is required")?;
    let mut manifest = read_manifest(source)?;
    apply_overrides(&mut manifest, &matches);

    let nodes = manifest.nodes().context("Invalid package manifest")?;
    let renderer = PageRenderer::new(manifest.render_context());
    debug!(root = %renderer.context().root_package, "rendering {} packages", nodes.len());

    // Render everything up front so a bad node leaves no files behind
    let pages = renderer.render_all(&nodes).context("Failed to render pages")?;

    if matches.get_flag("stdout") {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for page in &pages {
            out.write_all(page.contents.as_bytes())?;
        }
        return Ok(());
    }

    let output_dir = matches
        .get_one::<String>("output-dir")
        .map(PathBuf::from)
        .unwrap_or_default();
    let suffix = matches
        .get_one::<String>("suffix")
        .cloned()
        .unwrap_or_else(|| String::from("rst"));
    let writer = PageWriter::new(output_dir)
        .with_suffix(suffix)
        .with_force(matches.get_flag("force"))
        .with_dry_run(matches.get_flag("dry-run"));

    let written = writer
        .write_pages(&pages)
        .context("Failed to write pages")?
        .into_iter()
        .filter(|outcome| matches!(outcome, WriteOutcome::Created | WriteOutcome::Overwritten))
        .count();
    info!(
        "{} of {} pages written to {}",
        written,
        pages.len(),
        writer.output_dir().display()
    );

    Ok(())
}
