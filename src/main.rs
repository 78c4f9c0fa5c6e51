use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use dpbindgen::error::error_class;
use dpbindgen::generate;
use dpbindgen::parse::source::DatapackSource;
use dpbindgen::project::{GeneratorSettingsBuilder, OutputTarget};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(&cli);

	let res = run(cli);
	if let Err(e) = res {
		eprintln!("error[{}]: {e:#}", error_class(&e));
		return ExitCode::FAILURE;
	}

	ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) {
	let level = if cli.verbose {
		LevelFilter::DEBUG
	} else if cli.quiet {
		LevelFilter::ERROR
	} else {
		LevelFilter::INFO
	};
	// RUST_LOG takes precedence over the flags
	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stdout)
		.init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let source = match (cli.directory, cli.zip) {
		(Some(dir), _) => DatapackSource::Directory(dir),
		(None, Some(zip)) => DatapackSource::Zip(zip),
		(None, None) => anyhow::bail!("No datapack given"),
	};

	let mut settings = GeneratorSettingsBuilder::new(&cli.package)
		.output(OutputTarget::from_path(cli.output))
		.threads(cli.threads)
		.check_manifest(!cli.no_manifest_check);
	if let Some(parent) = &cli.parent_package {
		settings = settings.parent_package(parent);
	}
	let settings = settings.build()?;

	let summary = generate(&source, &settings)?;
	info!(
		namespaces = summary.namespaces,
		groups = summary.groups,
		components = summary.components,
		files = summary.files,
		"Finished generating bindings"
	);

	Ok(())
}

/// Generate typed Kotlin bindings for the contents of a datapack
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["directory", "zip"])))]
pub struct Cli {
	/// Package of the generated sources
	#[arg(short, long)]
	package: String,
	/// Package the output tree is rooted at. Defaults to the package minus its
	/// last segment
	#[arg(long)]
	parent_package: Option<String>,
	/// Datapack directory to read
	#[arg(short, long)]
	directory: Option<PathBuf>,
	/// Zipped datapack to read
	#[arg(short, long)]
	zip: Option<PathBuf>,
	/// Output directory, or a .zip file to bundle the sources into
	#[arg(short, long, default_value = "generated")]
	output: PathBuf,
	/// Show debug output
	#[arg(short, long, conflicts_with = "quiet")]
	verbose: bool,
	/// Only show errors
	#[arg(short, long)]
	quiet: bool,
	/// Number of worker threads, 0 to pick automatically
	#[arg(short, long, default_value_t = 0)]
	threads: usize,
	/// Accept datapacks without a pack.mcmeta
	#[arg(long)]
	no_manifest_check: bool,
}
