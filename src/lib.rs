pub mod common;
pub mod error;
pub mod output;
pub mod parse;
pub mod project;
pub mod registry;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::common::Datapack;
use crate::output::{emit_datapack, write_output, GeneratedFile};
use crate::parse::parse_datapack;
use crate::parse::source::DatapackSource;
use crate::project::GeneratorSettings;

/// Totals of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
	pub namespaces: usize,
	pub groups: usize,
	pub components: usize,
	pub files: usize,
}

/// Parses a datapack and writes its bindings to the output target
pub fn generate(
	source: &DatapackSource,
	settings: &GeneratorSettings,
) -> anyhow::Result<GenerationSummary> {
	let (datapack, files) = generate_files(source, settings)?;
	let files = write_output(&files, settings.output()).context("Failed to write output")?;

	Ok(GenerationSummary {
		namespaces: datapack.namespaces.len(),
		groups: datapack.groups.len(),
		components: datapack
			.namespaces
			.iter()
			.map(|x| x.component_count())
			.sum(),
		files,
	})
}

/// Parses a datapack and generates its bindings without writing them
pub fn generate_files(
	source: &DatapackSource,
	settings: &GeneratorSettings,
) -> anyhow::Result<(Datapack, Vec<GeneratedFile>)> {
	let datapack = parse_source(source, settings)?;
	if datapack.is_empty() {
		warn!("Datapack has no namespaces");
	}
	let files = emit_datapack(&datapack, settings).context("Failed to generate bindings")?;
	info!(files = files.len(), "Generated bindings");

	Ok((datapack, files))
}

/// Opens and parses a datapack using the configured number of threads
pub fn parse_source(
	source: &DatapackSource,
	settings: &GeneratorSettings,
) -> anyhow::Result<Datapack> {
	// The unpacked archive has to outlive the parse
	let opened = source.open(settings.check_manifest())?;
	debug!(root = %opened.root.display(), unpacked = opened.is_unpacked(), "Opened datapack");
	parse_with_threads(&opened.root, settings.threads())
		.with_context(|| format!("Failed to parse datapack {}", source.path().display()))
}

fn parse_with_threads(root: &Path, threads: usize) -> anyhow::Result<Datapack> {
	if threads == 0 {
		return parse_datapack(root);
	}

	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(threads)
		.build()
		.context("Failed to create thread pool")?;
	pool.install(|| parse_datapack(root))
}
