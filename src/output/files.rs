use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::GenError;
use crate::project::OutputTarget;

use super::emit::GeneratedFile;

/// Writes generated files to the output target, returning how many were written
pub fn write_output(files: &[GeneratedFile], target: &OutputTarget) -> anyhow::Result<usize> {
	match target {
		OutputTarget::Directory(path) => write_directory(files, path)?,
		OutputTarget::Zip(path) => write_zip(files, path)?,
	}
	info!(count = files.len(), path = %target.path().display(), "Wrote generated sources");

	Ok(files.len())
}

/// Writes files into a source tree. Existing files at the same paths are replaced
fn write_directory(files: &[GeneratedFile], root: &Path) -> anyhow::Result<()> {
	std::fs::create_dir_all(root).context("Failed to create output directory")?;
	for file in files {
		let path = root.join(&file.path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)
				.with_context(|| format!("Failed to create directory {parent:?}"))?;
		}
		std::fs::write(&path, &file.contents)
			.with_context(|| format!("Failed to write file {path:?}"))?;
		debug!(path = %path.display(), "Wrote file");
	}

	Ok(())
}

fn write_zip(files: &[GeneratedFile], path: &Path) -> anyhow::Result<()> {
	if let Some(parent) = path.parent().filter(|x| !x.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).context("Failed to create output directory")?;
	}
	let archive_error = |source| GenError::Archive {
		path: path.to_path_buf(),
		source,
	};

	let out = File::create(path).with_context(|| format!("Failed to create archive {path:?}"))?;
	let mut zip = ZipWriter::new(out);
	let options = FileOptions::default();
	for file in files {
		// Zip entries always use forward slashes
		let name = file
			.path
			.iter()
			.map(|x| x.to_string_lossy())
			.collect::<Vec<_>>()
			.join("/");
		zip.start_file(name.as_str(), options)
			.map_err(archive_error)?;
		zip.write_all(file.contents.as_bytes())
			.with_context(|| format!("Failed to write archive entry {name}"))?;
	}
	zip.finish().map_err(archive_error)?;

	Ok(())
}
