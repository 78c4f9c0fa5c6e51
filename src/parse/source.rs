use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tempfile::TempDir;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::GenError;

/// Where a datapack is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatapackSource {
	Directory(PathBuf),
	Zip(PathBuf),
}

impl DatapackSource {
	pub fn path(&self) -> &Path {
		match self {
			Self::Directory(path) | Self::Zip(path) => path,
		}
	}

	/// Resolves the source to a datapack directory on disk, unpacking archives
	pub fn open(&self, check_manifest: bool) -> anyhow::Result<OpenedDatapack> {
		let path = self.path();
		if !path.exists() {
			return Err(GenError::MissingInput(path.to_path_buf()).into());
		}

		let out = match self {
			Self::Directory(path) => OpenedDatapack {
				root: path.clone(),
				temp: None,
			},
			Self::Zip(path) => unpack_archive(path)?,
		};
		out.validate(check_manifest)?;

		Ok(out)
	}
}

/// A datapack directory ready to be parsed. Unpacked archives are removed on drop
#[derive(Debug)]
pub struct OpenedDatapack {
	pub root: PathBuf,
	temp: Option<TempDir>,
}

impl OpenedDatapack {
	pub fn is_unpacked(&self) -> bool {
		self.temp.is_some()
	}

	fn validate(&self, check_manifest: bool) -> anyhow::Result<()> {
		if !self.root.join("data").is_dir() {
			return Err(GenError::MissingDataDir(self.root.clone()).into());
		}

		let manifest = self.root.join("pack.mcmeta");
		if !manifest.is_file() {
			if check_manifest {
				return Err(GenError::MissingManifest(self.root.clone()).into());
			}
			return Ok(());
		}

		match read_pack_meta(&manifest) {
			Ok(meta) => info!(
				pack_format = ?meta.pack.pack_format,
				description = %meta.pack.description,
				"Found datapack"
			),
			Err(e) => warn!("Datapack manifest could not be read: {e:#}"),
		}

		Ok(())
	}
}

#[derive(Debug, Deserialize)]
pub struct PackMeta {
	pub pack: PackSection,
}

#[derive(Debug, Deserialize)]
pub struct PackSection {
	#[serde(default)]
	pub pack_format: Option<u32>,
	#[serde(default)]
	pub description: serde_json::Value,
}

pub fn read_pack_meta(path: &Path) -> anyhow::Result<PackMeta> {
	let text = std::fs::read_to_string(path).context("Failed to read pack.mcmeta")?;
	serde_json::from_str(&text).context("Failed to deserialize pack.mcmeta")
}

fn unpack_archive(path: &Path) -> anyhow::Result<OpenedDatapack> {
	let file = File::open(path)
		.with_context(|| format!("Failed to open archive {}", path.display()))?;
	let mut archive = ZipArchive::new(file).map_err(|source| GenError::Archive {
		path: path.to_path_buf(),
		source,
	})?;

	let temp = tempfile::tempdir().context("Failed to create temporary directory")?;
	archive
		.extract(temp.path())
		.map_err(|source| GenError::Archive {
			path: path.to_path_buf(),
			source,
		})?;
	debug!(archive = %path.display(), files = archive.len(), "Unpacked archive");

	let root = find_pack_root(temp.path())
		.ok_or_else(|| GenError::EmptyArchive(path.to_path_buf()))?;

	Ok(OpenedDatapack {
		root,
		temp: Some(temp),
	})
}

/// The pack is either at the root of the archive or inside its only directory
fn find_pack_root(dir: &Path) -> Option<PathBuf> {
	let is_pack = |dir: &Path| dir.join("data").is_dir() || dir.join("pack.mcmeta").is_file();
	if is_pack(dir) {
		return Some(dir.to_path_buf());
	}

	let entries: Vec<_> = std::fs::read_dir(dir).ok()?.flatten().collect();
	match entries.as_slice() {
		[only] if only.path().is_dir() && is_pack(&only.path()) => Some(only.path()),
		_ => None,
	}
}
