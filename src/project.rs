use std::path::{Path, PathBuf};

use crate::error::GenError;

/// Where generated sources are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
	/// A source tree rooted at the parent package
	Directory(PathBuf),
	/// A zip archive holding the same tree
	Zip(PathBuf),
}

impl OutputTarget {
	/// Paths ending in `.zip` become archives
	pub fn from_path(path: PathBuf) -> Self {
		let is_zip = path
			.extension()
			.map_or(false, |x| x.eq_ignore_ascii_case("zip"));
		if is_zip {
			Self::Zip(path)
		} else {
			Self::Directory(path)
		}
	}

	pub fn path(&self) -> &Path {
		match self {
			Self::Directory(path) | Self::Zip(path) => path,
		}
	}
}

/// Settings for a binding generation run
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
	pub(crate) package: String,
	pub(crate) parent_package: String,
	pub(crate) output: OutputTarget,
	pub(crate) threads: usize,
	pub(crate) check_manifest: bool,
}

impl GeneratorSettings {
	pub fn new(package: String) -> Self {
		let parent_package = default_parent_package(&package);
		Self {
			package,
			parent_package,
			output: OutputTarget::Directory(PathBuf::from("generated")),
			threads: 0,
			check_manifest: true,
		}
	}

	pub fn package(&self) -> &str {
		&self.package
	}

	pub fn output(&self) -> &OutputTarget {
		&self.output
	}

	/// Worker thread count, zero for the rayon default
	pub fn threads(&self) -> usize {
		self.threads
	}

	pub fn check_manifest(&self) -> bool {
		self.check_manifest
	}

	/// Directory of a package relative to the output root. Packages outside of
	/// the parent package keep their full path
	pub fn package_dir(&self, package: &str) -> PathBuf {
		let relative = if self.parent_package.is_empty() {
			Some(package)
		} else {
			package
				.strip_prefix(self.parent_package.as_str())
				.and_then(|x| x.strip_prefix('.'))
		};

		relative.unwrap_or(package).split('.').collect()
	}
}

pub struct GeneratorSettingsBuilder {
	settings: GeneratorSettings,
}

impl GeneratorSettingsBuilder {
	pub fn new(package: &str) -> Self {
		Self {
			settings: GeneratorSettings::new(package.to_string()),
		}
	}

	/// Checks the package names and returns the settings
	pub fn build(self) -> anyhow::Result<GeneratorSettings> {
		validate_package(&self.settings.package)?;
		if !self.settings.parent_package.is_empty() {
			validate_package(&self.settings.parent_package)?;
		}

		Ok(self.settings)
	}

	pub fn parent_package(mut self, parent: &str) -> Self {
		self.settings.parent_package = parent.to_string();
		self
	}

	pub fn output(mut self, output: OutputTarget) -> Self {
		self.settings.output = output;
		self
	}

	pub fn threads(mut self, threads: usize) -> Self {
		self.settings.threads = threads;
		self
	}

	pub fn check_manifest(mut self, check: bool) -> Self {
		self.settings.check_manifest = check;
		self
	}
}

/// Package minus its last dot-segment
pub fn default_parent_package(package: &str) -> String {
	match package.rsplit_once('.') {
		Some((parent, _)) => parent.to_string(),
		None => String::new(),
	}
}

fn validate_package(package: &str) -> Result<(), GenError> {
	let valid_segment = |segment: &str| {
		let mut chars = segment.chars();
		chars
			.next()
			.map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
			&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
	};
	if package.split('.').all(valid_segment) {
		Ok(())
	} else {
		Err(GenError::InvalidPackage(package.to_string()))
	}
}
