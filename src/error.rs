use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors with a known class. Everything else travels as a plain
/// `anyhow::Error` and is reported as `internal`
#[derive(Debug, Error)]
pub enum GenError {
	#[error("Input path {0} does not exist")]
	MissingInput(PathBuf),
	#[error("Invalid package identifier '{0}'")]
	InvalidPackage(String),
	#[error("Datapack at {0} has no pack.mcmeta manifest")]
	MissingManifest(PathBuf),
	#[error("Datapack at {0} has no data directory")]
	MissingDataDir(PathBuf),
	#[error("Archive {0} does not contain a datapack")]
	EmptyArchive(PathBuf),
	#[error("Failed to read archive {path}")]
	Archive {
		path: PathBuf,
		#[source]
		source: zip::result::ZipError,
	},
}

impl GenError {
	/// The tag printed next to fatal diagnostics
	pub fn class(&self) -> &'static str {
		match self {
			Self::MissingInput(..) | Self::InvalidPackage(..) => "config",
			Self::MissingManifest(..) | Self::MissingDataDir(..) | Self::EmptyArchive(..) => {
				"structure"
			}
			Self::Archive { .. } => "archive",
		}
	}
}

/// Finds the class of the first classified error in an error chain
pub fn error_class(err: &anyhow::Error) -> &'static str {
	for cause in err.chain() {
		if let Some(err) = cause.downcast_ref::<GenError>() {
			return err.class();
		}
		if cause.downcast_ref::<std::io::Error>().is_some() {
			return "io";
		}
	}

	"internal"
}
