use std::fmt::Debug;

use crate::registry::ComponentType;

/// Location of a component file relative to the directory of its component type
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentPath {
	/// `/`-separated directory part, empty at the root
	pub relative_path: String,
	/// File stem
	pub file_name: String,
}

impl ComponentPath {
	pub fn new(relative_path: String, file_name: String) -> Self {
		Self {
			relative_path,
			file_name,
		}
	}

	/// Splits a full `dir/sub/name` path
	pub fn from_full_path(full: &str) -> Self {
		match full.rsplit_once('/') {
			Some((dir, name)) => Self::new(dir.into(), name.into()),
			None => Self::new(String::new(), full.into()),
		}
	}

	pub fn full_path(&self) -> String {
		if self.relative_path.is_empty() {
			self.file_name.clone()
		} else {
			format!("{}/{}", self.relative_path, self.file_name)
		}
	}

	/// Names of the directories containing the file, outermost first
	pub fn directory_hierarchy(&self) -> Vec<&str> {
		self.relative_path
			.split('/')
			.filter(|x| !x.is_empty())
			.collect()
	}
}

impl Debug for ComponentPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.full_path())
	}
}

/// Parameters substituted into a macro script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
	/// Full path of the script declaring the macro
	pub function: String,
	pub parameters: Vec<String>,
}

impl Macro {
	pub fn new(function: String, parameters: Vec<String>) -> Self {
		Self {
			function,
			parameters,
		}
	}

	pub fn has_parameters(&self) -> bool {
		!self.parameters.is_empty()
	}
}

/// A file found in a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
	Simple {
		path: ComponentPath,
		ty: ComponentType,
	},
	Function {
		path: ComponentPath,
		macro_def: Option<Macro>,
	},
	FunctionTag {
		path: ComponentPath,
	},
}

impl Component {
	pub fn path(&self) -> &ComponentPath {
		match self {
			Self::Simple { path, .. } | Self::Function { path, .. } | Self::FunctionTag { path } => {
				path
			}
		}
	}

	pub fn component_type(&self) -> ComponentType {
		match self {
			Self::Simple { ty, .. } => *ty,
			Self::Function { .. } => ComponentType::Function,
			Self::FunctionTag { .. } => ComponentType::FunctionTag,
		}
	}

	pub fn full_path(&self) -> String {
		self.path().full_path()
	}

	pub fn directory_hierarchy(&self) -> Vec<&str> {
		self.path().directory_hierarchy()
	}

	pub fn macro_def(&self) -> Option<&Macro> {
		match self {
			Self::Function { macro_def, .. } => macro_def.as_ref(),
			_ => None,
		}
	}
}
