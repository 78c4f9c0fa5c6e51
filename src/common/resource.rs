use std::fmt::Display;

use derivative::Derivative;

/// A scoreboard objective referenced by a script. Two scoreboards are the same
/// resource whenever their names match, no matter who found them
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scoreboard {
	pub name: String,
	/// Namespace owning the objective, derived from its name
	#[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
	pub namespace: String,
	/// Namespace whose scripts referenced the objective
	#[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
	pub source_namespace: String,
}

impl Scoreboard {
	pub fn new(name: String, namespace: String, source_namespace: String) -> Self {
		Self {
			name,
			namespace,
			source_namespace,
		}
	}
}

impl Display for Scoreboard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

/// A command storage referenced by a script, keyed on its `namespace:name` id
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Storage {
	pub namespace: String,
	pub name: String,
	#[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
	pub source_namespace: String,
}

impl Storage {
	pub fn new(namespace: String, name: String, source_namespace: String) -> Self {
		Self {
			namespace,
			name,
			source_namespace,
		}
	}

	pub fn id(&self) -> String {
		format!("{}:{}", self.namespace, self.name)
	}
}

impl Display for Storage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.namespace, self.name)
	}
}
