use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::common::{Macro, Scoreboard, Storage};

use super::extract::{extract_macro_params, extract_objectives, extract_storages, qualify_objective};
use super::preprocess::preprocess;

/// Resources used by a single script
#[derive(Debug, Clone, Default)]
pub struct ParsedFunction {
	pub scoreboards: FxHashSet<Scoreboard>,
	pub storages: FxHashSet<Storage>,
	pub macro_def: Option<Macro>,
}

/// Parses the text of a script found at `full_path` in `namespace`
pub fn parse_function(text: &str, namespace: &str, full_path: &str) -> ParsedFunction {
	let text = preprocess(text);

	let scoreboards = extract_objectives(&text)
		.into_iter()
		.map(|name| {
			Scoreboard::new(
				name.to_string(),
				qualify_objective(name, namespace).to_string(),
				namespace.to_string(),
			)
		})
		.collect();

	let storages = extract_storages(&text)
		.into_iter()
		.map(|(storage_ns, path)| {
			Storage::new(storage_ns.to_string(), path.to_string(), namespace.to_string())
		})
		.collect();

	let parameters = extract_macro_params(&text)
		.into_iter()
		.unique()
		.map(String::from)
		.collect_vec();
	let macro_def = if parameters.is_empty() {
		None
	} else {
		Some(Macro::new(full_path.to_string(), parameters))
	};

	ParsedFunction {
		scoreboards,
		storages,
		macro_def,
	}
}
