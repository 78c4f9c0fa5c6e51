//! Regex based extraction of resource references from preprocessed script text.
//! These only recognize a handful of command shapes and are not a tokenizer

use std::sync::OnceLock;

use regex::Regex;

fn scoreboard_regex() -> &'static Regex {
	static REGEX: OnceLock<Regex> = OnceLock::new();
	REGEX.get_or_init(|| {
		Regex::new(
			r"(?m)^scoreboard objectives (?:(?:add|remove|modify) ([A-Za-z0-9_.+-]+)|setdisplay [^\s]+(?: ([A-Za-z0-9_.+-]+))?)",
		)
		.expect("Invalid scoreboard regex")
	})
}

fn storage_regex() -> &'static Regex {
	static REGEX: OnceLock<Regex> = OnceLock::new();
	REGEX.get_or_init(|| {
		Regex::new(r"\bstorage ([a-z0-9_.-]+):([a-z0-9_./-]+)").expect("Invalid storage regex")
	})
}

fn macro_line_regex() -> &'static Regex {
	static REGEX: OnceLock<Regex> = OnceLock::new();
	REGEX.get_or_init(|| Regex::new(r"(?m)^\s*\$.*$").expect("Invalid macro line regex"))
}

fn macro_param_regex() -> &'static Regex {
	static REGEX: OnceLock<Regex> = OnceLock::new();
	REGEX.get_or_init(|| {
		Regex::new(r"\$\(([A-Za-z0-9_]+)\)").expect("Invalid macro parameter regex")
	})
}

/// A matched objective command. `name` is absent for a `setdisplay` that clears
/// a display slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveMatch<'t> {
	pub name: Option<&'t str>,
}

/// Finds every objective command in the text, including ones without a name
pub fn objective_matches(text: &str) -> Vec<ObjectiveMatch<'_>> {
	scoreboard_regex()
		.captures_iter(text)
		.map(|caps| ObjectiveMatch {
			name: caps.get(1).or_else(|| caps.get(2)).map(|x| x.as_str()),
		})
		.collect()
}

/// Names of every objective created, removed, modified or displayed
pub fn extract_objectives(text: &str) -> Vec<&str> {
	objective_matches(text)
		.into_iter()
		.filter_map(|x| x.name)
		.collect()
}

/// `(namespace, path)` of every storage read or written
pub fn extract_storages(text: &str) -> Vec<(&str, &str)> {
	storage_regex()
		.captures_iter(text)
		.filter_map(|caps| {
			let namespace = caps.get(1)?.as_str();
			let path = caps.get(2)?.as_str();
			Some((namespace, path))
		})
		.collect()
}

/// Every macro parameter substituted on a macro line, with duplicates
pub fn extract_macro_params(text: &str) -> Vec<&str> {
	macro_line_regex()
		.find_iter(text)
		.flat_map(|line| {
			macro_param_regex()
				.captures_iter(line.as_str())
				.filter_map(|caps| caps.get(1).map(|x| x.as_str()))
		})
		.collect()
}

/// Namespace owning an objective. Dotted names belong to everything before their
/// last segment, other names to the namespace of the script
pub fn qualify_objective<'a>(name: &'a str, current_namespace: &'a str) -> &'a str {
	match name.rsplit_once('.') {
		Some((namespace, _)) => namespace,
		None => current_namespace,
	}
}
