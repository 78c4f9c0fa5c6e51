use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::common::{Component, ComponentPath, ParsedNamespace};
use crate::registry::{ComponentKind, ComponentType};

use super::function::{parse_function, ParsedFunction};

/// Components of one type found in a namespace, along with the parse results of
/// any scripts among them
struct CollectedType {
	ty: ComponentType,
	components: Vec<Component>,
	functions: Vec<ParsedFunction>,
}

/// Parses every component type directory of the namespace directory `dir`
pub fn parse_namespace(name: &str, dir: &Path) -> anyhow::Result<ParsedNamespace> {
	let collected = ComponentType::ALL
		.par_iter()
		.map(|ty| {
			collect_type(name, dir, *ty)
				.with_context(|| format!("Failed to collect {ty} components of namespace {name}"))
		})
		.collect::<anyhow::Result<Vec<_>>>()?;

	let mut out = ParsedNamespace::new(name.to_string());
	for collected in collected.into_iter().flatten() {
		for parsed in collected.functions {
			out.local_scoreboards.extend(parsed.scoreboards);
			out.local_storages.extend(parsed.storages);
			out.macros.extend(parsed.macro_def);
		}
		if !collected.components.is_empty() {
			out.components.insert(collected.ty, collected.components);
		}
	}

	debug!(
		namespace = name,
		components = out.component_count(),
		scoreboards = out.local_scoreboards.len(),
		storages = out.local_storages.len(),
		macros = out.macros.len(),
		"Parsed namespace"
	);

	Ok(out)
}

fn collect_type(
	namespace: &str,
	namespace_dir: &Path,
	ty: ComponentType,
) -> anyhow::Result<Option<CollectedType>> {
	let type_dir = namespace_dir.join(ty.directory_name());
	if !type_dir.is_dir() {
		return Ok(None);
	}

	let files = list_component_files(&type_dir, ty)?;
	let out = match ty.kind() {
		ComponentKind::Script => {
			let (components, functions) = collect_functions(namespace, files)?;
			CollectedType {
				ty,
				components,
				functions,
			}
		}
		ComponentKind::ScriptTag => CollectedType {
			ty,
			components: files
				.into_iter()
				.map(|(_, path)| Component::FunctionTag { path })
				.collect(),
			functions: Vec::new(),
		},
		ComponentKind::Resource => CollectedType {
			ty,
			components: files
				.into_iter()
				.map(|(_, path)| Component::Simple { path, ty })
				.collect(),
			functions: Vec::new(),
		},
	};

	Ok(Some(out))
}

/// Reads all scripts, then parses all of them
fn collect_functions(
	namespace: &str,
	files: Vec<(PathBuf, ComponentPath)>,
) -> anyhow::Result<(Vec<Component>, Vec<ParsedFunction>)> {
	let contents = files
		.into_par_iter()
		.map(|(file, path)| {
			let text = std::fs::read_to_string(&file)
				.with_context(|| format!("Failed to read function file {}", file.display()))?;
			Ok((path, text))
		})
		.collect::<anyhow::Result<Vec<_>>>()?;

	let parsed: Vec<_> = contents
		.par_iter()
		.map(|(path, text)| {
			let full_path = path.full_path();
			trace!(namespace, function = %full_path, "Parsing function");
			let parsed = parse_function(text, namespace, &full_path);
			(path.clone(), parsed)
		})
		.collect();

	let (components, functions) = parsed
		.into_iter()
		.map(|(path, parsed)| {
			let component = Component::Function {
				path,
				macro_def: parsed.macro_def.clone(),
			};
			(component, parsed)
		})
		.unzip();

	Ok((components, functions))
}

/// Lists the files under a component type directory that have the right
/// extension, sorted by path
fn list_component_files(
	type_dir: &Path,
	ty: ComponentType,
) -> anyhow::Result<Vec<(PathBuf, ComponentPath)>> {
	let mut out = Vec::new();
	for entry in WalkDir::new(type_dir) {
		let entry =
			entry.with_context(|| format!("Failed to walk directory {}", type_dir.display()))?;
		if !entry.file_type().is_file() {
			continue;
		}
		let file = entry.path();
		let extension = file.extension().map(|x| x.to_string_lossy());
		if extension.as_deref() != Some(ty.file_extension()) {
			debug!(file = %file.display(), expected = ty.file_extension(), "Skipping file with unsupported extension");
			continue;
		}

		let relative = file
			.strip_prefix(type_dir)
			.context("Component file is not inside its type directory")?;
		out.push((file.to_path_buf(), component_path(relative)?));
	}

	out.sort_by_key(|x| x.1.full_path());

	Ok(out)
}

/// Converts a path relative to a type directory, such as `story/root.json`
fn component_path(relative: &Path) -> anyhow::Result<ComponentPath> {
	let file_name = relative
		.file_stem()
		.context("Component file has no name")?
		.to_string_lossy()
		.to_string();
	let relative_path = relative
		.parent()
		.map(|parent| {
			parent
				.components()
				.map(|x| x.as_os_str().to_string_lossy())
				.collect::<Vec<_>>()
				.join("/")
		})
		.unwrap_or_default();

	Ok(ComponentPath::new(relative_path, file_name))
}
