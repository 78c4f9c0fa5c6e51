pub mod extract;
pub mod function;
pub mod namespace;
pub mod preprocess;
pub mod source;

use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::info;

use crate::common::{Datapack, NamespaceGroup, ParsedNamespace, SharedResources};
use crate::error::GenError;

use self::namespace::parse_namespace;

/// Parses the datapack whose `data` directory is at `root/data`
pub fn parse_datapack(root: &Path) -> anyhow::Result<Datapack> {
	let data_dir = root.join("data");
	if !data_dir.is_dir() {
		return Err(GenError::MissingDataDir(root.to_path_buf()).into());
	}

	let mut namespace_dirs = Vec::new();
	let entries = std::fs::read_dir(&data_dir)
		.with_context(|| format!("Failed to read data directory {}", data_dir.display()))?;
	for entry in entries {
		let entry = entry.context("Failed to read data directory entry")?;
		if entry.file_type().context("Failed to get file type")?.is_dir() {
			let name = entry.file_name().to_string_lossy().to_string();
			namespace_dirs.push((name, entry.path()));
		}
	}

	let mut namespaces = namespace_dirs
		.par_iter()
		.map(|(name, dir)| {
			parse_namespace(name, dir).with_context(|| format!("Failed to parse namespace {name}"))
		})
		.collect::<anyhow::Result<Vec<_>>>()?;
	namespaces.sort_by(|l, r| l.name.cmp(&r.name));

	let groups = find_groups(&namespaces);

	info!(
		namespaces = namespaces.len(),
		groups = groups.len(),
		"Parsed datapack"
	);

	Ok(Datapack { namespaces, groups })
}

/// Groups prefixed namespaces that share their prefix with at least one other
/// namespace
pub fn find_groups(namespaces: &[ParsedNamespace]) -> Vec<NamespaceGroup> {
	namespaces
		.iter()
		.filter_map(|ns| ns.prefix.clone().map(|prefix| (prefix, ns)))
		.into_group_map()
		.into_iter()
		.filter(|(_, members)| members.len() > 1)
		.map(|(prefix, mut members)| {
			members.sort_by(|l, r| l.name.cmp(&r.name));
			NamespaceGroup {
				prefix,
				members: members.iter().map(|x| x.name.clone()).collect(),
				shared: find_shared_resources(&members),
			}
		})
		.sorted_by(|l, r| l.prefix.cmp(&r.prefix))
		.collect()
}

/// Resources referenced by more than one of the namespaces
fn find_shared_resources(members: &[&ParsedNamespace]) -> SharedResources {
	let scoreboards = members
		.iter()
		.flat_map(|ns| ns.sorted_scoreboards())
		.into_group_map_by(|x| x.name.clone())
		.into_values()
		.filter(|x| x.len() > 1)
		.map(|x| x[0].clone())
		.collect();

	let storages = members
		.iter()
		.flat_map(|ns| ns.sorted_storages())
		.into_group_map_by(|x| x.id())
		.into_values()
		.filter(|x| x.len() > 1)
		.map(|x| x[0].clone())
		.collect();

	SharedResources {
		storages,
		scoreboards,
	}
}
