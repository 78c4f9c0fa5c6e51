use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::registry::ComponentType;

use super::component::{Component, Macro};
use super::resource::{Scoreboard, Storage};

/// Everything found in a datapack
#[derive(Debug, Clone, Default)]
pub struct Datapack {
	/// Sorted by name
	pub namespaces: Vec<ParsedNamespace>,
	/// Sorted by prefix
	pub groups: Vec<NamespaceGroup>,
}

impl Datapack {
	pub fn group(&self, prefix: &str) -> Option<&NamespaceGroup> {
		self.groups.iter().find(|x| x.prefix == prefix)
	}

	/// The group a namespace is a member of
	pub fn group_of(&self, namespace: &str) -> Option<&NamespaceGroup> {
		let (prefix, _) = namespace.split_once('.')?;
		self.group(prefix)
			.filter(|group| group.members.iter().any(|member| member == namespace))
	}

	pub fn is_empty(&self) -> bool {
		self.namespaces.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct ParsedNamespace {
	pub name: String,
	pub prefix: Option<String>,
	pub components: BTreeMap<ComponentType, Vec<Component>>,
	pub local_storages: FxHashSet<Storage>,
	pub local_scoreboards: FxHashSet<Scoreboard>,
	pub macros: Vec<Macro>,
}

impl ParsedNamespace {
	pub fn new(name: String) -> Self {
		let prefix = name.split_once('.').map(|(prefix, _)| prefix.to_string());
		Self {
			name,
			prefix,
			components: BTreeMap::new(),
			local_storages: FxHashSet::default(),
			local_scoreboards: FxHashSet::default(),
			macros: Vec::new(),
		}
	}

	/// Name without the group prefix
	pub fn member_name(&self) -> &str {
		match self.name.split_once('.') {
			Some((_, member)) => member,
			None => &self.name,
		}
	}

	/// All components, by type and then by path
	pub fn all_components(&self) -> impl Iterator<Item = &Component> {
		self.components.values().flatten()
	}

	pub fn component_count(&self) -> usize {
		self.components.values().map(Vec::len).sum()
	}

	pub fn sorted_scoreboards(&self) -> Vec<&Scoreboard> {
		self.local_scoreboards.iter().sorted().collect()
	}

	pub fn sorted_storages(&self) -> Vec<&Storage> {
		self.local_storages.iter().sorted().collect()
	}
}

/// Namespaces sharing the prefix before their first dot
#[derive(Debug, Clone)]
pub struct NamespaceGroup {
	pub prefix: String,
	/// Sorted member namespace names
	pub members: Vec<String>,
	pub shared: SharedResources,
}

impl NamespaceGroup {
	pub fn is_shared_scoreboard(&self, scoreboard: &Scoreboard) -> bool {
		self.shared.scoreboards.contains(scoreboard)
	}

	pub fn is_shared_storage(&self, storage: &Storage) -> bool {
		self.shared.storages.contains(storage)
	}
}

/// Resources referenced by more than one member of a group
#[derive(Debug, Clone, Default)]
pub struct SharedResources {
	pub storages: FxHashSet<Storage>,
	pub scoreboards: FxHashSet<Scoreboard>,
}
