use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Context;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::common::{
	Component, ComponentPath, Datapack, Macro, NamespaceGroup, ParsedNamespace, Scoreboard, Storage,
};
use crate::project::GeneratorSettings;
use crate::registry::{Binding, ClassName, ComponentType, ParamSource};

use super::codegen::{FunctionSpec, KotlinFile, ObjectSpec, ParamSpec, PropertySpec, Render};
use super::ident::{camel_case, escape, package_segment, pascal_case, string_literal, NameScope};

const STRING: &str = "String";

const NBT_BUILDER: ClassName = ClassName::new("io.github.ayfri.kore.utils", "nbt");
const NBT_COMPOUND: ClassName = ClassName::new("net.benwoodworth.knbt", "NbtCompound");
const DATA_ARGUMENT: ClassName =
	ClassName::new("io.github.ayfri.kore.arguments.types", "DataArgument");
const STORAGE_ARGUMENT: ClassName =
	ClassName::new("io.github.ayfri.kore.arguments.types.resources", "StorageArgument");

/// Names of generated objects that would shadow a type used by generated code
fn reserved_type_names() -> Vec<&'static str> {
	let mut out = vec![
		STRING,
		"Boolean",
		"List",
		NBT_COMPOUND.name,
		DATA_ARGUMENT.name,
		STORAGE_ARGUMENT.name,
	];
	for ty in ComponentType::ALL {
		let binding = ty.binding();
		out.push(binding.class.name);
		out.push(binding.return_type.name);
		out.extend(binding.required_context.map(|x| x.name));
	}
	out.sort_unstable();
	out.dedup();

	out
}

/// A rendered source file, relative to the output root
#[derive(Debug, Clone)]
pub struct GeneratedFile {
	pub path: PathBuf,
	pub unit: KotlinFile,
	pub contents: String,
}

impl GeneratedFile {
	fn new(unit: KotlinFile, settings: &GeneratorSettings) -> anyhow::Result<Self> {
		let path = settings
			.package_dir(&unit.package)
			.join(format!("{}.kt", unit.object.name));
		let contents = unit
			.render_string()
			.with_context(|| format!("Failed to render {}", unit.object.name))?;
		Ok(Self {
			path,
			unit,
			contents,
		})
	}
}

/// Generates one unit per namespace and one per namespace group
pub fn emit_datapack(
	datapack: &Datapack,
	settings: &GeneratorSettings,
) -> anyhow::Result<Vec<GeneratedFile>> {
	let reserved = reserved_type_names();
	let mut unit_names: FxHashMap<String, NameScope> = FxHashMap::default();
	let mut claim_unit_name = |package: &str, base: String, suffix: &str| {
		unit_names
			.entry(package.to_string())
			.or_insert_with(|| NameScope::with_reserved(reserved.iter().copied()))
			.claim(base.clone(), || format!("{base}{suffix}"))
	};

	let mut out = Vec::new();
	for ns in &datapack.namespaces {
		let group = datapack.group_of(&ns.name);
		let (package, base) = match group {
			Some(group) => (
				format!("{}.{}", settings.package(), package_segment(&group.prefix)),
				pascal_case(ns.member_name()),
			),
			None => (settings.package().to_string(), pascal_case(&ns.name)),
		};
		let object_name = claim_unit_name(&package, base, "Namespace");
		let unit = emit_namespace(ns, group, object_name, package, &reserved)
			.with_context(|| format!("Failed to generate bindings for namespace {}", ns.name))?;
		debug!(namespace = %ns.name, object = %unit.object.name, "Generated namespace bindings");
		out.push(GeneratedFile::new(unit, settings)?);
	}

	for group in &datapack.groups {
		let package = settings.package().to_string();
		let object_name = claim_unit_name(&package, pascal_case(&group.prefix), "Group");
		let unit = emit_group(group, object_name, package, &reserved);
		debug!(prefix = %group.prefix, object = %unit.object.name, "Generated group bindings");
		out.push(GeneratedFile::new(unit, settings)?);
	}

	Ok(out)
}

/// Generates the unit for one namespace
pub fn emit_namespace(
	ns: &ParsedNamespace,
	group: Option<&NamespaceGroup>,
	object_name: String,
	package: String,
	reserved: &[&str],
) -> anyhow::Result<KotlinFile> {
	let mut unit = UnitBuilder::new(&ns.name, object_name, reserved, &["NAMESPACE", "PATH"]);
	unit.root.object.push(PropertySpec::constant(
		"NAMESPACE".into(),
		STRING.into(),
		string_literal(&ns.name),
	));
	unit.root.object.push(PropertySpec::constant(
		"PATH".into(),
		STRING.into(),
		string_literal(""),
	));

	let scoreboards = ns
		.sorted_scoreboards()
		.into_iter()
		.filter(|x| !group.map_or(false, |group| group.is_shared_scoreboard(x)))
		.collect_vec();
	let storages = ns
		.sorted_storages()
		.into_iter()
		.filter(|x| !group.map_or(false, |group| group.is_shared_storage(x)))
		.collect_vec();
	unit.add_scoreboards(&scoreboards, &ns.name);
	unit.add_storages(&storages, &ns.name);

	for component in ns.all_components() {
		unit.add_component(component)
			.with_context(|| format!("Failed to generate component {:?}", component.path()))?;
	}

	Ok(unit.finish(format!("Bindings for namespace {}", ns.name), package))
}

/// Generates the unit holding the resources shared by the members of a group
pub fn emit_group(
	group: &NamespaceGroup,
	object_name: String,
	package: String,
	reserved: &[&str],
) -> KotlinFile {
	let mut unit = UnitBuilder::new(&group.prefix, object_name, reserved, &["PREFIX", "NAMESPACES"]);
	unit.root.object.push(PropertySpec::constant(
		"PREFIX".into(),
		STRING.into(),
		string_literal(&group.prefix),
	));
	let members = group.members.iter().map(|x| string_literal(x)).join(", ");
	unit.root.object.push(PropertySpec::new(
		"NAMESPACES".into(),
		format!("List<{STRING}>"),
		format!("listOf({members})"),
	));

	let scoreboards = group.shared.scoreboards.iter().sorted().collect_vec();
	let storages = group.shared.storages.iter().sorted().collect_vec();
	unit.add_scoreboards(&scoreboards, &group.prefix);
	unit.add_storages(&storages, &group.prefix);

	unit.finish(format!("Resources shared by the {} namespaces", group.prefix), package)
}

/// Generated object mirroring one directory level
struct Container {
	object: ObjectSpec,
	/// Dotted path to the object from the root of the unit
	qualified: String,
	scope: NameScope,
	children: BTreeMap<String, Container>,
}

impl Container {
	fn new(name: String, qualified: String, reserved: &[String]) -> Self {
		let mut scope = NameScope::with_reserved(reserved.iter().map(String::as_str));
		scope.reserve("PATH");
		Self {
			object: ObjectSpec::new(name),
			qualified,
			scope,
			children: BTreeMap::new(),
		}
	}

	/// Gets or creates the container for a subdirectory
	fn child(&mut self, segment: &str, reserved: &[String]) -> &mut Container {
		match self.children.entry(segment.to_string()) {
			Entry::Occupied(entry) => entry.into_mut(),
			Entry::Vacant(entry) => {
				let name = self.scope.claim_numbered(pascal_case(segment));
				let qualified = format!("{}.{name}", self.qualified);
				let mut child = Container::new(name, qualified, reserved);
				child.object.push(PropertySpec::constant(
					"PATH".into(),
					STRING.into(),
					format!("{}.PATH + {}", self.qualified, string_literal(&format!("{segment}/"))),
				));
				entry.insert(child)
			}
		}
	}

	fn descend(&mut self, hierarchy: &[&str], reserved: &[String]) -> &mut Container {
		match hierarchy.split_first() {
			Some((first, rest)) => self.child(first, reserved).descend(rest, reserved),
			None => self,
		}
	}

	fn into_object(self) -> ObjectSpec {
		let mut out = self.object;
		for child in self.children.into_values() {
			out.push(child.into_object());
		}
		out.sort_members();

		out
	}
}

/// Imports of a unit. A class whose simple name is already imported from another
/// package is written out in full instead
#[derive(Default)]
struct Imports {
	by_name: BTreeMap<&'static str, &'static str>,
}

impl Imports {
	fn use_class(&mut self, class: ClassName) -> String {
		match self.by_name.entry(class.name) {
			Entry::Occupied(entry) if *entry.get() != class.package => class.qualified(),
			Entry::Occupied(..) => class.name.to_string(),
			Entry::Vacant(entry) => {
				entry.insert(class.package);
				class.name.to_string()
			}
		}
	}

	fn into_set(self) -> BTreeSet<String> {
		self.by_name
			.into_iter()
			.map(|(name, package)| format!("{package}.{name}"))
			.collect()
	}
}

struct UnitBuilder<'a> {
	namespace: &'a str,
	reserved: Vec<String>,
	imports: Imports,
	root: Container,
}

impl<'a> UnitBuilder<'a> {
	fn new(namespace: &'a str, name: String, reserved: &[&str], constants: &[&str]) -> Self {
		// Nested objects must not shadow the root object, or the PATH chain breaks
		let mut reserved = reserved.iter().map(|x| x.to_string()).collect_vec();
		reserved.push(name.clone());
		let mut root = Container::new(name.clone(), name, &reserved);
		for constant in constants {
			root.scope.reserve(constant);
		}

		Self {
			namespace,
			reserved,
			imports: Imports::default(),
			root,
		}
	}

	fn add_component(&mut self, component: &Component) -> anyhow::Result<()> {
		let ty = component.component_type();
		let binding = ty.binding();
		let path = component.path();
		let args = arguments(binding, self.namespace, path);
		let class = self.imports.use_class(binding.class);
		let return_type = self.imports.use_class(binding.return_type);
		let context = binding
			.required_context
			.map(|context| self.imports.use_class(context));
		let macro_def = component.macro_def().filter(|x| x.has_parameters());
		let macro_types = macro_def.map(|_| {
			(
				self.imports.use_class(NBT_BUILDER),
				self.imports.use_class(NBT_COMPOUND),
				self.imports.use_class(DATA_ARGUMENT),
			)
		});

		let container = self
			.root
			.descend(&component.directory_hierarchy(), &self.reserved);
		let name = container.scope.claim(camel_case(&path.file_name), || {
			camel_case(&format!("{}_{}", path.file_name, binding.duplicate_suffix))
		});

		match component {
			Component::Simple { .. } => {
				let value = format!("{class}({})", args.join(", "));
				container
					.object
					.push(PropertySpec::new(name, return_type, value));
			}
			Component::Function { .. } | Component::FunctionTag { .. } => {
				let context = context.context("Function component type has no context")?;
				let callable = Callable {
					name,
					context,
					return_type,
					class,
					args,
				};
				container.object.push(callable.spec(Vec::new(), &[]));
				if let (Some(macro_def), Some(types)) = (macro_def, macro_types) {
					for overload in callable.macro_overloads(macro_def, types) {
						container.object.push(overload);
					}
				}
			}
		}

		Ok(())
	}

	fn add_scoreboards(&mut self, scoreboards: &[&Scoreboard], owner: &str) {
		if scoreboards.is_empty() {
			return;
		}

		let name = self.root.scope.claim_numbered(String::from("Scoreboards"));
		let mut obj = ObjectSpec::new(name);
		let mut scope = NameScope::new();
		let prefix = format!("{owner}.");
		for scoreboard in scoreboards {
			let local = scoreboard
				.name
				.strip_prefix(prefix.as_str())
				.unwrap_or(&scoreboard.name);
			let name = scope.claim_numbered(camel_case(local));
			obj.push(PropertySpec::constant(
				name,
				STRING.into(),
				string_literal(&scoreboard.name),
			));
		}
		self.root.object.push(obj);
	}

	fn add_storages(&mut self, storages: &[&Storage], owner: &str) {
		if storages.is_empty() {
			return;
		}

		let class = self.imports.use_class(STORAGE_ARGUMENT);
		let name = self.root.scope.claim_numbered(String::from("Storages"));
		let mut obj = ObjectSpec::new(name);
		let mut scope = NameScope::new();
		for storage in storages {
			let local = if storage.namespace == owner {
				camel_case(&storage.name)
			} else {
				camel_case(&format!("{}_{}", storage.namespace, storage.name))
			};
			let name = scope.claim_numbered(local);
			let value = format!(
				"{class}(name = {}, namespace = {})",
				string_literal(&storage.name),
				string_literal(&storage.namespace)
			);
			obj.push(PropertySpec::new(name, class.clone(), value));
		}
		self.root.object.push(obj);
	}

	fn finish(self, comment: String, package: String) -> KotlinFile {
		KotlinFile {
			comment,
			package,
			imports: self.imports.into_set(),
			object: self.root.into_object(),
		}
	}
}

/// `name = value` arguments built from the parameter sources of a binding
fn arguments(binding: &Binding, namespace: &str, path: &ComponentPath) -> Vec<String> {
	binding
		.params
		.iter()
		.map(|param| {
			let value = match param.source {
				ParamSource::FileName => format!("PATH + {}", string_literal(&path.file_name)),
				ParamSource::Namespace => String::from("NAMESPACE"),
				ParamSource::Literal(literal) => literal.to_string(),
				ParamSource::SelfReference => {
					string_literal(&format!("{namespace}:{}", path.full_path()))
				}
			};
			format!("{} = {value}", param.name)
		})
		.collect()
}

/// A generated function calling a script or script tag
struct Callable {
	name: String,
	context: String,
	return_type: String,
	class: String,
	args: Vec<String>,
}

impl Callable {
	fn spec(&self, params: Vec<ParamSpec>, extra_args: &[String]) -> FunctionSpec {
		let args = self.args.iter().chain(extra_args).join(", ");
		FunctionSpec {
			name: self.name.clone(),
			context: Some(self.context.clone()),
			params,
			return_type: self.return_type.clone(),
			body: format!("{}({args})", self.class),
		}
	}

	/// Named parameter, structured payload and raw payload overloads
	fn macro_overloads(
		&self,
		macro_def: &Macro,
		(nbt, compound, data): (String, String, String),
	) -> Vec<FunctionSpec> {
		let mut scope = NameScope::new();
		let params = macro_def
			.parameters
			.iter()
			.map(|param| (param, scope.claim_numbered(camel_case(param))))
			.collect_vec();
		let payload = params
			.iter()
			.map(|(key, ident)| format!("this[{}] = {}", string_literal(key), escape(ident)))
			.join("; ");
		let named = self.spec(
			params
				.iter()
				.map(|(_, ident)| ParamSpec::new(ident.clone(), STRING.into()))
				.collect(),
			&[format!("arguments = {nbt} {{ {payload} }}")],
		);

		let structured = self.spec(
			vec![ParamSpec::new("arguments".into(), compound)],
			&[String::from("arguments = arguments")],
		);

		let mut path = ParamSpec::new("path".into(), format!("{STRING}?"));
		path.default = Some(String::from("null"));
		let raw = self.spec(
			vec![ParamSpec::new("arguments".into(), data), path],
			&[
				String::from("arguments = arguments"),
				String::from("path = path"),
			],
		);

		vec![named, structured, raw]
	}
}
