use std::fs::File;
use std::io::Write;
use std::panic::catch_unwind;
use std::path::Path;

use anyhow::{bail, Context};
use color_print::cprintln;
use dpbindgen::common::{Datapack, ParsedNamespace, Scoreboard, Storage};
use dpbindgen::error::error_class;
use dpbindgen::parse::parse_datapack;
use dpbindgen::parse::source::DatapackSource;
use dpbindgen::registry::ComponentType;
use include_dir::{include_dir, Dir};
use tempfile::TempDir;

static FIXTURE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/test/fixtures/pack");

struct Test {
	name: &'static str,
	run: fn() -> anyhow::Result<()>,
}

macro_rules! test {
	($name:ident) => {
		Test {
			name: stringify!($name),
			run: $name,
		}
	};
}

fn main() {
	let tests = [
		test!(group_detection),
		test!(local_resources),
		test!(macros),
		test!(components),
		test!(empty_datapack),
		test!(idempotence),
		test!(zip_input),
		test!(missing_data_dir),
		test!(missing_manifest),
	];

	for test in tests {
		let name = test.name;
		catch_unwind(|| {
			println!("     - Running parse test '{name}'");
			(test.run)().expect("Test failed");
		})
		.unwrap_or_else(|_| panic!("Test {name} failed"));
	}
	cprintln!("<green>All parse tests passed</green>");
}

fn extract_fixture() -> anyhow::Result<TempDir> {
	let dir = tempfile::tempdir().context("Failed to create temp dir")?;
	FIXTURE
		.extract(dir.path())
		.context("Failed to extract fixture")?;
	Ok(dir)
}

fn parse_fixture() -> anyhow::Result<Datapack> {
	let dir = extract_fixture()?;
	parse_datapack(dir.path())
}

fn namespace<'a>(datapack: &'a Datapack, name: &str) -> anyhow::Result<&'a ParsedNamespace> {
	datapack
		.namespaces
		.iter()
		.find(|x| x.name == name)
		.with_context(|| format!("No namespace {name}"))
}

fn scoreboard_names<'a>(scoreboards: impl IntoIterator<Item = &'a Scoreboard>) -> Vec<&'a str> {
	let mut out: Vec<_> = scoreboards.into_iter().map(|x| x.name.as_str()).collect();
	out.sort();
	out
}

fn storage_ids<'a>(storages: impl IntoIterator<Item = &'a Storage>) -> Vec<String> {
	let mut out: Vec<_> = storages.into_iter().map(|x| x.id()).collect();
	out.sort();
	out
}

fn group_detection() -> anyhow::Result<()> {
	let datapack = parse_fixture()?;
	let names: Vec<_> = datapack.namespaces.iter().map(|x| x.name.as_str()).collect();
	assert_eq!(names, vec!["bs.log", "bs.math", "mypack"]);

	assert_eq!(datapack.groups.len(), 1);
	let group = datapack.group("bs").context("No bs group")?;
	assert_eq!(group.members, vec!["bs.log", "bs.math"]);
	assert_eq!(scoreboard_names(&group.shared.scoreboards), vec!["bs.ctx"]);
	assert_eq!(storage_ids(&group.shared.storages), vec!["bs:in"]);
	assert!(datapack.group_of("mypack").is_none());

	Ok(())
}

fn local_resources() -> anyhow::Result<()> {
	let datapack = parse_fixture()?;
	let math = namespace(&datapack, "bs.math")?;
	assert_eq!(
		scoreboard_names(&math.local_scoreboards),
		vec!["bs.ctx", "bs.math.result"]
	);
	assert_eq!(storage_ids(&math.local_storages), vec!["bs:in", "bs:out"]);

	let result = math
		.local_scoreboards
		.iter()
		.find(|x| x.name == "bs.math.result")
		.context("No result scoreboard")?;
	assert_eq!(result.namespace, "bs.math");
	assert_eq!(result.source_namespace, "bs.math");

	let mypack = namespace(&datapack, "mypack")?;
	assert_eq!(scoreboard_names(&mypack.local_scoreboards), vec!["counter"]);
	assert_eq!(storage_ids(&mypack.local_storages), vec!["other:settings"]);

	Ok(())
}

fn macros() -> anyhow::Result<()> {
	let datapack = parse_fixture()?;
	let math = namespace(&datapack, "bs.math")?;
	assert_eq!(math.macros.len(), 1);
	assert_eq!(math.macros[0].function, "power");
	assert_eq!(math.macros[0].parameters, vec!["value", "exp"]);

	let mypack = namespace(&datapack, "mypack")?;
	let greet = mypack
		.all_components()
		.find(|x| x.full_path() == "story/greet")
		.context("No greet function")?;
	let Some(macro_def) = greet.macro_def() else {
		bail!("greet is not a macro")
	};
	assert_eq!(macro_def.parameters, vec!["name", "place"]);

	let load = mypack
		.all_components()
		.find(|x| x.full_path() == "load" && x.component_type() == ComponentType::Function)
		.context("No load function")?;
	assert!(load.macro_def().is_none());

	Ok(())
}

fn components() -> anyhow::Result<()> {
	let datapack = parse_fixture()?;
	let mypack = namespace(&datapack, "mypack")?;

	let paths = |ty: ComponentType| -> Vec<String> {
		mypack
			.components
			.get(&ty)
			.map(|x| x.iter().map(|x| x.full_path()).collect())
			.unwrap_or_default()
	};
	assert_eq!(paths(ComponentType::Advancement), vec!["foo", "story/root"]);
	assert_eq!(paths(ComponentType::Function), vec!["load", "story/greet"]);
	assert_eq!(paths(ComponentType::FunctionTag), vec!["load"]);
	assert_eq!(paths(ComponentType::LootTable), vec!["chests/my-loot"]);
	assert_eq!(paths(ComponentType::Structure), vec!["house"]);
	assert_eq!(paths(ComponentType::WorldgenStructure), vec!["village"]);
	assert!(!mypack.components.contains_key(&ComponentType::Biome));
	assert_eq!(mypack.component_count(), 9);

	Ok(())
}

fn empty_datapack() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	std::fs::create_dir(dir.path().join("data"))?;
	std::fs::write(dir.path().join("pack.mcmeta"), "{\"pack\": {}}")?;

	let source = DatapackSource::Directory(dir.path().into());
	let opened = source.open(true)?;
	let datapack = parse_datapack(&opened.root)?;
	assert!(datapack.is_empty());
	assert!(datapack.groups.is_empty());

	Ok(())
}

fn idempotence() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	let first = parse_datapack(dir.path())?;
	let second = parse_datapack(dir.path())?;

	assert_eq!(first.namespaces.len(), second.namespaces.len());
	for (l, r) in first.namespaces.iter().zip(&second.namespaces) {
		assert_eq!(l.name, r.name);
		assert_eq!(l.components, r.components);
		assert_eq!(l.local_scoreboards, r.local_scoreboards);
		assert_eq!(l.local_storages, r.local_storages);
		assert_eq!(l.macros, r.macros);
	}

	Ok(())
}

/// Zips a directory under a single top-level folder
fn zip_dir(dir: &Path, out: &Path) -> anyhow::Result<()> {
	let mut zip = zip::ZipWriter::new(File::create(out)?);
	for entry in walkdir::WalkDir::new(dir) {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}
		let relative = entry.path().strip_prefix(dir)?;
		let name = relative
			.iter()
			.map(|x| x.to_string_lossy())
			.collect::<Vec<_>>()
			.join("/");
		zip.start_file(format!("pack/{name}"), zip::write::FileOptions::default())?;
		zip.write_all(&std::fs::read(entry.path())?)?;
	}
	zip.finish()?;

	Ok(())
}

fn zip_input() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	let out = tempfile::tempdir()?;
	let archive = out.path().join("pack.zip");
	zip_dir(dir.path(), &archive)?;

	let source = DatapackSource::Zip(archive);
	let opened = source.open(true)?;
	assert!(opened.is_unpacked());
	let from_zip = parse_datapack(&opened.root)?;
	let from_dir = parse_datapack(dir.path())?;

	let names = |datapack: &Datapack| -> Vec<String> {
		datapack.namespaces.iter().map(|x| x.name.clone()).collect()
	};
	assert_eq!(names(&from_zip), names(&from_dir));
	assert_eq!(from_zip.groups.len(), from_dir.groups.len());

	Ok(())
}

fn missing_data_dir() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	std::fs::write(dir.path().join("pack.mcmeta"), "{\"pack\": {}}")?;

	let Err(e) = parse_datapack(dir.path()) else {
		bail!("Datapack without a data directory was accepted")
	};
	assert_eq!(error_class(&e), "structure");

	let Err(e) = DatapackSource::Directory(dir.path().into()).open(false) else {
		bail!("Datapack without a data directory was opened")
	};
	assert_eq!(error_class(&e), "structure");

	let Err(e) = DatapackSource::Directory(dir.path().join("nope")).open(false) else {
		bail!("Missing input was opened")
	};
	assert_eq!(error_class(&e), "config");

	Ok(())
}

fn missing_manifest() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	std::fs::remove_file(dir.path().join("pack.mcmeta"))?;
	let source = DatapackSource::Directory(dir.path().into());

	let Err(e) = source.open(true) else {
		bail!("Datapack without a manifest was accepted")
	};
	assert_eq!(error_class(&e), "structure");
	assert!(source.open(false).is_ok());

	Ok(())
}
