use std::fs::File;
use std::io::Read;
use std::panic::catch_unwind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use color_print::cprintln;
use dpbindgen::output::codegen::ObjectSpec;
use dpbindgen::output::GeneratedFile;
use dpbindgen::parse::source::DatapackSource;
use dpbindgen::project::{GeneratorSettings, GeneratorSettingsBuilder, OutputTarget};
use dpbindgen::{generate, generate_files};
use include_dir::{include_dir, Dir};
use tempfile::TempDir;

static FIXTURE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/test/fixtures/pack");

const PACKAGE: &str = "com.example.bindings";

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
		test!(file_layout),
		test!(namespace_members),
		test!(collision_suffixes),
		test!(macro_overloads),
		test!(group_units),
		test!(rendered_source),
		test!(directory_output),
		test!(zip_output),
		test!(threaded_generation),
	];

	for test in tests {
		let name = test.name;
		catch_unwind(|| {
			println!("     - Running codegen test '{name}'");
			(test.run)().expect("Test failed");
		})
		.unwrap_or_else(|_| panic!("Test {name} failed"));
	}
	cprintln!("<green>All codegen tests passed</green>");
}

fn extract_fixture() -> anyhow::Result<TempDir> {
	let dir = tempfile::tempdir().context("Failed to create temp dir")?;
	FIXTURE
		.extract(dir.path())
		.context("Failed to extract fixture")?;
	Ok(dir)
}

fn settings(output: OutputTarget) -> anyhow::Result<GeneratorSettings> {
	GeneratorSettingsBuilder::new(PACKAGE).output(output).build()
}

fn generate_fixture() -> anyhow::Result<Vec<GeneratedFile>> {
	let dir = extract_fixture()?;
	let settings = settings(OutputTarget::Directory("unused".into()))?;
	let (_, files) = generate_files(&DatapackSource::Directory(dir.path().into()), &settings)?;
	Ok(files)
}

fn find_unit<'a>(files: &'a [GeneratedFile], path: &str) -> anyhow::Result<&'a GeneratedFile> {
	let path = PathBuf::from(path);
	files
		.iter()
		.find(|x| x.path == path)
		.with_context(|| format!("No generated file at {path:?}"))
}

fn object<'a>(parent: &'a ObjectSpec, name: &str) -> anyhow::Result<&'a ObjectSpec> {
	parent
		.find_object(name)
		.with_context(|| format!("No object {name} in {}", parent.name))
}

fn file_layout() -> anyhow::Result<()> {
	let files = generate_fixture()?;
	let mut paths: Vec<_> = files.iter().map(|x| x.path.clone()).collect();
	paths.sort();
	let expected: Vec<PathBuf> = [
		"bindings/Bs.kt",
		"bindings/Mypack.kt",
		"bindings/bs/Log.kt",
		"bindings/bs/Math.kt",
	]
	.iter()
	.map(PathBuf::from)
	.collect();
	assert_eq!(paths, expected);

	let math = find_unit(&files, "bindings/bs/Math.kt")?;
	assert_eq!(math.unit.package, "com.example.bindings.bs");
	assert_eq!(math.unit.object.name, "Math");

	Ok(())
}

fn namespace_members() -> anyhow::Result<()> {
	let files = generate_fixture()?;
	let mypack = &find_unit(&files, "bindings/Mypack.kt")?.unit.object;

	let namespace = mypack.find_property("NAMESPACE").context("No NAMESPACE")?;
	assert_eq!(namespace.value, "\"mypack\"");
	let path = mypack.find_property("PATH").context("No PATH")?;
	assert_eq!(path.value, "\"\"");

	let chests = object(mypack, "Chests")?;
	let loot = chests.find_property("myLoot").context("No myLoot")?;
	assert_eq!(loot.ty, "LootTableArgument");
	assert_eq!(
		loot.value,
		"LootTableArgument(name = PATH + \"my-loot\", namespace = NAMESPACE)"
	);
	let chests_path = chests.find_property("PATH").context("No Chests.PATH")?;
	assert_eq!(chests_path.value, "Mypack.PATH + \"chests/\"");

	let house = mypack.find_property("house").context("No house")?;
	assert_eq!(house.value, "StructureArgument(name = \"mypack:house\")");

	let scoreboards = object(mypack, "Scoreboards")?;
	let counter = scoreboards.find_property("counter").context("No counter")?;
	assert_eq!(counter.value, "\"counter\"");
	let storages = object(mypack, "Storages")?;
	let settings = storages
		.find_property("otherSettings")
		.context("No otherSettings")?;
	assert_eq!(
		settings.value,
		"StorageArgument(name = \"settings\", namespace = \"other\")"
	);

	Ok(())
}

fn collision_suffixes() -> anyhow::Result<()> {
	let files = generate_fixture()?;
	let mypack = &find_unit(&files, "bindings/Mypack.kt")?.unit.object;

	assert_eq!(
		mypack.find_property("foo").context("No foo")?.ty,
		"AdvancementArgument"
	);
	assert_eq!(
		mypack.find_property("fooRecipe").context("No fooRecipe")?.ty,
		"RecipeArgument"
	);

	let load = mypack.find_functions("load");
	assert_eq!(load.len(), 1);
	assert_eq!(
		load[0].body,
		"function(name = PATH + \"load\", namespace = NAMESPACE)"
	);
	let tag = mypack.find_functions("loadTag");
	assert_eq!(tag.len(), 1);
	assert_eq!(
		tag[0].body,
		"function(name = PATH + \"load\", namespace = NAMESPACE, group = true)"
	);

	Ok(())
}

fn macro_overloads() -> anyhow::Result<()> {
	let files = generate_fixture()?;
	let mypack = &find_unit(&files, "bindings/Mypack.kt")?.unit.object;
	let story = object(mypack, "Story")?;
	assert!(story.find_property("root").is_some());

	let greet = story.find_functions("greet");
	assert_eq!(greet.len(), 4);
	for overload in &greet {
		assert_eq!(overload.context.as_deref(), Some("Function"));
		assert_eq!(overload.return_type, "Command");
	}
	assert!(greet[0].params.is_empty());

	let named: Vec<_> = greet[1].params.iter().map(|x| x.name.as_str()).collect();
	assert_eq!(named, vec!["name", "place"]);
	assert!(greet[1]
		.body
		.ends_with("arguments = nbt { this[\"name\"] = name; this[\"place\"] = place })"));

	assert_eq!(greet[2].params.len(), 1);
	assert_eq!(greet[2].params[0].ty, "NbtCompound");

	assert_eq!(greet[3].params.len(), 2);
	assert_eq!(greet[3].params[0].ty, "DataArgument");
	assert_eq!(greet[3].params[1].ty, "String?");
	assert_eq!(greet[3].params[1].default.as_deref(), Some("null"));

	let math = &find_unit(&files, "bindings/bs/Math.kt")?.unit;
	assert_eq!(math.object.find_functions("power").len(), 4);
	assert_eq!(math.object.find_functions("add").len(), 1);
	assert!(math.imports.contains("io.github.ayfri.kore.utils.nbt"));

	Ok(())
}

fn group_units() -> anyhow::Result<()> {
	let files = generate_fixture()?;

	let group = &find_unit(&files, "bindings/Bs.kt")?.unit;
	assert_eq!(group.package, PACKAGE);
	let prefix = group.object.find_property("PREFIX").context("No PREFIX")?;
	assert_eq!(prefix.value, "\"bs\"");
	let members = group
		.object
		.find_property("NAMESPACES")
		.context("No NAMESPACES")?;
	assert_eq!(members.value, "listOf(\"bs.log\", \"bs.math\")");
	let shared = object(&group.object, "Scoreboards")?;
	assert_eq!(
		shared.find_property("ctx").context("No ctx")?.value,
		"\"bs.ctx\""
	);
	assert!(object(&group.object, "Storages")?
		.find_property("in")
		.is_some());

	// Shared resources only live in the group unit
	let math = &find_unit(&files, "bindings/bs/Math.kt")?.unit.object;
	let scoreboards = object(math, "Scoreboards")?;
	assert!(scoreboards.find_property("result").is_some());
	assert!(scoreboards.find_property("bsCtx").is_none());
	let storages = object(math, "Storages")?;
	assert!(storages.find_property("bsOut").is_some());
	assert!(storages.find_property("bsIn").is_none());

	let log = &find_unit(&files, "bindings/bs/Log.kt")?.unit.object;
	let scoreboards = object(log, "Scoreboards")?;
	assert!(scoreboards.find_property("level").is_some());
	// Every storage of bs.log is shared
	assert!(log.find_object("Storages").is_none());

	Ok(())
}

fn rendered_source() -> anyhow::Result<()> {
	let files = generate_fixture()?;
	let group = find_unit(&files, "bindings/Bs.kt")?;
	let text = &group.contents;

	assert!(text.starts_with("// "));
	assert!(text.contains("\npackage com.example.bindings\n"));
	assert!(text.contains("import io.github.ayfri.kore.arguments.types.resources.StorageArgument\n"));
	assert!(text.contains("\tconst val PREFIX: String = \"bs\"\n"));
	assert!(text.contains("\t\tconst val ctx: String = \"bs.ctx\"\n"));
	assert!(text.contains(
		"\t\tval `in`: StorageArgument = StorageArgument(name = \"in\", namespace = \"bs\")\n"
	));

	let mypack = find_unit(&files, "bindings/Mypack.kt")?;
	let text = &mypack.contents;
	assert!(text.contains("\tcontext(Function)\n\tfun load(): Command = "));
	assert!(text.contains("\tobject Story {\n\t\tconst val PATH: String = Mypack.PATH + \"story/\"\n"));
	assert!(text.contains(
		"import io.github.ayfri.kore.arguments.types.resources.StructureArgument\n"
	));
	assert!(text.contains(
		"val village: io.github.ayfri.kore.arguments.types.resources.worldgen.StructureArgument"
	));

	Ok(())
}

fn directory_output() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	let out = tempfile::tempdir()?;
	let settings = settings(OutputTarget::Directory(out.path().into()))?;
	let summary = generate(&DatapackSource::Directory(dir.path().into()), &settings)?;

	assert_eq!(summary.namespaces, 3);
	assert_eq!(summary.groups, 1);
	assert_eq!(summary.files, 4);
	for path in ["bindings/Bs.kt", "bindings/Mypack.kt", "bindings/bs/Math.kt"] {
		if !out.path().join(path).is_file() {
			bail!("Missing output file {path}");
		}
	}

	Ok(())
}

fn read_entry(archive: &Path, name: &str) -> anyhow::Result<String> {
	let mut archive = zip::ZipArchive::new(File::open(archive)?)?;
	let mut out = String::new();
	archive.by_name(name)?.read_to_string(&mut out)?;
	Ok(out)
}

fn zip_output() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	let out = tempfile::tempdir()?;
	let archive = out.path().join("bindings.zip");
	let settings = settings(OutputTarget::from_path(archive.clone()))?;
	generate(&DatapackSource::Directory(dir.path().into()), &settings)?;

	let expected = generate_fixture()?;
	let math = find_unit(&expected, "bindings/bs/Math.kt")?;
	assert_eq!(read_entry(&archive, "bindings/bs/Math.kt")?, math.contents);

	Ok(())
}

fn threaded_generation() -> anyhow::Result<()> {
	let dir = extract_fixture()?;
	let source = DatapackSource::Directory(dir.path().into());
	let single = GeneratorSettingsBuilder::new(PACKAGE).threads(1).build()?;
	let (_, single) = generate_files(&source, &single)?;
	let (_, default) = generate_files(&source, &settings(OutputTarget::Directory("unused".into()))?)?;

	assert_eq!(single.len(), default.len());
	for (l, r) in single.iter().zip(&default) {
		assert_eq!(l.path, r.path);
		assert_eq!(l.contents, r.contents);
	}

	Ok(())
}
