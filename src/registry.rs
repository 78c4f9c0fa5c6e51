//! Catalog of every resource kind a datapack namespace can hold, and the shape of
//! the binding generated for each of them

use std::fmt::Display;

const RESOURCES: &str = "io.github.ayfri.kore.arguments.types.resources";
const TAGGED: &str = "io.github.ayfri.kore.arguments.types.resources.tagged";
const WORLDGEN: &str = "io.github.ayfri.kore.arguments.types.resources.worldgen";
const COMMANDS: &str = "io.github.ayfri.kore.commands";
const FUNCTIONS: &str = "io.github.ayfri.kore.functions";

/// A fully qualified Kotlin name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
	pub package: &'static str,
	pub name: &'static str,
}

impl ClassName {
	pub const fn new(package: &'static str, name: &'static str) -> Self {
		Self { package, name }
	}

	pub fn qualified(&self) -> String {
		format!("{}.{}", self.package, self.name)
	}
}

impl Display for ClassName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

/// Where the value of a generated argument comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
	/// The component's path relative to its namespace
	FileName,
	/// The namespace constant of the generated unit
	Namespace,
	/// A fixed expression
	Literal(&'static str),
	/// The full `namespace:path` location of the component itself
	SelfReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
	pub name: &'static str,
	pub source: ParamSource,
}

impl Param {
	pub const fn new(name: &'static str, source: ParamSource) -> Self {
		Self { name, source }
	}
}

/// Generated shape of a component type
#[derive(Debug, Clone, Copy)]
pub struct Binding {
	/// The class constructed, or the function called, by the generated member
	pub class: ClassName,
	pub return_type: ClassName,
	/// Context receiver the generated member requires. Only scripts have one
	pub required_context: Option<ClassName>,
	pub params: &'static [Param],
	/// Appended to a member name that collides with a sibling
	pub duplicate_suffix: &'static str,
}

const NAME_PARAMS: &[Param] = &[
	Param::new("name", ParamSource::FileName),
	Param::new("namespace", ParamSource::Namespace),
];

const DIMENSION_PARAMS: &[Param] = &[
	Param::new("dimension", ParamSource::FileName),
	Param::new("namespace", ParamSource::Namespace),
];

const ENCHANTMENT_PARAMS: &[Param] = &[
	Param::new("enchantment", ParamSource::FileName),
	Param::new("namespace", ParamSource::Namespace),
];

const BIOME_PARAMS: &[Param] = &[
	Param::new("biome", ParamSource::FileName),
	Param::new("namespace", ParamSource::Namespace),
];

const STRUCTURE_PARAMS: &[Param] = &[Param::new("name", ParamSource::SelfReference)];

const FUNCTION_TAG_PARAMS: &[Param] = &[
	Param::new("name", ParamSource::FileName),
	Param::new("namespace", ParamSource::Namespace),
	Param::new("group", ParamSource::Literal("true")),
];

const fn argument(package: &'static str, name: &'static str, suffix: &'static str) -> Binding {
	let class = ClassName::new(package, name);
	Binding {
		class,
		return_type: class,
		required_context: None,
		params: NAME_PARAMS,
		duplicate_suffix: suffix,
	}
}

/// An argument whose primary parameter is not called `name`
const fn named_argument(
	package: &'static str,
	name: &'static str,
	suffix: &'static str,
	params: &'static [Param],
) -> Binding {
	Binding {
		params,
		..argument(package, name, suffix)
	}
}

const fn command(params: &'static [Param], suffix: &'static str) -> Binding {
	Binding {
		class: ClassName::new(COMMANDS, "function"),
		return_type: ClassName::new(COMMANDS, "Command"),
		required_context: Some(ClassName::new(FUNCTIONS, "Function")),
		params,
		duplicate_suffix: suffix,
	}
}

/// How the namespace parser treats files of a component type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
	/// Executable scripts, parsed for scoreboards, storages and macros
	Script,
	/// Tags grouping scripts
	ScriptTag,
	/// Any other declarative resource
	Resource,
}

macro_rules! component_types {
	(@ext) => { "json" };
	(@ext $ext:literal) => { $ext };
	($($variant:ident => $dir:literal $(($ext:literal))?: $binding:expr;)*) => {
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum ComponentType {
			$($variant,)*
		}

		impl ComponentType {
			pub const ALL: &'static [ComponentType] = &[$(Self::$variant,)*];

			/// Directory of this type relative to a namespace directory
			pub fn directory_name(&self) -> &'static str {
				match self {
					$(Self::$variant => $dir,)*
				}
			}

			pub fn file_extension(&self) -> &'static str {
				match self {
					$(Self::$variant => component_types!(@ext $($ext)?),)*
				}
			}

			pub fn binding(&self) -> &'static Binding {
				match self {
					$(Self::$variant => {
						static BINDING: Binding = $binding;
						&BINDING
					})*
				}
			}
		}
	};
}

component_types! {
	Advancement => "advancement": argument(RESOURCES, "AdvancementArgument", "Advancement");
	BannerPattern => "banner_pattern": argument(RESOURCES, "BannerPatternArgument", "BannerPattern");
	ChatType => "chat_type": argument(RESOURCES, "ChatTypeArgument", "ChatType");
	DamageType => "damage_type": argument(RESOURCES, "DamageTypeArgument", "DamageType");
	Dimension => "dimension": named_argument(RESOURCES, "DimensionArgument", "Dimension", DIMENSION_PARAMS);
	DimensionType => "dimension_type": argument(WORLDGEN, "DimensionTypeArgument", "DimensionType");
	Enchantment => "enchantment": named_argument(RESOURCES, "EnchantmentArgument", "Enchantment", ENCHANTMENT_PARAMS);
	EnchantmentProvider => "enchantment_provider": argument(RESOURCES, "EnchantmentProviderArgument", "EnchantmentProvider");
	Function => "function" ("mcfunction"): command(NAME_PARAMS, "Function");
	Instrument => "instrument": argument(RESOURCES, "InstrumentArgument", "Instrument");
	ItemModifier => "item_modifier": argument(RESOURCES, "ItemModifierArgument", "ItemModifier");
	JukeboxSong => "jukebox_song": argument(RESOURCES, "JukeboxSongArgument", "JukeboxSong");
	LootTable => "loot_table": argument(RESOURCES, "LootTableArgument", "LootTable");
	PaintingVariant => "painting_variant": argument(RESOURCES, "PaintingVariantArgument", "PaintingVariant");
	Predicate => "predicate": argument(RESOURCES, "PredicateArgument", "Predicate");
	Recipe => "recipe": argument(RESOURCES, "RecipeArgument", "Recipe");
	Structure => "structure" ("nbt"): named_argument(RESOURCES, "StructureArgument", "StructureTemplate", STRUCTURE_PARAMS);
	TrimMaterial => "trim_material": argument(RESOURCES, "TrimMaterialArgument", "TrimMaterial");
	TrimPattern => "trim_pattern": argument(RESOURCES, "TrimPatternArgument", "TrimPattern");
	WolfVariant => "wolf_variant": argument(RESOURCES, "WolfVariantArgument", "WolfVariant");

	BannerPatternTag => "tags/banner_pattern": argument(TAGGED, "BannerPatternTagArgument", "BannerPatternTag");
	BlockTag => "tags/block": argument(TAGGED, "BlockTagArgument", "BlockTag");
	DamageTypeTag => "tags/damage_type": argument(TAGGED, "DamageTypeTagArgument", "DamageTypeTag");
	EnchantmentTag => "tags/enchantment": argument(TAGGED, "EnchantmentTagArgument", "EnchantmentTag");
	EntityTypeTag => "tags/entity_type": argument(TAGGED, "EntityTypeTagArgument", "EntityTypeTag");
	FluidTag => "tags/fluid": argument(TAGGED, "FluidTagArgument", "FluidTag");
	FunctionTag => "tags/function": command(FUNCTION_TAG_PARAMS, "Tag");
	GameEventTag => "tags/game_event": argument(TAGGED, "GameEventTagArgument", "GameEventTag");
	InstrumentTag => "tags/instrument": argument(TAGGED, "InstrumentTagArgument", "InstrumentTag");
	ItemTag => "tags/item": argument(TAGGED, "ItemTagArgument", "ItemTag");
	PaintingVariantTag => "tags/painting_variant": argument(TAGGED, "PaintingVariantTagArgument", "PaintingVariantTag");
	PointOfInterestTypeTag => "tags/point_of_interest_type": argument(TAGGED, "PointOfInterestTypeTagArgument", "PointOfInterestTypeTag");
	BiomeTag => "tags/worldgen/biome": argument(TAGGED, "BiomeTagArgument", "BiomeTag");
	StructureTag => "tags/worldgen/structure": argument(TAGGED, "StructureTagArgument", "StructureTag");

	Biome => "worldgen/biome": named_argument(WORLDGEN, "BiomeArgument", "Biome", BIOME_PARAMS);
	ConfiguredCarver => "worldgen/configured_carver": argument(WORLDGEN, "ConfiguredCarverArgument", "ConfiguredCarver");
	ConfiguredFeature => "worldgen/configured_feature": argument(WORLDGEN, "ConfiguredFeatureArgument", "ConfiguredFeature");
	DensityFunction => "worldgen/density_function": argument(WORLDGEN, "DensityFunctionArgument", "DensityFunction");
	FlatLevelGeneratorPreset => "worldgen/flat_level_generator_preset": argument(WORLDGEN, "FlatLevelGeneratorPresetArgument", "FlatLevelGeneratorPreset");
	MultiNoiseBiomeSourceParameterList => "worldgen/multi_noise_biome_source_parameter_list": argument(WORLDGEN, "MultiNoiseBiomeSourceParameterListArgument", "ParameterList");
	Noise => "worldgen/noise": argument(WORLDGEN, "NoiseArgument", "Noise");
	NoiseSettings => "worldgen/noise_settings": argument(WORLDGEN, "NoiseSettingsArgument", "NoiseSettings");
	PlacedFeature => "worldgen/placed_feature": argument(WORLDGEN, "PlacedFeatureArgument", "PlacedFeature");
	ProcessorList => "worldgen/processor_list": argument(WORLDGEN, "ProcessorListArgument", "ProcessorList");
	WorldgenStructure => "worldgen/structure": argument(WORLDGEN, "StructureArgument", "Structure");
	StructureSet => "worldgen/structure_set": argument(WORLDGEN, "StructureSetArgument", "StructureSet");
	TemplatePool => "worldgen/template_pool": argument(WORLDGEN, "TemplatePoolArgument", "TemplatePool");
	WorldPreset => "worldgen/world_preset": argument(WORLDGEN, "WorldPresetArgument", "WorldPreset");
}

impl ComponentType {
	pub fn kind(&self) -> ComponentKind {
		match self {
			Self::Function => ComponentKind::Script,
			Self::FunctionTag => ComponentKind::ScriptTag,
			_ => ComponentKind::Resource,
		}
	}
}

impl Display for ComponentType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.directory_name())
	}
}
