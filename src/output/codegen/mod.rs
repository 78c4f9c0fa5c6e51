//! A small model of the Kotlin declarations we generate, and their rendering

pub mod t;

use std::collections::BTreeSet;

use self::t::macros::render_indent;
pub use self::t::Render;

use super::ident::escape;

/// One generated source file
#[derive(Debug, Clone)]
pub struct KotlinFile {
	pub comment: String,
	pub package: String,
	pub imports: BTreeSet<String>,
	pub object: ObjectSpec,
}

impl Render for KotlinFile {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		writeln!(f, "// {}", self.comment)?;
		writeln!(f, "@file:Suppress(\"unused\", \"RedundantVisibilityModifier\")")?;
		writeln!(f)?;
		writeln!(f, "package {}", self.package)?;
		if !self.imports.is_empty() {
			writeln!(f)?;
			for import in &self.imports {
				writeln!(f, "import {import}")?;
			}
		}
		writeln!(f)?;
		self.object.render(f, depth)?;

		Ok(())
	}
}

/// A Kotlin `object` declaration
#[derive(Debug, Clone, Default)]
pub struct ObjectSpec {
	pub name: String,
	pub members: Vec<Member>,
}

impl ObjectSpec {
	pub fn new(name: String) -> Self {
		Self {
			name,
			members: Vec::new(),
		}
	}

	pub fn push(&mut self, member: impl Into<Member>) {
		self.members.push(member.into());
	}

	pub fn find_object(&self, name: &str) -> Option<&ObjectSpec> {
		self.members.iter().find_map(|x| match x {
			Member::Object(obj) if obj.name == name => Some(obj),
			_ => None,
		})
	}

	pub fn find_property(&self, name: &str) -> Option<&PropertySpec> {
		self.members.iter().find_map(|x| match x {
			Member::Property(prop) if prop.name == name => Some(prop),
			_ => None,
		})
	}

	/// Orders members as constants, properties, functions, then objects
	pub fn sort_members(&mut self) {
		self.members.sort_by_key(Member::kind);
	}

	/// Every overload of a function
	pub fn find_functions(&self, name: &str) -> Vec<&FunctionSpec> {
		self.members
			.iter()
			.filter_map(|x| match x {
				Member::Function(func) if func.name == name => Some(func),
				_ => None,
			})
			.collect()
	}
}

impl Render for ObjectSpec {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		render_indent!(f, depth);
		if self.members.is_empty() {
			writeln!(f, "object {}", escape(&self.name))?;
			return Ok(());
		}

		writeln!(f, "object {} {{", escape(&self.name))?;
		let mut prev: Option<&Member> = None;
		for member in &self.members {
			// Blank line between groups of members and around anything multi-line
			if let Some(prev) = prev {
				if prev.kind() != member.kind() || member.is_block() || prev.is_block() {
					writeln!(f)?;
				}
			}
			member.render(f, depth + 1)?;
			prev = Some(member);
		}
		render_indent!(f, depth);
		writeln!(f, "}}")?;

		Ok(())
	}
}

#[derive(Debug, Clone)]
pub enum Member {
	Property(PropertySpec),
	Function(FunctionSpec),
	Object(ObjectSpec),
}

impl Member {
	fn kind(&self) -> u8 {
		match self {
			Self::Property(prop) if prop.constant => 0,
			Self::Property(..) => 1,
			Self::Function(..) => 2,
			Self::Object(..) => 3,
		}
	}

	fn is_block(&self) -> bool {
		match self {
			Self::Function(func) => func.context.is_some(),
			Self::Object(obj) => !obj.members.is_empty(),
			Self::Property(..) => false,
		}
	}
}

impl Render for Member {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		match self {
			Self::Property(prop) => prop.render(f, depth),
			Self::Function(func) => func.render(f, depth),
			Self::Object(obj) => obj.render(f, depth),
		}
	}
}

impl From<PropertySpec> for Member {
	fn from(value: PropertySpec) -> Self {
		Self::Property(value)
	}
}

impl From<FunctionSpec> for Member {
	fn from(value: FunctionSpec) -> Self {
		Self::Function(value)
	}
}

impl From<ObjectSpec> for Member {
	fn from(value: ObjectSpec) -> Self {
		Self::Object(value)
	}
}

/// A `val` or `const val` with an initializer
#[derive(Debug, Clone)]
pub struct PropertySpec {
	pub name: String,
	pub ty: String,
	pub value: String,
	pub constant: bool,
}

impl PropertySpec {
	pub fn new(name: String, ty: String, value: String) -> Self {
		Self {
			name,
			ty,
			value,
			constant: false,
		}
	}

	pub fn constant(name: String, ty: String, value: String) -> Self {
		Self {
			constant: true,
			..Self::new(name, ty, value)
		}
	}
}

impl Render for PropertySpec {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		render_indent!(f, depth);
		if self.constant {
			write!(f, "const ")?;
		}
		writeln!(f, "val {}: {} = {}", escape(&self.name), self.ty, self.value)?;

		Ok(())
	}
}

/// A function whose body is a single expression
#[derive(Debug, Clone)]
pub struct FunctionSpec {
	pub name: String,
	pub context: Option<String>,
	pub params: Vec<ParamSpec>,
	pub return_type: String,
	pub body: String,
}

impl Render for FunctionSpec {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		if let Some(context) = &self.context {
			render_indent!(f, depth);
			writeln!(f, "context({context})")?;
		}
		render_indent!(f, depth);
		write!(f, "fun {}(", escape(&self.name))?;
		for (i, param) in self.params.iter().enumerate() {
			if i != 0 {
				write!(f, ", ")?;
			}
			param.render(f, depth)?;
		}
		writeln!(f, "): {} = {}", self.return_type, self.body)?;

		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct ParamSpec {
	pub name: String,
	pub ty: String,
	pub default: Option<String>,
}

impl ParamSpec {
	pub fn new(name: String, ty: String) -> Self {
		Self {
			name,
			ty,
			default: None,
		}
	}
}

impl Render for ParamSpec {
	fn render<F>(&self, f: &mut F, _depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write,
	{
		write!(f, "{}: {}", escape(&self.name), self.ty)?;
		if let Some(default) = &self.default {
			write!(f, " = {default}")?;
		}

		Ok(())
	}
}
