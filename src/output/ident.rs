use rustc_hash::FxHashSet;

/// Hard keywords that have to be escaped to be used as identifiers
static KEYWORDS: [&str; 28] = [
	"as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
	"interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
	"try", "typealias", "typeof", "val", "var", "when", "while",
];

pub fn is_keyword(ident: &str) -> bool {
	KEYWORDS.contains(&ident)
}

/// Splits a resource name into words at every non-alphanumeric character
fn words(text: &str) -> impl Iterator<Item = &str> {
	text.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|x| !x.is_empty())
}

fn capitalize(word: &str, upper: bool) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) if upper => first.to_ascii_uppercase().to_string() + chars.as_str(),
		Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
		None => String::new(),
	}
}

/// Identifiers can't start with a digit or be empty
fn fix_start(ident: String) -> String {
	match ident.chars().next() {
		None => String::from("_0"),
		Some(c) if c.is_ascii_digit() => format!("_{ident}"),
		Some(_) => ident,
	}
}

/// `my-cool_dir` => `MyCoolDir`
pub fn pascal_case(text: &str) -> String {
	fix_start(words(text).map(|x| capitalize(x, true)).collect())
}

/// `my-cool_file` => `myCoolFile`
pub fn camel_case(text: &str) -> String {
	let out = words(text)
		.enumerate()
		.map(|(i, x)| capitalize(x, i != 0))
		.collect();
	fix_start(out)
}

/// Lowercase package segment, `My.Pack` => `my_pack`
pub fn package_segment(text: &str) -> String {
	let out = fix_start(
		words(text)
			.map(|x| x.to_ascii_lowercase())
			.collect::<Vec<_>>()
			.join("_"),
	);
	if is_keyword(&out) {
		format!("{out}_")
	} else {
		out
	}
}

/// Writes an identifier, escaping it when it is a keyword
pub fn escape(ident: &str) -> String {
	if is_keyword(ident) {
		format!("`{ident}`")
	} else {
		ident.to_string()
	}
}

/// A Kotlin string literal
pub fn string_literal(text: &str) -> String {
	let mut out = String::with_capacity(text.len() + 2);
	out.push('"');
	for c in text.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'$' => out.push_str("\\$"),
			'\n' => out.push_str("\\n"),
			other => out.push(other),
		}
	}
	out.push('"');

	out
}

/// Names already taken inside one generated container
#[derive(Debug, Clone, Default)]
pub struct NameScope {
	used: FxHashSet<String>,
}

impl NameScope {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_reserved<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
		let mut out = Self::new();
		for name in names {
			out.reserve(name);
		}
		out
	}

	pub fn reserve(&mut self, name: &str) {
		self.used.insert(name.to_string());
	}

	/// Takes `base`, or the suffixed name if `base` is used, or the suffixed name
	/// with a number after it
	pub fn claim(&mut self, base: String, suffixed: impl FnOnce() -> String) -> String {
		if self.used.insert(base.clone()) {
			return base;
		}

		self.claim_numbered(suffixed())
	}

	/// Takes `base`, or `base` followed by the first free number starting from 2
	pub fn claim_numbered(&mut self, base: String) -> String {
		if self.used.insert(base.clone()) {
			return base;
		}

		let mut i = 2;
		loop {
			let candidate = format!("{base}{i}");
			if self.used.insert(candidate.clone()) {
				return candidate;
			}
			i += 1;
		}
	}
}
