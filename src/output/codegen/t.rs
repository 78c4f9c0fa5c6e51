pub trait Render {
	fn render<F>(&self, f: &mut F, depth: usize) -> anyhow::Result<()>
	where
		F: std::fmt::Write;

	fn render_string(&self) -> anyhow::Result<String> {
		let mut out = String::new();
		self.render(&mut out, 0)?;
		Ok(out)
	}
}

pub mod macros {
	/// Writes one tab per nesting level
	macro_rules! render_indent {
		($f:expr, $depth:expr) => {
			for _ in 0..$depth {
				$f.write_char('\t')?;
			}
		};
	}

	pub(crate) use render_indent;
}
