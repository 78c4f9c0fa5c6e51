/// Strips comments, joins continued lines and drops blank lines from script text.
///
/// A comment starts at the first `#` that is not inside a quoted string and runs
/// to the end of the line. Quotes are tracked with a single toggle, so nested or
/// mixed quoting is not understood.
pub fn preprocess(text: &str) -> String {
	let mut out = Vec::new();
	let mut continued: Option<String> = None;

	for line in text.lines() {
		let line = strip_comment(line).trim();
		if line.is_empty() {
			continue;
		}

		if let Some(body) = line.strip_suffix('\\') {
			let acc = continued.get_or_insert_with(String::new);
			push_joined(acc, body.trim_end());
			continue;
		}

		let line = match continued.take() {
			Some(mut acc) => {
				push_joined(&mut acc, line);
				acc
			}
			None => line.to_string(),
		};
		out.push(line);
	}

	// A continuation marker on the last line has nothing to join with
	if let Some(acc) = continued {
		if !acc.is_empty() {
			out.push(acc);
		}
	}

	out.join("\n")
}

fn push_joined(acc: &mut String, part: &str) {
	if part.is_empty() {
		return;
	}
	if !acc.is_empty() {
		acc.push(' ');
	}
	acc.push_str(part);
}

/// Returns the line up to the start of its comment
fn strip_comment(line: &str) -> &str {
	let mut in_string = false;
	let mut prev = None;
	for (i, c) in line.char_indices() {
		match c {
			'"' | '\'' if prev != Some('\\') => in_string = !in_string,
			'#' if !in_string => return &line[..i],
			_ => {}
		}
		prev = Some(c);
	}

	line
}
