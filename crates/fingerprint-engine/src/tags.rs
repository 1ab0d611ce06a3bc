//! HTML tag rendering for fingerprinted assets.

use crate::attrs::{AttrValue, Attributes};

/// Renders a reference to a fingerprinted URL.
pub trait Renderer: Send + Sync {
	/// File extension this renderer serves, used by `@auto`.
	fn extension(&self) -> &str;

	fn render(&self, url: &str, attrs: &Attributes) -> Option<String>;
}

/// `<link href=".." rel="stylesheet">`
///
/// # Examples
///
/// ```
/// use fingerprint_engine::{Attributes, Renderer, Stylesheet};
///
/// let html = Stylesheet.render("/assets/app.css?v=1", &Attributes::media("print"));
/// assert_eq!(
///     html.as_deref(),
///     Some(r#"<link href="/assets/app.css?v=1" rel="stylesheet" media="print">"#)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Stylesheet;

impl Renderer for Stylesheet {
	fn extension(&self) -> &str {
		"css"
	}

	fn render(&self, url: &str, attrs: &Attributes) -> Option<String> {
		let merged = merge(&[("href", url), ("rel", "stylesheet")], attrs);
		Some(format!("<link{}>", render_attrs(&merged)))
	}
}

/// `<script src=".."></script>`
#[derive(Debug, Clone, Copy, Default)]
pub struct Script;

impl Renderer for Script {
	fn extension(&self) -> &str {
		"js"
	}

	fn render(&self, url: &str, attrs: &Attributes) -> Option<String> {
		let merged = merge(&[("src", url)], attrs);
		Some(format!("<script{}></script>", render_attrs(&merged)))
	}
}

/// Renderer registered under `name` (`css` or `js`).
pub fn renderer_for(name: &str) -> Option<&'static dyn Renderer> {
	match name {
		"css" => Some(&Stylesheet),
		"js" => Some(&Script),
		_ => None,
	}
}

// Caller attributes override the defaults in place.
fn merge(defaults: &[(&str, &str)], attrs: &Attributes) -> Attributes {
	let mut merged: Attributes = defaults.iter().copied().collect();
	for (name, value) in attrs {
		merged.insert(name.as_str(), value.clone());
	}
	merged
}

/// Renders ` name="value"` pairs. `true` renders a bare name and `false`
/// drops the attribute.
pub fn render_attrs(attrs: &Attributes) -> String {
	let mut html = String::new();
	for (name, value) in attrs {
		match value {
			AttrValue::Bool(false) => {}
			AttrValue::Bool(true) => {
				html.push(' ');
				html.push_str(&escape_attr(name));
			}
			AttrValue::Text(text) => {
				html.push(' ');
				html.push_str(&escape_attr(name));
				html.push_str("=\"");
				html.push_str(&escape_attr(text));
				html.push('"');
			}
		}
	}
	html
}

/// Escapes text for use inside a double-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_script_with_flags() {
		let attrs = Attributes::new().with("defer", true).with("async", false);
		assert_eq!(
			Script.render("/assets/app.js", &attrs).as_deref(),
			Some(r#"<script src="/assets/app.js" defer></script>"#)
		);
	}

	#[rstest]
	fn test_caller_overrides_rel() {
		let attrs = Attributes::new().with("rel", "preload");
		assert_eq!(
			Stylesheet.render("/a.css", &attrs).as_deref(),
			Some(r#"<link href="/a.css" rel="preload">"#)
		);
	}

	#[rstest]
	fn test_values_are_escaped() {
		let html = Script
			.render("\"><script>alert(1)</script>", &Attributes::new())
			.unwrap();
		assert!(!html.contains("<script>alert"));
		assert!(html.contains("&quot;&gt;&lt;script&gt;"));
	}

	#[rstest]
	#[case("css", Some("css"))]
	#[case("js", Some("js"))]
	#[case("svg", None)]
	fn test_renderer_for(#[case] name: &str, #[case] extension: Option<&str>) {
		assert_eq!(renderer_for(name).map(|renderer| renderer.extension()), extension);
	}
}
