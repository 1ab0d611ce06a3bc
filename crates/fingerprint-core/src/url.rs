//! URL and path helpers used when turning asset references into site URLs.

use url::Url;

/// Returns `true` when `reference` is an absolute URL with a scheme
/// (`https://cdn.example.com/app.js`) or a protocol-relative URL
/// (`//cdn.example.com/app.js`).
///
/// # Examples
///
/// ```
/// use fingerprint_core::url::has_scheme;
///
/// assert!(has_scheme("http://example.com/app.css"));
/// assert!(has_scheme("//cdn.example.com/app.js"));
/// assert!(!has_scheme("assets/css/main.css"));
/// assert!(!has_scheme("/assets/css/main.css"));
/// ```
pub fn has_scheme(reference: &str) -> bool {
	if reference.starts_with("//") {
		return true;
	}

	let Some((scheme, _)) = reference.split_once("://") else {
		return false;
	};

	let mut chars = scheme.chars();
	let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

	valid_scheme && Url::parse(reference).is_ok()
}

/// Joins a base URL and a path with exactly one separating slash.
///
/// # Examples
///
/// ```
/// use fingerprint_core::url::join_url;
///
/// assert_eq!(join_url("", "assets/app.css"), "/assets/app.css");
/// assert_eq!(join_url("http://example.com/", "/assets/app.css"), "http://example.com/assets/app.css");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
	let base = base.trim_end_matches('/');
	let path = path.trim_start_matches('/');
	format!("{}/{}", base, path)
}

/// Removes a trailing `/<language>` segment from a site URL.
///
/// Multi-language sites expose their URL with the active language appended
/// (`http://example.com/de`); assets live below the language-less base.
///
/// # Examples
///
/// ```
/// use fingerprint_core::url::strip_language_segment;
///
/// assert_eq!(strip_language_segment("http://example.com/de", Some("de")), "http://example.com");
/// assert_eq!(strip_language_segment("http://example.com/de", None), "http://example.com/de");
/// assert_eq!(strip_language_segment("http://example.com/design", Some("de")), "http://example.com/design");
/// ```
pub fn strip_language_segment<'a>(site_url: &'a str, language: Option<&str>) -> &'a str {
	let Some(code) = language.filter(|code| !code.is_empty()) else {
		return site_url;
	};

	site_url
		.strip_suffix(code)
		.and_then(|rest| rest.strip_suffix('/'))
		.unwrap_or(site_url)
}

/// Extracts the path part of a URL or relative reference, without query
/// string or fragment, and with surrounding slashes normalised.
///
/// # Examples
///
/// ```
/// use fingerprint_core::url::url_path;
///
/// assert_eq!(url_path("assets/css/main.css", false), "assets/css/main.css");
/// assert_eq!(url_path("/assets/css/main.css", true), "/assets/css/main.css");
/// assert_eq!(url_path("http://example.com/assets/app.js?v=1", false), "assets/app.js");
/// ```
pub fn url_path(reference: &str, leading_slash: bool) -> String {
	let path = if has_scheme(reference) && !reference.starts_with("//") {
		Url::parse(reference)
			.map(|url| url.path().to_string())
			.unwrap_or_else(|_| reference.to_string())
	} else {
		reference
			.split(['?', '#'])
			.next()
			.unwrap_or_default()
			.to_string()
	};

	let trimmed = path.trim_matches('/');
	if leading_slash {
		format!("/{}", trimmed)
	} else {
		trimmed.to_string()
	}
}

/// Returns the `scheme://host[:port]` origin of an absolute URL.
///
/// # Examples
///
/// ```
/// use fingerprint_core::url::origin;
///
/// assert_eq!(origin("https://example.com:8080/blog"), Some("https://example.com:8080".to_string()));
/// assert_eq!(origin("/blog"), None);
/// ```
pub fn origin(reference: &str) -> Option<String> {
	let url = Url::parse(reference).ok()?;
	let host = url.host_str()?;
	match url.port() {
		Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
		None => Some(format!("{}://{}", url.scheme(), host)),
	}
}
