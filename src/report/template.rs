//! HTML template with `{{ name }}` placeholders.

use std::collections::HashMap;
use std::io;
use std::path::Path;

const BUILTIN_INDEX: &str = include_str!("../../templates/index.html");

/// A named template. Placeholders are `{{ key }}`; whitespace inside the
/// braces is ignored.
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    name: String,
    source: String,
}

impl HtmlTemplate {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The bundled `index.html`.
    pub fn builtin() -> Self {
        Self::new("index.html", BUILTIN_INDEX)
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute every placeholder. Unknown keys render empty and are logged.
    ///
    /// Values are inserted raw, without HTML escaping: callers must only pass
    /// markup they generated themselves (numbers, dates, rendered SVG).
    pub fn render(&self, vars: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];

            let Some(close) = after.find("}}") else {
                // Unterminated: keep the tail verbatim
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let key = after[..close].trim();
            match vars.get(key) {
                Some(value) => out.push_str(value),
                None => log::warn!("template '{}': no value for '{}'", self.name, key),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }
}
