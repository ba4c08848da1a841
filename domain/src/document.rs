use std::fmt;

pub const DEFAULT_SVG: &str = r#"<svg width="100" height="100" viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg"></svg>"#;

/// The SVG markup currently on the canvas. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument(String);

impl SvgDocument {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn replace(&mut self, code: impl Into<String>) {
        self.0 = code.into();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new(DEFAULT_SVG)
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
