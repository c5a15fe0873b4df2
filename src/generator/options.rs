//! Generation options.

use serde::Deserialize;

/// Fixed set of options accepted by a generation run.
///
/// An options JSON file deserializes into this struct; absent keys keep
/// their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenOptions {
    /// Emit `/** ... */` doc comments.
    pub php_doc: bool,
    /// Indent with one tab instead of spaces.
    pub use_tab: bool,
    /// Number of spaces per indentation level when `use_tab` is off.
    pub indent_spaces: usize,
    /// Suffix inserted before `.php` for class files.
    pub class_suffix: String,
    /// Suffix inserted before `.php` for interface files.
    pub interface_suffix: String,
    /// Prefix parameters with resolved type hints.
    pub strict_types: bool,
    /// Append `: Type` return declarations to method signatures.
    pub return_types: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            php_doc: true,
            use_tab: false,
            indent_spaces: 4,
            class_suffix: String::new(),
            interface_suffix: String::new(),
            strict_types: false,
            return_types: false,
        }
    }
}

impl GenOptions {
    /// One indentation level: a tab, or `indent_spaces` spaces.
    pub fn indent_string(&self) -> String {
        if self.use_tab {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_spaces)
        }
    }
}
