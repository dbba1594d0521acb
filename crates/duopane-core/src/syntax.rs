//! Extension to syntax-label lookup.

use std::path::Path;

/// Syntax label for a file, derived from its extension.
///
/// Returns an empty string for unknown or missing extensions. The lookup is
/// case-insensitive and has no state.
pub fn syntax_label(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "";
    };

    match ext.to_ascii_lowercase().as_str() {
        "py" => "python",
        "md" => "markdown",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "ts" => "typescript",
        "js" => "javascript",
        "css" => "css",
        "html" => "html",
        "xml" => "xml",
        "sh" => "bash",
        "rs" => "rust",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(syntax_label(Path::new("main.py")), "python");
        assert_eq!(syntax_label(Path::new("README.MD")), "markdown");
        assert_eq!(syntax_label(Path::new("ci.yml")), "yaml");
        assert_eq!(syntax_label(Path::new("ci.yaml")), "yaml");
        assert_eq!(syntax_label(Path::new("/x/run.sh")), "bash");
    }

    #[test]
    fn test_unknown_extensions() {
        assert_eq!(syntax_label(Path::new("Makefile")), "");
        assert_eq!(syntax_label(Path::new("archive.tar.gz")), "");
        assert_eq!(syntax_label(Path::new(".bashrc")), "");
    }
}
