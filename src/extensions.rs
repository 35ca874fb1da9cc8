// Extension resolver: turns the optional `fileExtensions` argument into the
// set of accepted extensions plus a rename table. Parsing never fails; odd
// tokens simply produce odd entries.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Extensions accepted when the user does not pass a list.
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".md", ".txt", ".docx", ".pdf"];

/// Resolved extension configuration. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    accepted: Vec<String>,
    mapping: HashMap<String, String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            accepted: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            mapping: HashMap::new(),
        }
    }
}

impl ExtensionConfig {
    /// Parse a comma separated list such as `md,pdf` or `txt=md,docx`.
    /// `None` or an empty string gives the default set.
    pub fn parse(spec: Option<&str>) -> Self {
        let spec = match spec {
            Some(s) if !s.is_empty() => s,
            _ => return ExtensionConfig::default(),
        };

        let mut accepted = Vec::new();
        let mut mapping = HashMap::new();
        for token in spec.split(',') {
            if token.contains('=') {
                let mut parts = token.split('=');
                let from = normalize(parts.next().unwrap_or_default());
                let to = with_leading_dot(parts.next().unwrap_or_default().trim());
                mapping.insert(from.clone(), to);
                accepted.push(from);
            } else {
                accepted.push(normalize(token));
            }
        }
        ExtensionConfig { accepted, mapping }
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    pub fn mapping(&self) -> &HashMap<String, String> {
        &self.mapping
    }

    /// Whether the file's extension is in the accepted set.
    pub fn accepts(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self.accepted.iter().any(|a| *a == ext),
            None => false,
        }
    }

    /// Replacement extension for `path`, if its extension is mapped.
    pub fn mapped_extension(&self, path: &Path) -> Option<&str> {
        extension_of(path).and_then(|ext| self.mapping.get(&ext).map(String::as_str))
    }

    /// File name advertised to the server. The mapped extension replaces the
    /// original one; the file on disk keeps its name.
    pub fn upload_name(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match (self.mapped_extension(path), file_name.rfind('.')) {
            (Some(to), Some(idx)) => format!("{}{}", &file_name[..idx], to),
            _ => file_name,
        }
    }
}

impl fmt::Display for ExtensionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "supported file types: {}", self.accepted.join(", "))?;
        if !self.mapping.is_empty() {
            let mut pairs: Vec<_> = self
                .mapping
                .iter()
                .map(|(from, to)| format!("{} -> {}", from, to))
                .collect();
            pairs.sort();
            write!(f, "\nfile type mapping: {}", pairs.join(", "))?;
        }
        Ok(())
    }
}

/// Lower-cased extension of the file name including the leading dot.
/// Dotfiles like `.bashrc` have none; `name.` has `.`.
pub fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let idx = name.rfind('.')?;
    if idx == 0 {
        return None;
    }
    Some(name[idx..].to_lowercase())
}

/// Accepted extensions and mapping keys are compared lower-cased.
fn normalize(token: &str) -> String {
    with_leading_dot(&token.trim().to_lowercase())
}

fn with_leading_dot(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
