//! Template substitution and rendering.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::error::{RenderError, RenderResult};
use crate::resolver::ResolvedValues;
use crate::validator::validate_yaml;

/// Renderer for `${NAME}` placeholder templates.
pub struct TemplateRenderer {
    variable_pattern: Regex,
    strict: bool,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self {
            // Match ${VARIABLE_NAME} pattern
            variable_pattern: Regex::new(r"\$\{([A-Z0-9_]+)\}").expect("placeholder pattern"),
            strict: false,
        }
    }

    /// Refuse to write templates that would keep unresolved placeholders.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replace known placeholders, leaving unknown ones verbatim.
    ///
    /// Replacement values are inserted as-is and never rescanned.
    pub fn render_content(&self, content: &str, values: &ResolvedValues) -> String {
        self.variable_pattern
            .replace_all(content, |caps: &regex::Captures| match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self, content: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.variable_pattern
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Placeholder names that `values` cannot resolve.
    pub fn unresolved(&self, content: &str, values: &ResolvedValues) -> Vec<String> {
        self.placeholders(content)
            .into_iter()
            .filter(|name| !values.contains_key(name))
            .collect()
    }

    /// Render template files into `out_dir`, keeping their base names.
    ///
    /// Files are processed in order and the first failure stops the run.
    /// Outputs written before the failure stay on disk.
    pub fn render_files(
        &self,
        paths: &[PathBuf],
        values: &ResolvedValues,
        out_dir: &Path,
    ) -> RenderResult<Vec<PathBuf>> {
        info!("Rendering {} template(s) to {:?}", paths.len(), out_dir);

        let mut written = Vec::with_capacity(paths.len());
        for path in paths {
            written.push(self.render_file(path, values, out_dir)?);
        }
        Ok(written)
    }

    fn render_file(
        &self,
        path: &Path,
        values: &ResolvedValues,
        out_dir: &Path,
    ) -> RenderResult<PathBuf> {
        let content = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if self.strict {
            let names = self.unresolved(&content, values);
            if !names.is_empty() {
                return Err(RenderError::UnresolvedPlaceholders {
                    path: path.to_path_buf(),
                    names,
                });
            }
        }

        let rendered = self.render_content(&content, values);
        validate_yaml(&rendered).map_err(|source| RenderError::Validation {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path.file_name().ok_or_else(|| RenderError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })?;
        let target = out_dir.join(file_name);

        fs::create_dir_all(out_dir).map_err(|source| RenderError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;
        fs::write(&target, rendered).map_err(|source| RenderError::Write {
            path: target.clone(),
            source,
        })?;

        debug!("Rendered: {:?}", target);
        Ok(target)
    }
}
