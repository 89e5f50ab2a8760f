//! Menu document service
//!
//! Loads an outline grid, rebuilds the tree and renders the menu JSON document.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::application::{parse_grid, ApplicationError, ApplicationResult, InputFormat, IoResultExt};
use crate::config::Settings;
use crate::domain::{build_outline, serialize_outline, Choice, Grid, OutlineNode};
use crate::infrastructure::traits::FileSystem;

/// Per-call overrides of the configured rendering options.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Pretty-print the JSON (None: use settings)
    pub pretty: Option<bool>,
    /// Envelope key (None: use settings)
    pub envelope_key: Option<String>,
    /// Emit the bare choice without envelope
    pub raw: bool,
}

/// Service turning outline grids into menu documents.
pub struct MenuService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl MenuService {
    /// Create a new menu service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and parse a grid file.
    ///
    /// `format` overrides the configured input format; `Auto` is resolved
    /// from the file extension.
    #[instrument(level = "debug", skip(self))]
    pub fn load_grid(&self, path: &Path, format: Option<InputFormat>) -> ApplicationResult<Grid> {
        let text = self.fs.read_to_string(path).with_source_context("read grid", path.display())?;
        let format = format
            .unwrap_or(self.settings.input_format)
            .resolve(Some(path));
        debug!("load_grid: path={}, format={}", path.display(), format);
        self.parse_grid(&text, format, &path.display().to_string())
    }

    /// Parse grid text that did not come from a file (e.g. stdin).
    pub fn parse_grid(&self, text: &str, format: InputFormat, source_name: &str) -> ApplicationResult<Grid> {
        parse_grid(text, format.resolve(None), self.settings.csv_delimiter, source_name)
    }

    /// Rebuild the outline; an empty grid is reported as unavailable data.
    #[instrument(level = "debug", skip(self, grid), fields(rows = grid.len()))]
    pub fn build_outline(&self, grid: &Grid, source_name: &str) -> ApplicationResult<OutlineNode> {
        build_outline(grid).ok_or_else(|| ApplicationError::EmptyGrid {
            source_name: source_name.to_string(),
        })
    }

    /// Build the menu document for a grid.
    pub fn build_document(
        &self,
        grid: &Grid,
        source_name: &str,
        options: &RenderOptions,
    ) -> ApplicationResult<Value> {
        let outline = self.build_outline(grid, source_name)?;
        let choice = serialize_outline(&outline);
        info!(
            "built menu from {}: {} nodes, height {}",
            source_name,
            outline.node_count(),
            outline.height()
        );
        self.wrap(choice, options)
    }

    /// Build the document and render it as JSON text.
    pub fn render_document(
        &self,
        grid: &Grid,
        source_name: &str,
        options: &RenderOptions,
    ) -> ApplicationResult<String> {
        let document = self.build_document(grid, source_name, options)?;
        let pretty = options.pretty.unwrap_or(self.settings.pretty);
        let text = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }

    fn wrap(&self, choice: Choice, options: &RenderOptions) -> ApplicationResult<Value> {
        let value = serde_json::to_value(choice)?;
        if options.raw {
            return Ok(value);
        }
        let key = options
            .envelope_key
            .clone()
            .unwrap_or_else(|| self.settings.envelope_key.clone());
        let mut envelope = Map::new();
        envelope.insert(key, value);
        Ok(Value::Object(envelope))
    }
}
