use serde::Deserialize;
use wasm_bindgen::prelude::*;
use warpdrive_draft::{
    create_default, parse, serialize, validate, DimensionConfig, DraftError, GridKind,
    GridSettings, VisualCell,
};
use warpdrive_editor::{Pipeline, PipelineResult};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Options a host page can pass when opening a draft
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesignerOptions {
    #[serde(default)]
    dimensions: DimensionConfig,

    #[serde(flatten)]
    grid: GridSettings,
}

/// Interactive draft editor for a browser page
///
/// Click methods take 0-based visual rows and columns as rendered;
/// `clickAt` takes pixel offsets inside a grid's canvas.
#[wasm_bindgen]
pub struct Designer {
    pipeline: Pipeline,
    settings: GridSettings,
}

impl Designer {
    fn open(json: &str, options: DesignerOptions) -> Result<Designer, String> {
        let draft = parse(json).map_err(describe)?;
        Ok(Designer {
            pipeline: Pipeline::with_config(draft, options.dimensions),
            settings: GridSettings::new(options.grid.cell_size),
        })
    }

    fn options(json: &str) -> Result<DesignerOptions, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid options: {}", e))
    }

    fn click_cell(&mut self, grid: GridKind, row: u32, col: u32) -> Result<Option<String>, String> {
        let result = self
            .pipeline
            .click(grid, VisualCell::new(row, col))
            .map_err(describe)?;
        result.as_ref().map(report).transpose()
    }

    fn click_pixel(&mut self, grid: &str, x: f64, y: f64) -> Result<Option<String>, String> {
        let grid: GridKind = grid.parse()?;
        match self.settings.locate(x, y) {
            Some(cell) => self.click_cell(grid, cell.row, cell.col),
            None => Ok(None),
        }
    }

    fn grid_cells(&self, grid: &str) -> Result<String, String> {
        let grid: GridKind = grid.parse()?;
        to_json(&self.pipeline.cells(grid))
    }

    fn draft_json(&self) -> Result<String, String> {
        serialize(self.pipeline.draft()).map_err(describe)
    }
}

#[wasm_bindgen]
impl Designer {
    /// Open a WIF JSON draft
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<Designer, JsValue> {
        Self::open(json, DesignerOptions::default()).map_err(JsValue::from)
    }

    /// Open a draft with `{ dimensions, cellSize }` options (JSON)
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(json: &str, options: &str) -> Result<Designer, JsValue> {
        Self::options(options)
            .and_then(|options| Self::open(json, options))
            .map_err(JsValue::from)
    }

    /// Start from an empty draft
    #[wasm_bindgen(js_name = createDefault)]
    pub fn create_default() -> Designer {
        Designer {
            pipeline: Pipeline::new(create_default()),
            settings: GridSettings::default(),
        }
    }

    /// Toggle a threading cell; returns the pipeline result as JSON, or
    /// undefined when the cell is outside the grid
    #[wasm_bindgen(js_name = clickThreading)]
    pub fn click_threading(&mut self, row: u32, col: u32) -> Result<Option<String>, JsValue> {
        self.click_cell(GridKind::Threading, row, col).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = clickTieup)]
    pub fn click_tieup(&mut self, row: u32, col: u32) -> Result<Option<String>, JsValue> {
        self.click_cell(GridKind::Tieup, row, col).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = clickTreadling)]
    pub fn click_treadling(&mut self, row: u32, col: u32) -> Result<Option<String>, JsValue> {
        self.click_cell(GridKind::Treadling, row, col).map_err(JsValue::from)
    }

    /// Pointer click at a pixel offset inside a grid canvas
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&mut self, grid: &str, x: f64, y: f64) -> Result<Option<String>, JsValue> {
        self.click_pixel(grid, x, y).map_err(JsValue::from)
    }

    /// Fill state of a grid as a JSON array of rows
    pub fn cells(&self, grid: &str) -> Result<String, JsValue> {
        self.grid_cells(grid).map_err(JsValue::from)
    }

    /// Drawdown as `{ picks, threads, up: [[pick, thread], ...] }`
    pub fn drawdown(&self) -> Result<String, JsValue> {
        to_json(self.pipeline.drawdown()).map_err(JsValue::from)
    }

    /// Resolved `{ shafts, treadles, warpThreads, weftThreads }`
    pub fn dimensions(&self) -> Result<String, JsValue> {
        to_json(self.pipeline.dimensions()).map_err(JsValue::from)
    }

    /// Canvas size of a grid as `[width, height]` in pixels
    #[wasm_bindgen(js_name = pixelSize)]
    pub fn pixel_size(&self, grid: &str) -> Result<Vec<u32>, JsValue> {
        let grid: GridKind = grid.parse().map_err(JsValue::from)?;
        let (width, height) = grid.pixel_size(self.pipeline.dimensions(), &self.settings);
        Ok(vec![width, height])
    }

    /// Current draft as pretty-printed WIF JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.draft_json().map_err(JsValue::from)
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.pipeline.version() as f64
    }
}

/// Check a WIF JSON text without opening it
#[wasm_bindgen(js_name = validateDraft)]
pub fn validate_draft(json: &str) -> bool {
    serde_json::from_str(json).map_or(false, |value| validate(&value))
}

fn describe(err: DraftError) -> String {
    err.to_string()
}

fn report(result: &PipelineResult) -> Result<String, String> {
    to_json(result)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}
