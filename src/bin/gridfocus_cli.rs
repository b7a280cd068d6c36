//! CLI tool for gridfocus - replays key presses against a grid fixture
//!
//! Usage:
//!   gridfocus_cli <grid.json> Down Down PageDown Ctrl+End
//!
//! The fixture describes the rendered grid:
//!
//! ```json
//! {
//!   "rows": ["####", "#..#", "####"],
//!   "rowHeight": 30,
//!   "viewportHeight": 60,
//!   "headerHeight": 30,
//!   "generateHeader": "sticky",
//!   "columns": [{"columnDataKey": "a"}, {"columnDataKey": "b"}],
//!   "focus": {"rowIndex": 0, "columnIndex": 0},
//!   "scrollTop": 0
//! }
//! ```
//!
//! One JSON line is written per key with the resulting focus, scroll offset
//! and the commands issued to the grid.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridfocus::error::Result;
use gridfocus::grid::DataGrid;
use gridfocus::host::{HostEvent, MemoryHost};
use gridfocus::{ColumnDefinition, FocusPosition, GenerateHeaderOptions, KeyInput};
use serde::{Deserialize, Serialize};

fn default_row_height() -> f64 {
    30.0
}

fn default_viewport_height() -> f64 {
    300.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridFixture {
    rows: Vec<String>,
    #[serde(default = "default_row_height")]
    row_height: f64,
    #[serde(default = "default_viewport_height")]
    viewport_height: f64,
    #[serde(default)]
    header_height: f64,
    #[serde(default)]
    generate_header: Option<String>,
    #[serde(default)]
    columns: Option<Vec<ColumnDefinition>>,
    #[serde(default)]
    focus: Option<FocusPosition>,
    #[serde(default)]
    scroll_top: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Step<'a> {
    key: &'a str,
    handled: bool,
    focus: FocusPosition,
    scroll_top: f64,
    events: Vec<HostEvent>,
}

fn load_fixture(path: &str) -> Result<GridFixture> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: gridfocus_cli <grid.json> [key ...]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let keys = &args[2..];

    let fixture = match load_fixture(input_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let mut host =
        match MemoryHost::from_patterns(&fixture.rows, fixture.row_height, fixture.viewport_height)
        {
            Ok(h) => h.with_header_height(fixture.header_height),
            Err(e) => {
                eprintln!("Error in fixture rows: {}", e);
                std::process::exit(1);
            }
        };

    let mut grid = DataGrid::new();
    if let Some(value) = fixture.generate_header.as_deref() {
        match GenerateHeaderOptions::from_attr(value) {
            Some(options) => grid.set_generate_header(&mut host, options),
            None => {
                eprintln!("Unknown generateHeader value: {}", value);
                std::process::exit(1);
            }
        }
    }
    if fixture.columns.is_some() {
        grid.set_column_definitions(&mut host, fixture.columns);
    }
    grid.connect(&mut host);
    if let Some(focus) = fixture.focus {
        grid.set_focus_row_index(&mut host, focus.row_index);
        grid.set_focus_column_index(&mut host, focus.column_index);
    }
    while host.take_update_request() {
        grid.process_updates(&mut host);
    }
    host.scroll_to(fixture.scroll_top);
    host.take_events();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for key in keys {
        let Some(input) = KeyInput::parse_chord(key) else {
            eprintln!("Unknown key: {}", key);
            std::process::exit(1);
        };
        let handled = grid.handle_keydown(&mut host, input);
        while host.take_update_request() {
            grid.process_updates(&mut host);
        }
        let step = Step {
            key,
            handled,
            focus: grid.focus_position(),
            scroll_top: host.scroll_top(),
            events: host.take_events(),
        };
        let line = serde_json::to_string(&step).unwrap();
        writeln!(out, "{}", line).unwrap();
    }
}
