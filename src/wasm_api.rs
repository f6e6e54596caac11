//! WASM API: `#[wasm_bindgen]` exports for the editor frontend.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_workspace` / `destroy_workspace`: lifecycle
//! - `add_block` / `remove_block` / `get_blocks`: canvas contents
//! - `begin_drag` / `drag_to` / `end_drag`: snapping a family into a chain
//! - `collect_family` / `is_nearby` / `validate`: chain queries
//! - `add_tab` / `set_current_tab` / `add_page` / `backward` / `forward` / `get_tabs`: navigation
//!
//! Everything goes in and out as JSON strings; failures come back as
//! `{"error": "..."}`.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::categories::BlockKind;
use crate::chain::ProximityThresholds;
use crate::config::EditorConfig;
use crate::core::{Block, BlockId, Position, TabId};
use crate::navigation::{HistoryKind, Tabs};
use crate::workspace::{DragSession, Workspace};

// ── Global state ────────────────────────────────────────────────────────────

struct WasmEditor {
    workspace: Workspace,
    tabs: Tabs,
    drag: Option<DragSession>,
}

thread_local! {
    static EDITOR: RefCell<Option<WasmEditor>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&mut WasmEditor) -> Result<R, String>) -> Result<R, String> {
    EDITOR.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(editor) => f(editor),
            None => Err("Workspace not initialized. Call init_workspace() first.".into()),
        }
    })
}

// ── JSON interchange types ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct AddBlockJson {
    kind: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default, rename = "tabUuid")]
    tab_uuid: Option<String>,
    #[serde(default, rename = "isSample")]
    is_sample: bool,
}

#[derive(Deserialize)]
struct PageJson {
    #[serde(default)]
    kind: HistoryKind,
    title: String,
    location: String,
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct ValidationResponse {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct DragResponse {
    block: String,
    members: Vec<String>,
    #[serde(rename = "snapTarget")]
    snap_target: Option<String>,
}

#[derive(Serialize)]
struct DropResponse {
    attached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<String>,
    moved: Vec<String>,
}

#[derive(Serialize)]
struct TabsResponse<'a> {
    current: Option<String>,
    tabs: Vec<&'a crate::navigation::Tab>,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse {
        error: msg.into(),
    })
    .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(format!("Serialization failed: {}", e)))
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    match result {
        Ok(value) => to_json(&value),
        Err(e) => json_err(e),
    }
}

fn parse_block_id(id: &str) -> Result<BlockId, String> {
    BlockId::parse(id).map_err(|e| format!("Invalid block id '{}': {}", id, e))
}

fn parse_tab_id(id: &str) -> Result<TabId, String> {
    TabId::parse(id).map_err(|e| format!("Invalid tab id '{}': {}", id, e))
}

fn id_strings(ids: &[BlockId]) -> Vec<String> {
    ids.iter().map(BlockId::to_string).collect()
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Start a fresh workspace with one default tab. An empty string uses the
/// default config.
#[wasm_bindgen]
pub fn init_workspace(config_json: &str) -> String {
    console_error_panic_hook::set_once();

    let config = if config_json.trim().is_empty() {
        EditorConfig::default()
    } else {
        match EditorConfig::from_json_str(config_json) {
            Ok(c) => c,
            Err(e) => return json_err(format!("Invalid config JSON: {}", e)),
        }
    };

    let mut workspace = Workspace::new(config);
    let mut tabs = Tabs::new();
    let defaults = workspace.config().default_tab.clone();
    let tab = tabs.init(workspace.ids_mut(), &defaults);

    EDITOR.with(|cell| {
        *cell.borrow_mut() = Some(WasmEditor {
            workspace,
            tabs,
            drag: None,
        });
    });
    json_ok(&tab.to_string())
}

#[wasm_bindgen]
pub fn destroy_workspace() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn add_block(block_json: &str) -> String {
    let bj: AddBlockJson = match serde_json::from_str(block_json) {
        Ok(b) => b,
        Err(e) => return json_err(format!("Invalid block JSON: {}", e)),
    };

    let result = with_editor(|ed| {
        let kind = bj.kind.parse::<BlockKind>().map_err(|e| e.to_string())?;
        let position = Position::new(bj.x, bj.y);
        let id = if bj.is_sample {
            if let Some(raw) = bj.tab_uuid.as_deref() {
                return Err(format!("Sample blocks cannot be placed in tab '{}'", raw));
            }
            ed.workspace.add_sample(kind, position)
        } else {
            let tab = match bj.tab_uuid.as_deref() {
                Some(raw) => Some(parse_tab_id(raw)?),
                None => ed.tabs.current_uuid(),
            };
            ed.workspace.add_block(kind, position, tab)
        };
        id.map_err(|e| e.to_string())
    });
    match result {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(id: &str) -> String {
    let result = with_editor(|ed| {
        let id = parse_block_id(id)?;
        ed.workspace.remove_block(id).map_err(|e| e.to_string())?;
        Ok(id)
    });
    match result {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

/// All blocks, sorted by uuid so the output is stable.
#[wasm_bindgen]
pub fn get_blocks() -> String {
    respond(with_editor(|ed| {
        let mut blocks: Vec<Block> = ed.workspace.blocks().values().cloned().collect();
        blocks.sort_by_key(Block::uuid);
        Ok(blocks)
    }))
}

#[wasm_bindgen]
pub fn begin_drag(id: &str) -> String {
    respond(with_editor(|ed| {
        if ed.drag.is_some() {
            return Err("A drag is already in progress".into());
        }
        let id = parse_block_id(id)?;
        let session = ed.workspace.begin_drag(id).map_err(|e| e.to_string())?;
        let response = DragResponse {
            block: session.block().to_string(),
            members: id_strings(session.members()),
            snap_target: None,
        };
        ed.drag = Some(session);
        Ok(response)
    }))
}

#[wasm_bindgen]
pub fn drag_to(x: f64, y: f64) -> String {
    respond(with_editor(|ed| {
        let session = ed.drag.as_mut().ok_or("No drag in progress")?;
        let target = ed
            .workspace
            .drag_to(session, Position::new(x, y))
            .map_err(|e| e.to_string())?;
        Ok(DragResponse {
            block: session.block().to_string(),
            members: id_strings(session.members()),
            snap_target: target.map(|t| t.to_string()),
        })
    }))
}

#[wasm_bindgen]
pub fn end_drag() -> String {
    respond(with_editor(|ed| {
        let session = ed.drag.take().ok_or("No drag in progress")?;
        let attachment = ed.workspace.end_drag(session).map_err(|e| e.to_string())?;
        Ok(match attachment {
            Some(a) => DropResponse {
                attached: true,
                head: Some(a.head.to_string()),
                moved: id_strings(&a.moved),
            },
            None => DropResponse {
                attached: false,
                head: None,
                moved: Vec::new(),
            },
        })
    }))
}

/// Uuids of `id` and everything below it, in chain order.
#[wasm_bindgen]
pub fn collect_family(id: &str) -> String {
    respond(with_editor(|ed| {
        let id = parse_block_id(id)?;
        let family = ed.workspace.family(id).map_err(|e| e.to_string())?;
        Ok(id_strings(&family))
    }))
}

/// Snap test with the workspace's thresholds, or the defaults before init.
#[wasm_bindgen]
pub fn is_nearby(parent_x: f64, parent_y: f64, child_x: f64, child_y: f64) -> bool {
    let thresholds = EDITOR.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|ed| ed.workspace.config().proximity)
            .unwrap_or_default()
    });
    thresholds.is_nearby(Position::new(parent_x, parent_y), Position::new(child_x, child_y))
}

#[wasm_bindgen]
pub fn validate() -> String {
    match with_editor(|ed| Ok(ed.workspace.validate())) {
        Ok(v) => to_json(&ValidationResponse {
            valid: v.valid,
            errors: v.errors.iter().map(|e| e.message.clone()).collect(),
            warnings: v.warnings.iter().map(|w| w.message.clone()).collect(),
        }),
        Err(e) => to_json(&ValidationResponse {
            valid: false,
            errors: vec![e],
            warnings: vec![],
        }),
    }
}

#[wasm_bindgen]
pub fn add_tab(page_json: &str) -> String {
    let page: PageJson = match serde_json::from_str(page_json) {
        Ok(p) => p,
        Err(e) => return json_err(format!("Invalid page JSON: {}", e)),
    };
    match with_editor(|ed| {
        Ok(ed
            .tabs
            .add(ed.workspace.ids_mut(), page.kind, page.title, page.location))
    }) {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn set_current_tab(id: &str) -> String {
    match with_editor(|ed| {
        let id = parse_tab_id(id)?;
        ed.tabs.set_current(id).map_err(|e| e.to_string())?;
        Ok(id)
    }) {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn add_page(page_json: &str) -> String {
    let page: PageJson = match serde_json::from_str(page_json) {
        Ok(p) => p,
        Err(e) => return json_err(format!("Invalid page JSON: {}", e)),
    };
    get_tabs_after(|tabs| tabs.add_page(page.kind, page.title, page.location))
}

#[wasm_bindgen]
pub fn backward() -> String {
    get_tabs_after(Tabs::backward)
}

#[wasm_bindgen]
pub fn forward() -> String {
    get_tabs_after(Tabs::forward)
}

#[wasm_bindgen]
pub fn get_tabs() -> String {
    get_tabs_after(|_| Ok(()))
}

/// Apply a navigation action, then report every tab.
fn get_tabs_after(
    action: impl FnOnce(&mut Tabs) -> Result<(), crate::navigation::NavigationError>,
) -> String {
    match with_editor(|ed| {
        action(&mut ed.tabs).map_err(|e| e.to_string())?;
        Ok(to_json(&TabsResponse {
            current: ed.tabs.current_uuid().map(|t| t.to_string()),
            tabs: ed.tabs.iter().collect(),
        }))
    }) {
        Ok(json) => json,
        Err(e) => json_err(e),
    }
}

/// Proximity window in effect, for drawing snap guides.
#[wasm_bindgen]
pub fn get_proximity() -> String {
    let thresholds: ProximityThresholds = EDITOR.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|ed| ed.workspace.config().proximity)
            .unwrap_or_default()
    });
    to_json(&thresholds)
}

/// Wire names of every kind the workspace can create.
#[wasm_bindgen]
pub fn get_block_kinds() -> String {
    let kinds: Vec<&'static str> = BlockKind::ALL.iter().map(BlockKind::name).collect();
    to_json(&kinds)
}
