#![cfg(feature = "data")]

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;

use surgery_notes::domain::context::TemplateContext;
use surgery_notes::domain::structure::TemplateStructure;
use surgery_notes::render_template;

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn install_logger() {
    // Only the first call in this test binary installs the logger.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

fn warnings_containing(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .expect("logger lock")
        .iter()
        .filter(|(level, message)| *level == Level::Warn && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

fn structure(blocks: serde_json::Value) -> TemplateStructure {
    serde_json::from_value(json!({ "version": 1, "blocks": blocks })).expect("valid structure")
}

#[test]
fn unknown_block_logs_one_warning() {
    install_logger();
    let structure = structure(json!([
        { "id": "x", "type": "nonexistent-type", "props": {} },
        { "id": "s", "type": "spacer", "props": { "height": 12 } }
    ]));

    let html = render_template(&structure, &TemplateContext::default()).expect("renders");

    assert!(html.contains("block-spacer"));
    assert_eq!(warnings_containing("nonexistent-type").len(), 1);
}

#[test]
fn unreadable_props_are_reported_while_loading() {
    install_logger();
    let structure = structure(json!([
        { "id": "currency-field", "type": "data-field", "props": { "format": "currency" } }
    ]));

    let loaded = warnings_containing("`currency-field`");
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].contains("data-field"));
    assert!(loaded[0].contains("currency"));

    let html = render_template(&structure, &TemplateContext::default()).expect("renders");

    assert_eq!(html, r#"<div class="print-template"></div>"#);
}
