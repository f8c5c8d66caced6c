//! Browser-side checks, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use warpdrive_wasm::{validate_draft, Designer};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn default_designer_round_trips() {
    let designer = Designer::create_default();
    let json = designer.to_json().unwrap();
    assert!(validate_draft(&json));
    assert_eq!(designer.version(), 0.0);
}

#[wasm_bindgen_test]
fn malformed_draft_is_rejected() {
    assert!(Designer::new(r#"{ "sections": {} }"#).is_err());
    assert!(!validate_draft(r#"{ "sections": {} }"#));
}

#[wasm_bindgen_test]
fn click_updates_drawdown() {
    let mut designer = Designer::create_default();
    designer.click_threading(3, 19).unwrap();
    designer.click_tieup(3, 0).unwrap();
    let report = designer.click_treadling(0, 0).unwrap();
    assert!(report.is_some());
    assert!(designer.drawdown().unwrap().contains("[[1,1]]"));
}
