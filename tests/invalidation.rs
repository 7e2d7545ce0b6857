//! Integration tests for the engine's cache and invalidation behavior.
//!
//! Resolution must be a pure function of sheet + snapshot + ancestors;
//! the cache only short-circuits work. State changes invalidate the
//! affected node (and descendants only for ancestor-state rules), tree
//! changes invalidate the touched subtree, and a failed reload leaves
//! the previous sheet fully active.

use tuicss::types::Rgba;
use tuicss::{NodeId, NodeState, StateFlags, StyleEngine, TreeChange};

const SHEET: &str = r#"
    $primary: #0178d4;

    Button { background: #1e1e1e; }
    Button:hover { background: $primary; }

    RunContent:focus-within Label { color: #ffffff; }
"#;

fn engine() -> StyleEngine {
    let mut engine = StyleEngine::new();
    engine.load_sheet(SHEET).unwrap();
    engine
}

// ============================================================================
// CACHE PURITY
// ============================================================================

#[test]
fn test_repeated_resolution_is_deterministic() {
    let mut engine = engine();
    let node = NodeState::new(NodeId(1), "Button");

    let first = engine.resolve(&node, &[]);
    let second = engine.resolve(&node, &[]);
    assert_eq!(first, second);
}

#[test]
fn test_state_change_takes_effect_after_notification() {
    let mut engine = engine();

    let idle = NodeState::new(NodeId(1), "Button");
    assert_eq!(
        engine.resolve(&idle, &[]).background,
        Some(Rgba::rgb(0x1e, 0x1e, 0x1e))
    );

    engine.notify_state_changed(NodeId(1), StateFlags::HOVER);
    let hovered = NodeState::new(NodeId(1), "Button").with_states(StateFlags::HOVER);
    assert_eq!(
        engine.resolve(&hovered, &[]).background,
        Some(Rgba::rgb(0x01, 0x78, 0xd4))
    );
}

#[test]
fn test_state_toggle_restores_exact_previous_style() {
    let mut engine = engine();

    let idle = NodeState::new(NodeId(1), "Button");
    let before = engine.resolve(&idle, &[]);

    engine.notify_state_changed(NodeId(1), StateFlags::HOVER);
    let hovered = NodeState::new(NodeId(1), "Button").with_states(StateFlags::HOVER);
    engine.resolve(&hovered, &[]);

    engine.notify_state_changed(NodeId(1), StateFlags::HOVER);
    let after = engine.resolve(&idle, &[]);
    assert_eq!(before, after);
}

// ============================================================================
// BLAST RADIUS
// ============================================================================

#[test]
fn test_sibling_styles_unaffected_by_state_change() {
    let mut engine = engine();

    let a = NodeState::new(NodeId(1), "Button");
    let b = NodeState::new(NodeId(2), "Button");
    engine.resolve(&a, &[]);
    let b_before = engine.resolve(&b, &[]);

    engine.notify_state_changed(NodeId(1), StateFlags::HOVER);

    let b_after = engine.resolve(&b, &[]);
    assert_eq!(b_before, b_after);
}

#[test]
fn test_focus_within_change_reaches_descendants() {
    let mut engine = engine();

    let container = NodeState::new(NodeId(1), "RunContent");
    let label = NodeState::new(NodeId(2), "Label");
    assert_eq!(
        engine
            .resolve(&label, std::slice::from_ref(&container))
            .color,
        None
    );

    engine.notify_state_changed(NodeId(1), StateFlags::FOCUS_WITHIN);

    let focused =
        NodeState::new(NodeId(1), "RunContent").with_states(StateFlags::FOCUS_WITHIN);
    assert_eq!(
        engine
            .resolve(&label, std::slice::from_ref(&focused))
            .color,
        Some(Rgba::rgb(0xff, 0xff, 0xff))
    );
}

#[test]
fn test_tree_change_invalidates_subtree() {
    let mut engine = StyleEngine::new();
    engine
        .load_sheet("#sidebar Label { color: #ff0000; }")
        .unwrap();

    let label = NodeState::new(NodeId(2), "Label");
    let parent = NodeState::new(NodeId(1), "Container");
    assert_eq!(
        engine.resolve(&label, std::slice::from_ref(&parent)).color,
        None
    );

    // Reparent under #sidebar.
    engine.notify_tree_changed(NodeId(2), TreeChange::Removed);
    engine.notify_tree_changed(NodeId(2), TreeChange::Inserted);

    let sidebar = NodeState::new(NodeId(3), "Vertical").with_id("sidebar");
    assert_eq!(
        engine
            .resolve(&label, std::slice::from_ref(&sidebar))
            .color,
        Some(Rgba::rgb(0xff, 0, 0))
    );
}

// ============================================================================
// RELOAD
// ============================================================================

#[test]
fn test_failed_reload_keeps_previous_sheet() {
    let mut engine = engine();

    let node = NodeState::new(NodeId(1), "Button");
    let before = engine.resolve(&node, &[]);

    let err = engine.load_sheet("Button { color: $missing; }");
    assert!(err.is_err());

    let after = engine.resolve(&node, &[]);
    assert_eq!(before, after);
}

#[test]
fn test_successful_reload_replaces_all_styles() {
    let mut engine = engine();

    let node = NodeState::new(NodeId(1), "Button");
    engine.resolve(&node, &[]);

    engine
        .load_sheet("Button { background: #000000; }")
        .unwrap();
    assert_eq!(
        engine.resolve(&node, &[]).background,
        Some(Rgba::rgb(0, 0, 0))
    );
}

#[test]
fn test_reload_then_reload_back_is_deterministic() {
    let mut engine = engine();
    let node = NodeState::new(NodeId(1), "Button");
    let first = engine.resolve(&node, &[]);

    engine
        .load_sheet("Button { background: #000000; }")
        .unwrap();
    engine.resolve(&node, &[]);

    engine.load_sheet(SHEET).unwrap();
    assert_eq!(engine.resolve(&node, &[]), first);
}
