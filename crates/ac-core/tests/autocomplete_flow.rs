// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Keyboard and pointer flows through the editor, from typing the trigger to
//! an inserted entry.

mod common;

use ac_core::{AutocompleteState, Key, ListenerId};

#[test]
fn accepting_with_enter_inserts_entry_after_text() {
    let mut editor = common::editor();
    editor.type_text("say <>wo");
    assert_eq!(
        common::candidates(&editor),
        vec!["world", "work", "wonder", "word", "workflow", "workspace"]
    );

    let dispatch = editor.dispatch_key(Key::Enter);
    assert_eq!(dispatch.handled_by, Some(ListenerId::Autocomplete));
    assert!(!dispatch.default_applied);

    insta::assert_snapshot!(editor.document().outline(), @r#"
    root
      paragraph
        text "say "
        entry "world"
    caret: after entry "world"
    "#);
    assert_eq!(editor.state(), &AutocompleteState::Inactive);
    assert!(editor.dropdown().is_none());
}

#[test]
fn accepting_mid_text_moves_trailing_text_into_new_node() {
    let mut editor = common::editor();
    editor.type_text("<>wo and more");
    let text = editor.document().children(editor.document().first_paragraph().unwrap())[0];
    editor.document_mut().select_text(text, 4).unwrap();
    editor.rescan();

    editor.dispatch_key(Key::ArrowDown);
    editor.dispatch_key(Key::Tab);

    insta::assert_snapshot!(editor.document().outline(), @r#"
    root
      paragraph
        text ""
        entry "work"
        text " and more"
    caret: text " and more" @ 0
    "#);
}

#[test]
fn typing_after_accepted_entry_starts_new_text() {
    let mut editor = common::editor();
    editor.type_text("say <>wo");
    editor.dispatch_key(Key::Enter);
    editor.type_text(" again");

    insta::assert_snapshot!(editor.document().outline(), @r#"
    root
      paragraph
        text "say "
        entry "world"
        text " again"
    caret: text " again" @ 6
    "#);
    assert_eq!(editor.document().text(), "say world again");
}

#[test]
fn navigation_wraps_in_both_directions() {
    let mut editor = common::editor_with_corpus(&["alpha", "beta", "gamma"]);
    editor.type_text("<>");

    editor.dispatch_key(Key::ArrowDown);
    editor.dispatch_key(Key::ArrowDown);
    assert_eq!(editor.dropdown().unwrap().highlighted_index(), 2);

    editor.dispatch_key(Key::ArrowDown);
    assert_eq!(editor.dropdown().unwrap().highlighted_index(), 0);

    editor.dispatch_key(Key::ArrowUp);
    assert_eq!(editor.dropdown().unwrap().highlighted_index(), 2);
}

#[test]
fn each_keystroke_refilters_and_resets_highlight() {
    let mut editor = common::editor();
    editor.type_text("<>h");
    assert_eq!(
        common::candidates(&editor),
        vec!["hello", "help", "heart", "home", "house", "history"]
    );
    editor.dispatch_key(Key::ArrowDown);

    editor.type_text("o");
    assert_eq!(common::candidates(&editor), vec!["home", "house"]);
    assert_eq!(editor.dropdown().unwrap().highlighted_index(), 0);

    editor.dispatch_key(Key::Backspace);
    editor.dispatch_key(Key::Backspace);
    assert_eq!(common::candidates(&editor).len(), 8);
}

#[test]
fn escape_closes_but_next_keystroke_reopens() {
    let mut editor = common::editor();
    editor.type_text("<>w");

    let dispatch = editor.dispatch_key(Key::Escape);
    assert_eq!(dispatch.handled_by, Some(ListenerId::Autocomplete));
    assert_eq!(editor.state(), &AutocompleteState::Inactive);
    assert_eq!(editor.document().text(), "<>w");

    editor.type_text("o");
    assert_eq!(editor.state().active().unwrap().match_string(), "wo");
}

#[test]
fn enter_without_candidates_breaks_the_line_and_abandons_match() {
    let mut editor = common::editor();
    editor.type_text("<>zz");
    assert!(editor.state().is_active());
    assert!(editor.dropdown().is_none());

    let dispatch = editor.dispatch_key(Key::Enter);
    assert_eq!(dispatch.handled_by, None);
    assert!(dispatch.default_applied);
    assert_eq!(editor.state(), &AutocompleteState::Inactive);
    assert_eq!(editor.document().text(), "<>zz\n");
}

#[test]
fn arrows_move_the_caret_while_inactive() {
    let mut editor = common::editor();
    editor.type_text("ab");

    let dispatch = editor.dispatch_key(Key::ArrowLeft);
    assert_eq!(dispatch.handled_by, None);
    assert!(dispatch.default_applied);
    editor.type_text("X");
    assert_eq!(editor.document().text(), "aXb");
}

#[test]
fn moving_caret_before_trigger_closes_match() {
    let mut editor = common::editor();
    editor.type_text("<>w");
    assert!(editor.state().is_active());

    editor.dispatch_key(Key::ArrowLeft);
    assert!(editor.state().is_active());
    editor.dispatch_key(Key::ArrowLeft);
    editor.dispatch_key(Key::ArrowLeft);
    assert_eq!(editor.state(), &AutocompleteState::Inactive);
}

#[test]
fn click_accepts_the_clicked_row() {
    let mut editor = common::editor();
    editor.type_text("<>ho");

    assert!(editor.click_suggestion(1));

    insta::assert_snapshot!(editor.document().outline(), @r#"
    root
      paragraph
        text ""
        entry "house"
    caret: after entry "house"
    "#);
}

#[test]
fn hover_moves_highlight_and_ignores_missing_rows() {
    let mut editor = common::editor();
    editor.type_text("<>ho");

    assert!(editor.hover_suggestion(1));
    assert!(!editor.hover_suggestion(7));
    let rows: Vec<_> = editor
        .dropdown()
        .unwrap()
        .items()
        .map(|item| (item.text, item.highlighted))
        .collect();
    assert_eq!(rows, vec![("home", false), ("house", true)]);

    editor.dispatch_key(Key::Enter);
    assert_eq!(editor.document().text(), "house");
}

#[test]
fn out_of_range_click_is_a_noop_that_closes_the_match() {
    let mut editor = common::editor();
    editor.type_text("<>ho");
    let before = editor.document().outline();

    assert!(!editor.click_suggestion(4));
    assert_eq!(editor.document().outline(), before);
    assert_eq!(editor.state(), &AutocompleteState::Inactive);
}

#[test]
fn rightmost_trigger_anchors_the_match() {
    let mut editor = common::editor();
    editor.type_text("<>a<>te");
    assert_eq!(editor.state().active().unwrap().match_string(), "te");

    editor.dispatch_key(Key::Enter);
    insta::assert_snapshot!(editor.document().outline(), @r#"
    root
      paragraph
        text "<>a"
        entry "test"
    caret: after entry "test"
    "#);
}

#[test]
fn export_and_import_keep_entries() {
    let mut editor = common::editor();
    editor.type_text("say <>wo");
    editor.dispatch_key(Key::Enter);
    let json = editor.export_json().unwrap();

    let mut restored = common::editor();
    restored.import_json(&json).unwrap();

    insta::assert_snapshot!(restored.document().outline(), @r#"
    root
      paragraph
        text "say "
        entry "world"
    caret: after entry "world"
    "#);
}

#[test]
fn custom_trigger_from_configuration() {
    let config = ac_config::AutocompleteConfig::from_toml_str(
        r#"
        trigger = "@@"
        suggestions = ["alice", "bob"]
        "#,
    )
    .unwrap();
    let mut editor = ac_core::Editor::new(&config);

    editor.type_text("hi <>a");
    assert_eq!(editor.state(), &AutocompleteState::Inactive);

    editor.type_text(" @@b");
    assert_eq!(common::candidates(&editor), vec!["bob"]);
    editor.dispatch_key(Key::Tab);
    assert_eq!(editor.document().text(), "hi <>a bob");
}
