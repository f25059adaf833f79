//! End-to-end editing sessions driven through the public API.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use whiteboard_core::{
    CollaborationManager, EngineConfig, ImageSource, InteractionCoordinator, ItemKind, ItemProperty,
    Modifiers, Point, PointerDown, ResizeHandle, Size, Vec2, Whiteboard,
};

/// Run a mixed sequence of committing operations.
fn mixed_session(wb: &mut Whiteboard) {
    let kinds = ItemKind::ALL;
    let mut ids = Vec::new();
    for (i, kind) in kinds.iter().enumerate() {
        ids.push(wb.add_item(*kind, Point::new(i as f64 * 10.0, 0.0), None));
    }
    wb.delete_item(&ids[2]);
    wb.copy_item(&ids[0]);
    wb.paste_item(Point::new(400.0, 400.0));
    wb.import_json(r#"[{"type": "text", "content": "imported"}, {"type": "arrow"}]"#)
        .unwrap();
    wb.import_image(Ok(ImageSource::new("pic.gif", b"GIF89a\x01\x00".to_vec())));
    wb.update_item_property(&ids[1], ItemProperty::Rotation(45.0));
    wb.update_item_size(&ids[1], Size::new(300.0, 10.0));
    wb.save_to_history();
    wb.clear_all();
    wb.add_item(ItemKind::PostIt, Point::new(5.0, 5.0), None);
}

#[test]
fn undo_redo_round_trip_over_mixed_session() {
    let mut wb = Whiteboard::new();
    mixed_session(&mut wb);
    let latest = wb.snapshot();
    let steps = wb.state().history().index();
    assert!(steps > 10);

    for _ in 0..steps {
        assert!(wb.undo());
    }
    assert!(wb.state().is_empty());
    assert!(wb.state().selected_item_id().is_none());

    for _ in 0..steps {
        assert!(wb.redo());
    }
    assert_eq!(wb.snapshot(), latest);
}

#[test]
fn branch_truncation_after_several_undos() {
    let mut wb = Whiteboard::new();
    for i in 0..5 {
        wb.add_item(ItemKind::Rectangle, Point::new(i as f64, 0.0), None);
    }
    wb.undo();
    wb.undo();
    wb.undo();
    assert!(wb.can_redo());

    wb.add_item(ItemKind::Circle, Point::ZERO, None);
    assert!(!wb.can_redo());
    assert_eq!(wb.state().history().len(), 4);
    assert_eq!(wb.state().len(), 3);
}

#[test]
fn ids_stay_unique_across_paste_and_import() {
    let mut wb = Whiteboard::new();
    let first = wb.add_item(ItemKind::Triangle, Point::ZERO, None);
    wb.copy_item(&first);
    for i in 0..60 {
        wb.add_item(ItemKind::Line, Point::new(i as f64, 1.0), None);
        wb.paste_item(Point::new(i as f64, 2.0));
    }
    wb.import_json(&format!("[{}]", vec![r#"{"type": "circle"}"#; 20].join(",")))
        .unwrap();

    let ids: HashSet<_> = wb.state().items().iter().map(|item| item.id().clone()).collect();
    assert_eq!(wb.state().len(), 141);
    assert_eq!(ids.len(), 141);
}

#[test]
fn pointer_session_with_limited_history() {
    let config = EngineConfig::from_json(r#"{"maxHistory": 4, "doubleClickMs": 250}"#).unwrap();
    let mut wb = Whiteboard::with_config(config);
    let mut coord = InteractionCoordinator::new();
    let t0 = Instant::now();

    let id = wb.add_item(ItemKind::Rectangle, Point::new(100.0, 100.0), None);
    for round in 0..5 {
        let start = Point::new(120.0 + round as f64 * 10.0, 120.0);
        let down = coord.pointer_down(&mut wb, &id, start, t0 + Duration::from_secs(round));
        assert_eq!(down, PointerDown::DragStarted(id.clone()));
        coord.pointer_move(&mut wb, start + Vec2::new(10.0, 0.0));
        assert!(coord.pointer_up(&mut wb));
    }
    assert_eq!(wb.state().get_item(&id).unwrap().position, Point::new(150.0, 100.0));
    assert_eq!(wb.state().history().len(), 4);

    // Undo walks back through the retained snapshots only.
    let mut undos = 0;
    while wb.undo() {
        undos += 1;
    }
    assert_eq!(undos, 3);
    assert_eq!(wb.state().get_item(&id).unwrap().position, Point::new(120.0, 100.0));
}

#[test]
fn resize_then_edit_caption() {
    let mut wb = Whiteboard::new();
    let mut coord = InteractionCoordinator::new();
    let id = wb.add_item(ItemKind::Circle, Point::new(0.0, 0.0), None);

    assert!(coord.resize_start(&mut wb, &id, ResizeHandle::Right, Point::new(150.0, 50.0)));
    coord.pointer_move(&mut wb, Point::new(100.0, 90.0));
    coord.pointer_move(&mut wb, Point::new(-400.0, 90.0));
    coord.pointer_up(&mut wb);
    assert_eq!(wb.state().get_item(&id).unwrap().size, Size::new(20.0, 100.0));

    assert!(coord.click(&mut wb, &id));
    coord.edit_input("Sun");
    assert!(coord.key_down(&mut wb, "Enter", Modifiers::NONE));
    assert_eq!(wb.state().get_item(&id).unwrap().content.as_deref(), Some("Sun"));

    // Undo reverts the caption, then the resize.
    wb.undo();
    assert_eq!(wb.state().get_item(&id).unwrap().content, None);
    wb.undo();
    assert_eq!(wb.state().get_item(&id).unwrap().size, Size::new(150.0, 100.0));
}

#[test]
fn remote_delete_aborts_local_drag() {
    let mut wb = Whiteboard::new();
    let mut coord = InteractionCoordinator::new();
    let mut collab = CollaborationManager::new();
    let id = wb.add_item(ItemKind::PostIt, Point::new(10.0, 10.0), None);

    coord.pointer_down(&mut wb, &id, Point::new(20.0, 20.0), Instant::now());
    coord.pointer_move(&mut wb, Point::new(60.0, 60.0));

    let delete = format!(r#"{{"type": "item_delete", "itemId": "{}", "userName": "Eve"}}"#, id);
    assert!(collab.handle_message(&mut wb, &delete).is_some());

    let history_len = wb.state().history().len();
    assert!(!coord.pointer_move(&mut wb, Point::new(80.0, 80.0)));
    assert!(!coord.pointer_up(&mut wb));
    assert!(!wb.state().is_dragging());
    assert_eq!(wb.state().history().len(), history_len);
}

#[test]
fn every_insertion_path_keeps_positive_size() {
    let config = EngineConfig::from_json(r#"{"minItemSize": 30}"#).unwrap();
    let mut wb = Whiteboard::with_config(config);
    let mut collab = CollaborationManager::new();

    let local = wb.add_item(ItemKind::Rectangle, Point::ZERO, Some(Size::new(0.0, -5.0)));
    wb.import_json(r#"[{"type": "circle", "size": {"width": -1, "height": 0}}]"#)
        .unwrap();
    collab.handle_message(
        &mut wb,
        r#"{"type": "item_add", "item": {"type": "triangle", "position": {"x": 5, "y": 5}, "size": {"width": -40, "height": 0}}}"#,
    );
    assert!(wb.copy_item(&local));
    wb.paste_item(Point::new(300.0, 300.0));

    assert_eq!(wb.state().len(), 4);
    for item in wb.state().items() {
        assert!(item.size.width >= 30.0, "{} width {}", item.kind, item.size.width);
        assert!(item.size.height >= 30.0, "{} height {}", item.kind, item.size.height);
    }
}
