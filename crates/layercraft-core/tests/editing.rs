//! End-to-end editing scenarios driven through the public editor API.

use kurbo::{Point, Vec2};
use layercraft_core::handles::ResizeHandle;
use layercraft_core::tree::find_by_id;
use layercraft_core::{
    Command, DesignDocument, Direction, Editor, Frame, KeyInput, Layer, LayerId, LayerPatch, Modifiers,
};
use pretty_assertions::assert_eq;

fn document(layers: Vec<Layer>) -> DesignDocument {
    let mut document = DesignDocument::new(Frame::new(1080.0, 1080.0));
    document.layers = layers;
    document
}

fn id(s: &str) -> LayerId {
    LayerId::from(s)
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.pointer_down(Point::new(from.0, from.1), Modifiers::NONE);
    editor.pointer_move(Point::new(to.0, to.1), Modifiers::NONE);
    editor.pointer_up(Point::new(to.0, to.1));
}

#[test]
fn undo_all_then_redo_all() {
    let initial = document(vec![
        Layer::rect("a", 0.0, 0.0, 100.0, 100.0),
        Layer::rect("b", 400.0, 400.0, 100.0, 100.0),
    ]);
    let mut editor = Editor::new(initial.clone());

    drag(&mut editor, (50.0, 50.0), (150.0, 80.0));
    editor.update_layer(&id("b"), &LayerPatch {
        rotation: Some(45.0),
        ..LayerPatch::default()
    });
    editor.select_all();
    editor.group_selected();
    editor.execute(Command::Reorder(Direction::Back));
    let final_state = editor.committed_document().clone();
    let commits = editor.history().len() - 1;
    assert_eq!(commits, 3);

    for _ in 0..commits {
        assert!(editor.undo());
    }
    assert_eq!(editor.document(), &initial);
    assert!(!editor.can_undo());

    for _ in 0..commits {
        assert!(editor.redo());
    }
    assert_eq!(editor.document(), &final_state);
    assert!(!editor.can_redo());
}

#[test]
fn new_commit_after_undo_discards_redo() {
    let mut editor = Editor::new(document(vec![Layer::rect("a", 0.0, 0.0, 100.0, 100.0)]));
    editor.select_all();
    editor.move_selection_by(Vec2::new(10.0, 0.0));
    editor.select_all();
    editor.move_selection_by(Vec2::new(10.0, 0.0));
    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.select_all();
    editor.move_selection_by(Vec2::new(0.0, 5.0));
    assert!(!editor.can_redo());
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.document().layers[0].position(), Point::new(0.0, 5.0));
}

#[test]
fn group_then_ungroup_restores_layers() {
    let original = vec![
        Layer::rect("a", 12.5, 40.0, 100.0, 80.0),
        Layer::circle("c", 300.0, 220.0, 35.0),
        Layer::text("t", 90.0, 500.0, "Sale"),
    ];
    let mut editor = Editor::new(document(original.clone()));
    editor.select_all();
    editor.group_selected().expect("group");
    assert_eq!(editor.document().len(), 1);
    editor.ungroup_selected().expect("ungroup");

    let restored = &editor.document().layers;
    assert_eq!(restored.len(), original.len());
    for layer in &original {
        let back = find_by_id(restored, &layer.id).expect("layer survives");
        assert!((back.x - layer.x).abs() < 1e-9);
        assert!((back.y - layer.y).abs() < 1e-9);
        assert_eq!(back.kind, layer.kind);
    }
}

#[test]
fn resize_bottom_right_and_top_left() {
    let mut editor = Editor::new(document(vec![Layer::rect("r", 100.0, 100.0, 100.0, 60.0)]));

    editor.begin_resize(&id("r"), ResizeHandle::BottomRight, Point::new(200.0, 160.0));
    editor.pointer_move(Point::new(225.0, 170.0), Modifiers::NONE);
    editor.pointer_up(Point::new(225.0, 170.0));
    let layer = &editor.document().layers[0];
    assert_eq!((layer.width, layer.height), (Some(125.0), Some(70.0)));
    assert_eq!((layer.x, layer.y), (100.0, 100.0));

    editor.begin_resize(&id("r"), ResizeHandle::TopLeft, Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(110.0, 160.0), Modifiers::NONE);
    editor.pointer_up(Point::new(110.0, 160.0));
    let layer = &editor.document().layers[0];
    assert_eq!((layer.width, layer.height), (Some(115.0), Some(20.0)));
    assert_eq!((layer.x, layer.y), (110.0, 160.0));
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn drag_snaps_left_edge_to_right_edge() {
    let mut editor = Editor::new(document(vec![
        Layer::rect("anchor", 0.0, 0.0, 200.0, 100.0),
        Layer::rect("moving", 500.0, 400.0, 80.0, 80.0),
    ]));
    // Grab at (510, 410); releasing at (214, 410) puts the left edge at 204.
    drag(&mut editor, (510.0, 410.0), (214.0, 410.0));
    let moving = editor.document().find(&id("moving")).expect("moving");
    assert_eq!(moving.x, 200.0);
    assert_eq!(moving.y, 400.0);
}

#[test]
fn locked_layers_ignore_gestures() {
    let initial = document(vec![Layer::rect("l", 0.0, 0.0, 100.0, 100.0).locked()]);
    let mut editor = Editor::new(initial.clone());

    drag(&mut editor, (50.0, 50.0), (90.0, 90.0));
    editor.begin_drag(Point::new(50.0, 50.0));
    editor.pointer_up(Point::new(80.0, 80.0));
    editor.begin_resize(&id("l"), ResizeHandle::BottomRight, Point::new(100.0, 100.0));
    editor.pointer_up(Point::new(150.0, 150.0));
    editor.begin_rotate(&id("l"), Point::new(50.0, -10.0));
    editor.pointer_up(Point::new(150.0, 50.0));

    assert_eq!(editor.document(), &initial);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn marquee_selects_intersecting_layers() {
    let layers = vec![
        Layer::rect("A", 0.0, 0.0, 50.0, 50.0),
        Layer::rect("B", 100.0, 100.0, 50.0, 50.0),
    ];
    let mut editor = Editor::new(document(layers));
    editor.set_container_origin(Point::new(-10.0, -10.0));

    // Client (190, 190) is canvas (200, 200): the marquee spans (0,0)-(200,200).
    drag(&mut editor, (190.0, 190.0), (-10.0, -10.0));
    assert_eq!(editor.selected_ids(), &[id("A"), id("B")]);

    editor.set_container_origin(Point::ZERO);
    editor.pointer_down(Point::new(60.0, 60.0), Modifiers::NONE);
    editor.pointer_move(Point::new(0.0, 0.0), Modifiers::NONE);
    editor.pointer_up(Point::new(0.0, 0.0));
    assert_eq!(editor.selected_ids(), &[id("A")]);
}

#[test]
fn reorder_and_paste_scenario() {
    let mut editor = Editor::new(document(vec![Layer::rect("r1", 10.0, 10.0, 100.0, 50.0)]));
    let before = editor.document().clone();

    assert!(editor.reorder(&id("r1"), Direction::Front));
    assert_eq!(editor.document(), &before);
    assert_eq!(editor.history().len(), 1);

    editor.select([id("r1")]);
    assert!(editor.copy());
    let pasted = editor.paste(Point::new(200.0, 200.0)).expect("pasted");
    assert_ne!(pasted, id("r1"));

    let layer = editor.document().find(&pasted).expect("pasted layer");
    assert_eq!((layer.x, layer.y), (150.0, 175.0));
    assert_eq!(editor.document().len(), 2);
    assert_eq!(editor.selected_ids(), &[pasted]);
}

#[test]
fn keyboard_surface_round_trip() {
    let mut editor = Editor::new(document(vec![
        Layer::rect("a", 0.0, 0.0, 10.0, 10.0),
        Layer::rect("b", 20.0, 0.0, 10.0, 10.0),
    ]));
    let ctrl = Modifiers::CTRL;

    editor.handle_key(&KeyInput::new("a", ctrl));
    editor.handle_key(&KeyInput::new("g", ctrl));
    assert_eq!(editor.document().len(), 1);

    editor.handle_key(&KeyInput::new("G", ctrl.with_shift()));
    assert_eq!(editor.document().len(), 2);

    editor.handle_key(&KeyInput::new("z", ctrl));
    assert_eq!(editor.document().len(), 1);
    editor.handle_key(&KeyInput::new("Z", ctrl.with_shift()));
    assert_eq!(editor.document().len(), 2);

    editor.select([id("a")]);
    editor.handle_key(&KeyInput::new("}", ctrl.with_shift()));
    assert_eq!(editor.document().layers[1].id, id("a"));

    editor.select([id("a")]);
    editor.handle_key(&KeyInput::new("Backspace", Modifiers::NONE).in_text_input());
    assert_eq!(editor.document().len(), 2);
}
