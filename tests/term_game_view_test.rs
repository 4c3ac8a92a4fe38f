use tui_match3::core::GridConfig;
use tui_match3::engine::Engine;
use tui_match3::term::{GameView, Overlay, Viewport};
use tui_match3::types::Pos;

fn frame_text(fb: &tui_match3::term::FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn term_view_renders_border_corners() {
    let engine = Engine::new(GridConfig::default(), 1).unwrap();
    let view = GameView::default();

    // 9 columns * 3 chars + border = 29 wide; 10 rows + border = 12 high.
    let fb = view.render(&engine.snapshot(), &Overlay::default(), Viewport::new(29, 12));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(28, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 11).unwrap().ch, '└');
    assert_eq!(fb.get(28, 11).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_bottom_row_last() {
    let engine = Engine::new(GridConfig::default(), 1).unwrap();
    let snap = engine.snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, &Overlay::default(), Viewport::new(29, 12));

    for col in 0..9u8 {
        let kind = snap.grid.kind_at(Pos::new(col, 0)).unwrap();
        let x = 1 + col as u16 * 3 + 1;
        assert_eq!(fb.get(x, 10).unwrap().ch, kind.letter());
    }
}

#[test]
fn term_view_side_panel_and_message() {
    let mut engine = Engine::new(GridConfig::default(), 1).unwrap();
    let (a, b) = engine.hint().unwrap();
    engine.request_swap(a, b).unwrap();
    let snap = engine.snapshot();

    let overlay = Overlay {
        cursor: Some(a),
        hint: Some((a, b)),
        message: Some("hello"),
    };
    let fb = GameView::default().render(&snap, &overlay, Viewport::new(60, 16));
    let text = frame_text(&fb);

    assert!(text.contains("SCORE"));
    assert!(text.contains(&snap.score.to_string()));
    assert!(text.contains("MOVES"));
    assert!(text.contains("HINT"));
    assert!(text.contains("hello"));
}
