//! Input mapping from terminal keys through to engine intents

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall::core::{EngineConfig, GameLoop, ManualScheduler, ScriptedSource};
use blockfall::input::{
    command_for_key, control_for_key, Control, ControlInputs, HostCommand, InputMapper,
};
use blockfall::types::{Intent, PieceKind, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

#[test]
fn test_held_left_repeats_after_das() {
    let mut mapper = InputMapper::new();
    assert_eq!(mapper.press(Control::Left), Some(Intent::MoveLeft));

    assert!(mapper.update(DEFAULT_DAS_MS - 1).is_empty());
    // DAS reached, then two ARR periods.
    let repeats = mapper.update(1 + 2 * DEFAULT_ARR_MS);
    assert_eq!(repeats.as_slice(), &[Intent::MoveLeft, Intent::MoveLeft]);

    mapper.release(Control::Left);
    assert!(mapper.update(500).is_empty());
}

#[test]
fn test_rotate_and_drop_never_repeat() {
    let mut mapper = InputMapper::new();
    assert_eq!(mapper.press(Control::Rotate), Some(Intent::RotateCw));
    assert_eq!(mapper.press(Control::Drop), Some(Intent::HardDrop));
    assert!(mapper.update(1_000).is_empty());
}

#[test]
fn test_level_triggered_controls() {
    let mut mapper = InputMapper::new();
    let down = ControlInputs {
        down: true,
        ..ControlInputs::default()
    };

    let first = mapper.apply_controls(down, 16);
    assert_eq!(first.as_slice(), &[Intent::SoftDrop]);

    // Still held, no edge.
    assert!(mapper.apply_controls(down, 16).is_empty());

    // Rotate edge while down stays held.
    let both = ControlInputs {
        rotate: true,
        ..down
    };
    assert_eq!(mapper.apply_controls(both, 16).as_slice(), &[Intent::RotateCw]);

    assert!(mapper.apply_controls(ControlInputs::default(), 16).is_empty());
    assert!(!mapper.is_held(Control::Down));
}

#[test]
fn test_hold_timeout_releases_without_release_event() {
    let mut mapper = InputMapper::new().with_hold_timeout_ms(100);
    mapper.press(Control::Right);
    mapper.update(90);
    assert!(mapper.is_held(Control::Right));

    // A repeat press refreshes the hold.
    assert_eq!(mapper.press(Control::Right), None);
    mapper.update(90);
    assert!(mapper.is_held(Control::Right));

    mapper.update(20);
    assert!(!mapper.is_held(Control::Right));
}

#[test]
fn test_terminal_keys() {
    assert_eq!(control_for_key(KeyCode::Char('a')), Some(Control::Left));
    assert_eq!(control_for_key(KeyCode::Char('l')), Some(Control::Right));
    assert_eq!(control_for_key(KeyCode::Up), Some(Control::Rotate));
    assert_eq!(control_for_key(KeyCode::Char('x')), Some(Control::Rotate));
    assert_eq!(control_for_key(KeyCode::Char(' ')), Some(Control::Drop));
    assert_eq!(control_for_key(KeyCode::Char('p')), None);

    let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
    assert_eq!(command_for_key(key('q')), Some(HostCommand::Quit));
    assert_eq!(command_for_key(key('r')), Some(HostCommand::Restart));
    assert_eq!(command_for_key(key('p')), Some(HostCommand::Toggle));
    assert_eq!(
        command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(HostCommand::Quit)
    );
    assert_eq!(command_for_key(key('c')), None);
}

#[test]
fn test_keys_drive_the_game() {
    let mut game = GameLoop::new(
        EngineConfig::default(),
        ManualScheduler::new(),
        ScriptedSource::new([PieceKind::O]),
    );
    game.start();
    game.tick(0).unwrap();

    let mut mapper = InputMapper::new();
    for code in [KeyCode::Left, KeyCode::Char('h')] {
        let control = control_for_key(code).unwrap();
        mapper.release(control);
        if let Some(intent) = mapper.press(control) {
            game.enqueue(intent);
        }
        game.tick(0).unwrap();
    }
    assert_eq!(game.active().map(|p| p.x()), Some(2));

    let drop = mapper.press(control_for_key(KeyCode::Char(' ')).unwrap());
    assert_eq!(drop, Some(Intent::HardDrop));
    game.enqueue(Intent::HardDrop);
    let report = game.tick(0).unwrap();
    assert!(report.locked);
    assert!(game.board().unwrap().is_occupied(2, 19));
}
