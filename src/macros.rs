/// Build a key-press `KeyEvent`, usable both as an expression and as a match pattern.
///
/// `key!('q')`, `key!(Esc)`, `key!(CONTROL, 'c')`, `key!(SHIFT, BackTab)`
#[macro_export]
macro_rules! key {
    ($key:literal) => {
        $crate::key!(NONE, $key)
    };
    ($key:ident) => {
        $crate::key!(NONE, $key)
    };
    ($modifiers:ident, $key:literal) => {
        ::crossterm::event::KeyEvent {
            code: ::crossterm::event::KeyCode::Char($key),
            modifiers: ::crossterm::event::KeyModifiers::$modifiers,
            kind: ::crossterm::event::KeyEventKind::Press,
            state: ::crossterm::event::KeyEventState::NONE,
        }
    };
    ($modifiers:ident, $key:ident) => {
        ::crossterm::event::KeyEvent {
            code: ::crossterm::event::KeyCode::$key,
            modifiers: ::crossterm::event::KeyModifiers::$modifiers,
            kind: ::crossterm::event::KeyEventKind::Press,
            state: ::crossterm::event::KeyEventState::NONE,
        }
    };
}
