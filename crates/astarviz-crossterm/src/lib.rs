//! Crossterm terminal driver for astarviz.
//!
//! [`CrosstermDriver`] implements [`astarviz_core::Driver`]: it turns
//! crossterm key, mouse and resize events into [`Msg`]s and writes frame
//! diffs to stdout.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use astarviz_core::{
    app::{Context, Driver},
    grid::Frame,
    messages::{Key, ModMask, MouseAction, Msg},
    style::{AttrMask, Color},
    Point,
};

fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one crossterm event into a message, if it maps to one.
fn to_msg(ev: Event) -> Option<Msg> {
    let time = Instant::now();
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => {
            // Ctrl+C never reaches the terminal's signal handler in raw mode.
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
                time,
            })
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(_) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Point::new(me.column as i32, me.row as i32),
                modifiers: to_mod_mask(me.modifiers),
                time,
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Current terminal size in cells.
    pub fn size() -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let cell = &fc.cell;
            let attrs = cell.style.attrs;
            queue!(
                stdout,
                cursor::MoveTo(fc.pos.x as u16, fc.pos.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;
            if attrs.contains(AttrMask::BOLD) {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::REVERSE) {
                queue!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(stdout, Print(cell.ch))?;
            if !attrs.is_empty() {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        log::trace!("flushed {} cells", frame.cells.len());
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseEvent;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_messages() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(matches!(to_msg(ev), Some(Msg::KeyDown { key: Key::Space, .. })));

        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(to_msg(ev), Some(Msg::Quit)));

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(to_msg(release).is_none());
    }

    #[test]
    fn drags_become_moves() {
        match to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 3)) {
            Some(Msg::Mouse { action, pos, .. }) => {
                assert_eq!(action, MouseAction::Move);
                assert_eq!(pos, Point::new(7, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            to_msg(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0)),
            Some(Msg::Mouse { action: MouseAction::Main, .. })
        ));
        assert!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }

    #[test]
    fn default_color_resets() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
