//! Owning the terminal while serial output streams in.

use crate::parse;
use crate::state::State;
use crate::terminal::{self, Redraw};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io::{self, BufRead};
use std::process::exit;
use std::thread;
use tui::backend::CrosstermBackend;
use tui::Terminal;

/// Raw mode on the alternate screen, until dropped.
struct AltScreen;

impl AltScreen {
    fn enter() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let screen = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(screen)
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn is_quit(key: KeyEvent) -> bool {
    let ctrl_c = key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c');
    let q = key.modifiers == KeyModifiers::NONE && key.code == KeyCode::Char('q');
    ctrl_c || q
}

fn wait_for_quit() -> Result<(), io::Error> {
    loop {
        if let Event::Key(key) = event::read()? {
            if is_quit(key) {
                return Ok(());
            }
        }
    }
}

/// Chart report lines from `input` until it closes or the user quits.
pub fn run(mut input: impl BufRead) -> Result<(), io::Error> {
    let mut line = String::new();

    // Opening the serial port can still be echoing to the terminal; let it finish first.
    if input.read_line(&mut line)? == 0 {
        return Ok(());
    }

    let stdout = io::stdout();
    let mut terminal = Terminal::new(CrosstermBackend::new(&stdout))?;
    let _screen = AltScreen::enter()?;

    // raw mode swallows Ctrl-C, so watch for it ourselves
    thread::spawn(|| {
        let status = match wait_for_quit() {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Failed to read keyboard input: {}", e);
                1
            }
        };
        // exit skips the main thread's destructors
        restore();
        exit(status);
    });

    terminal.hide_cursor()?;
    let mut state = State::default();
    terminal::draw(&state, &mut terminal)?;

    pump(&mut state, line, &mut input, |state| {
        terminal::draw(state, &mut terminal)
    })
}

/// Handle `first`, then every following line of `input`, redrawing as needed.
fn pump(
    state: &mut State,
    first: String,
    input: &mut impl BufRead,
    mut draw: impl FnMut(&State) -> Result<(), io::Error>,
) -> Result<(), io::Error> {
    let mut line = first;
    loop {
        match parse::handle_line(state, &line) {
            Redraw::No => {}
            Redraw::Yes => draw(state)?,
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // input stream closed
            return Ok(());
        }
    }
}
