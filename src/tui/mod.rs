pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Resize) => {}
            Some(Event::Tick) => app.update_flash(),
            None => break Err(anyhow::anyhow!("terminal event stream closed")),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.next_field(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.previous_field(),

            KeyCode::Char('l') | KeyCode::Right => app.adjust_selected(true),
            KeyCode::Char('h') | KeyCode::Left => app.adjust_selected(false),

            KeyCode::Enter => app.start_edit(),
            KeyCode::Char('p') => app.submit(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Editing => match key.code {
            KeyCode::Enter => app.confirm_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => {
                app.edit_buffer.pop();
            }
            KeyCode::Char(c) => app.push_edit_char(c),
            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
