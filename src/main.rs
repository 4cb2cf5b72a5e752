use datepick::core::ElementId;
use datepick::terminal::{KeyCode, KeyEvent, Terminal, TerminalEvent};
use datepick::ui::render::render_picker;
use datepick::widgets::picker::{HostEvent, InputEvent, OverlayHandle, OverlayHost};
use datepick::widgets::traits::InteractionResult;
use datepick::{ChronoAdapter, DatetimeInput, PickerConfig, PickerSession};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

const INPUT_ID: &str = "when";

/// Terminal stand-in for an overlay host: one overlay at a time, drawn
/// under the input line.
#[derive(Default)]
struct TerminalHost {
    next_handle: u64,
    shown: Option<OverlayHandle>,
    focused: Option<ElementId>,
}

impl OverlayHost for TerminalHost {
    fn show_popup(&mut self, _anchor: &ElementId, _content: &ElementId) -> OverlayHandle {
        self.show()
    }

    fn show_dialog(&mut self, _content: &ElementId) -> OverlayHandle {
        self.show()
    }

    fn close(&mut self, handle: OverlayHandle) {
        if self.shown == Some(handle) {
            self.shown = None;
        }
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.focused.clone()
    }

    fn focus(&mut self, element: &ElementId) {
        log::trace!("focus -> {element}");
        self.focused = Some(element.clone());
    }
}

impl TerminalHost {
    fn show(&mut self) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        self.shown = Some(handle);
        handle
    }
}

type Session = PickerSession<ChronoAdapter, TerminalHost>;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> Result<PickerConfig, Box<dyn Error>> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(PickerConfig::default());
    };
    let source = std::fs::read_to_string(&path)?;
    let config = if path.ends_with(".json") {
        PickerConfig::from_json_str(&source)?
    } else {
        PickerConfig::from_yaml_str(&source)?
    };
    Ok(config)
}

fn build_session(config: &PickerConfig) -> Result<Session, Box<dyn Error>> {
    let adapter = Arc::new(config.chrono_adapter());
    let bounds = config.bounds(adapter.as_ref())?;
    let start_at = config.start_date(adapter.as_ref())?;

    let input = DatetimeInput::builder(INPUT_ID)
        .with_adapter(Arc::clone(&adapter))
        .with_formats(config.formats.clone())
        .with_time_attributes(config.time)
        .with_min(bounds.min)
        .with_max(bounds.max)
        .build()?;

    let mut session = PickerSession::builder(TerminalHost {
        focused: Some(ElementId::new(INPUT_ID)),
        ..TerminalHost::default()
    })
    .with_adapter(adapter)
    .with_formats(config.formats.clone())
    .with_labels(config.labels.clone())
    .with_touch_ui(config.touch_ui)
    .with_start_view(config.start_view)
    .with_start_at(start_at)
    .build()?;
    session.register_input(input)?;
    Ok(session)
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    let mut session = build_session(&config)?;

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut session);
    terminal.leave()?;
    result?;

    if let Some(input) = session.input() {
        println!("{}", input.text());
    }
    Ok(())
}

fn event_loop(terminal: &mut Terminal, session: &mut Session) -> Result<(), Box<dyn Error>> {
    let mut render_requested = true;

    loop {
        if render_requested {
            terminal.draw(&frame(session))?;
            session.after_render();
            render_requested = false;
        }

        if !terminal.poll(Duration::from_millis(100))? {
            continue;
        }
        match terminal.read_event()? {
            TerminalEvent::Key(key) => {
                if !handle_key(session, key)? {
                    return Ok(());
                }
                drain_input_events(session);
                render_requested = true;
            }
            TerminalEvent::Resize { .. } => render_requested = true,
        }
    }
}

/// Returns `false` when the demo should exit.
fn handle_key(session: &mut Session, key: KeyEvent) -> Result<bool, Box<dyn Error>> {
    if session.is_open() {
        match key.code {
            KeyCode::Tab => {
                session.interact(|calendar| {
                    calendar.current_period_clicked();
                    InteractionResult::moved_focus()
                });
            }
            KeyCode::Char('q') => {
                if let Some(handle) = session.host().shown {
                    session.on_host_event(HostEvent::BackdropClicked(handle));
                }
            }
            _ => {
                if let Some(date) = session.handle_key(key).confirmed() {
                    log::debug!("picker confirmed {date}");
                }
            }
        }
        return Ok(true);
    }

    if session.input_keydown(key)? {
        return Ok(true);
    }
    let Some(input) = session.input_mut() else {
        return Ok(false);
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
        KeyCode::Enter | KeyCode::Char('o') => session.toggle_clicked()?,
        KeyCode::Backspace => {
            let mut text = input.text().to_string();
            text.pop();
            input.on_input(text);
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() || matches!(ch, '-' | ':' | ' ') => {
            let text = format!("{}{ch}", input.text());
            input.on_input(text);
        }
        KeyCode::Tab => {
            input.on_change();
            input.on_blur();
        }
        _ => {}
    }
    Ok(true)
}

/// Logs and discards what the input queued since the last key.
fn drain_input_events(session: &mut Session) -> usize {
    let Some(input) = session.input_mut() else {
        return 0;
    };
    let events = input.drain_events();
    for event in &events {
        match event {
            InputEvent::DateChange(value) => log::debug!("date change: {value:?}"),
            InputEvent::ValueChanged(value) => log::trace!("value changed: {value:?}"),
            InputEvent::OpenRequested => log::trace!("open requested"),
        }
    }
    events.len()
}

fn frame(session: &Session) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(input) = session.input() {
        let status = match input.validate() {
            Ok(()) => String::new(),
            Err(error) => format!("  ! {}", error.kind()),
        };
        lines.push(format!("When: {}{status}", input.text()));
        let mut hints = "o open · alt+down open · q quit".to_string();
        if let Some(min) = input.min_attr() {
            hints.push_str(&format!(" · min {min}"));
        }
        if let Some(max) = input.max_attr() {
            hints.push_str(&format!(" · max {max}"));
        }
        lines.push(hints);
    }
    if let Some(calendar) = session.calendar() {
        lines.push(String::new());
        lines.extend(render_picker(calendar));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{build_session, drain_input_events};
    use datepick::PickerConfig;

    #[test]
    fn input_events_do_not_pile_up_between_keys() {
        let mut session = build_session(&PickerConfig::default()).expect("session");
        let input = session.input_mut().expect("input");
        input.on_change();
        input.on_change();

        assert_eq!(drain_input_events(&mut session), 2);
        assert_eq!(drain_input_events(&mut session), 0);
    }
}
