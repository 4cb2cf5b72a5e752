use crate::core::ElementId;
use crate::core::adapter::DateAdapter;
use crate::core::error::{DATE_ADAPTER, DATE_FORMATS, PickerError, PickerResult};
use crate::core::formats::DateFormatConfig;
use crate::core::intl::IntlLabels;
use crate::core::view_state::{PeriodView, PickerStage, Presentation};
use crate::runtime::scheduler::FocusScheduler;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::calendar::controller::CalendarController;
use crate::widgets::picker::host::{HostEvent, OverlayHandle, OverlayHost};
use crate::widgets::picker::input::DatetimeInput;
use crate::widgets::traits::{InteractionResult, PickerAction};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-wide counter behind default session ids. Starts at zero when the
/// process starts and is never reset.
static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

const ACTIVE_CELL_FOCUS: &str = "active-cell";

fn next_session_id() -> ElementId {
    ElementId::new(format!("datetimepicker-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed)))
}

#[derive(Debug, Clone)]
struct OpenOverlay {
    handle: OverlayHandle,
    presentation: Presentation,
    focus_before_open: Option<ElementId>,
}

// ── Builder ─────────────────────────────────────────────────────────────

pub struct PickerSessionBuilder<A: DateAdapter, H: OverlayHost> {
    host: H,
    id: Option<ElementId>,
    adapter: Option<Arc<A>>,
    formats: Option<DateFormatConfig>,
    labels: IntlLabels,
    touch_ui: bool,
    start_view: PeriodView,
    start_at: Option<A::Date>,
}

impl<A: DateAdapter + 'static, H: OverlayHost> PickerSessionBuilder<A, H> {
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_adapter(mut self, adapter: Arc<A>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn with_formats(mut self, formats: DateFormatConfig) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn with_labels(mut self, labels: IntlLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_touch_ui(mut self, touch_ui: bool) -> Self {
        self.touch_ui = touch_ui;
        self
    }

    pub fn with_start_view(mut self, start_view: PeriodView) -> Self {
        self.start_view = start_view;
        self
    }

    pub fn with_start_at(mut self, start_at: Option<A::Date>) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn build(self) -> PickerResult<PickerSession<A, H>> {
        let adapter = self.adapter.ok_or(PickerError::MissingProvider(DATE_ADAPTER))?;
        let formats = self.formats.ok_or(PickerError::MissingProvider(DATE_FORMATS))?;
        Ok(PickerSession {
            id: self.id.unwrap_or_else(next_session_id),
            adapter,
            formats,
            labels: self.labels,
            touch_ui: self.touch_ui,
            start_view: self.start_view,
            start_at: self.start_at,
            host: self.host,
            input: None,
            overlay: None,
            calendar: None,
            focus: FocusScheduler::new(),
        })
    }
}

// ── Session ─────────────────────────────────────────────────────────────

/// Open/close lifecycle of one picker bound to exactly one input.
///
/// Min, max and filter are never stored here; each `open` reads them from
/// the bound input, so changes apply from the next open onwards.
pub struct PickerSession<A: DateAdapter, H: OverlayHost> {
    id: ElementId,
    adapter: Arc<A>,
    formats: DateFormatConfig,
    labels: IntlLabels,
    touch_ui: bool,
    start_view: PeriodView,
    start_at: Option<A::Date>,
    host: H,
    input: Option<DatetimeInput<A>>,
    overlay: Option<OpenOverlay>,
    calendar: Option<CalendarController<A>>,
    focus: FocusScheduler,
}

impl<A: DateAdapter + 'static, H: OverlayHost> PickerSession<A, H> {
    pub fn builder(host: H) -> PickerSessionBuilder<A, H> {
        PickerSessionBuilder {
            host,
            id: None,
            adapter: None,
            formats: None,
            labels: IntlLabels::default(),
            touch_ui: false,
            start_view: PeriodView::Month,
            start_at: None,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn input(&self) -> Option<&DatetimeInput<A>> {
        self.input.as_ref()
    }

    pub fn input_mut(&mut self) -> Option<&mut DatetimeInput<A>> {
        self.input.as_mut()
    }

    pub fn calendar(&self) -> Option<&CalendarController<A>> {
        self.calendar.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.overlay.as_ref().map(|overlay| overlay.presentation)
    }

    pub fn aria_expanded(&self) -> bool {
        self.is_open()
    }

    /// Id of the owned popup while open.
    pub fn aria_owns(&self) -> Option<&ElementId> {
        self.is_open().then_some(&self.id)
    }

    pub fn content_id(&self) -> ElementId {
        ElementId::new(format!("{}-content", self.id))
    }

    /// Element that should hold keyboard focus for the current view.
    pub fn active_cell_id(&self) -> Option<ElementId> {
        let calendar = self.calendar.as_ref()?;
        let adapter = calendar.adapter();
        let active = calendar.active_date();
        let suffix = match (calendar.stage(), calendar.period_view()) {
            (PickerStage::Time, _) => "time".to_string(),
            (PickerStage::Calendar, PeriodView::Month) => format!("day-{}", adapter.day(active)),
            (PickerStage::Calendar, PeriodView::Year) => format!("month-{}", adapter.month(active)),
        };
        Some(ElementId::new(format!("{}-{suffix}", self.id)))
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    pub fn register_input(&mut self, input: DatetimeInput<A>) -> PickerResult<()> {
        if self.input.is_some() {
            log::warn!("picker {} already has an input; rejecting {}", self.id, input.id());
            return Err(PickerError::InputAlreadyRegistered);
        }
        log::debug!("picker {} bound to input {}", self.id, input.id());
        self.input = Some(input);
        Ok(())
    }

    /// Opens the picker. Opening an open picker does nothing.
    pub fn open(&mut self) -> PickerResult<()> {
        if self.is_open() {
            return Ok(());
        }
        let Some(input) = self.input.as_ref() else {
            log::warn!("picker {} opened without an input", self.id);
            return Err(PickerError::NoInput);
        };

        let calendar = CalendarController::builder()
            .with_adapter(Arc::clone(&self.adapter))
            .with_formats(self.formats.clone())
            .with_labels(self.labels.clone())
            .with_min(input.min().cloned())
            .with_max(input.max().cloned())
            .with_filter(input.filter().cloned())
            .with_time_attributes(input.time_attributes())
            .with_start_view(self.start_view)
            .with_start_at(self.start_at.clone())
            .with_selected(input.value().cloned())
            .build()?;

        let presentation = if self.touch_ui || input.is_touch_device() {
            Presentation::Dialog
        } else {
            Presentation::Popup
        };
        let focus_before_open = self.host.focused_element();
        let content = self.content_id();
        let handle = match presentation {
            Presentation::Popup => self.host.show_popup(input.id(), &content),
            Presentation::Dialog => self.host.show_dialog(&content),
        };
        log::debug!("picker {} opened as {presentation:?}", self.id);

        self.overlay = Some(OpenOverlay {
            handle,
            presentation,
            focus_before_open,
        });
        self.calendar = Some(calendar);
        self.request_active_cell_focus();
        Ok(())
    }

    /// Closes the picker, detaching the overlay and restoring focus to
    /// whatever had it before `open`.
    pub fn close(&mut self) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        self.host.close(overlay.handle);
        self.focus.cancel(ACTIVE_CELL_FOCUS);
        self.calendar = None;
        if let Some(previous) = overlay.focus_before_open {
            self.host.focus(&previous);
        }
        log::debug!("picker {} closed", self.id);
    }

    /// Toggle button next to the input.
    pub fn toggle_clicked(&mut self) -> PickerResult<()> {
        if self.input.as_ref().is_some_and(|input| input.is_disabled()) {
            return Ok(());
        }
        self.open()
    }

    /// Key pressed while the input has focus. Alt+Down opens the picker.
    pub fn input_keydown(&mut self, key: KeyEvent) -> PickerResult<bool> {
        let Some(input) = self.input.as_mut() else {
            return Ok(false);
        };
        if !input.on_keydown(key) {
            return Ok(false);
        }
        self.open()?;
        Ok(true)
    }

    pub fn on_host_event(&mut self, event: HostEvent) {
        let handle = match event {
            HostEvent::Closed(handle) | HostEvent::BackdropClicked(handle) => handle,
        };
        if self
            .overlay
            .as_ref()
            .is_some_and(|overlay| overlay.handle == handle)
        {
            self.close();
        }
    }

    // ── Interaction ─────────────────────────────────────────────────────

    /// Key pressed inside the open picker. Escape closes without a selection.
    pub fn handle_key(&mut self, key: KeyEvent) -> InteractionResult<A::Date> {
        if !self.is_open() {
            return InteractionResult::ignored();
        }
        if key.code == KeyCode::Esc {
            self.close();
            return InteractionResult::handled();
        }
        self.interact(|calendar| calendar.handle_key(key))
    }

    pub fn cell_clicked(&mut self, value: u32) -> InteractionResult<A::Date> {
        self.interact(|calendar| calendar.cell_clicked(value))
    }

    /// Runs an operation on the open calendar and applies what it asks for:
    /// focus moves, confirmed selections and close requests.
    pub fn interact(
        &mut self,
        operation: impl FnOnce(&mut CalendarController<A>) -> InteractionResult<A::Date>,
    ) -> InteractionResult<A::Date> {
        let Some(calendar) = self.calendar.as_mut() else {
            return InteractionResult::ignored();
        };
        let result = operation(calendar);
        if result.focus_active_cell {
            self.request_active_cell_focus();
        }
        for action in &result.actions {
            match action {
                PickerAction::Confirmed(date) => self.select_and_close(date.clone()),
                PickerAction::CloseRequested => self.close(),
            }
        }
        result
    }

    /// Writes `date` into the bound input and closes.
    pub fn select_and_close(&mut self, date: A::Date) {
        if let Some(input) = self.input.as_mut() {
            input.select_from_picker(date);
        }
        self.close();
    }

    /// Runs deferred focus moves once the host has finished rendering.
    /// Returns the element focused, if any.
    pub fn after_render(&mut self) -> Option<ElementId> {
        let target = self.focus.render_complete().pop()?;
        if self.calendar.is_none() {
            return None;
        }
        self.host.focus(&target);
        Some(target)
    }

    fn request_active_cell_focus(&mut self) {
        if let Some(target) = self.active_cell_id() {
            self.focus.request(ACTIVE_CELL_FOCUS, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PickerSession;
    use crate::core::ElementId;
    use crate::core::adapter::DateAdapter;
    use crate::core::chrono_adapter::ChronoAdapter;
    use crate::core::error::PickerError;
    use crate::core::formats::DateFormatConfig;
    use crate::core::view_state::{PickerStage, Presentation};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::picker::host::{HostEvent, OverlayHandle, OverlayHost};
    use crate::widgets::picker::input::{DatetimeInput, InputEvent};
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingHost {
        next_handle: u64,
        calls: Vec<String>,
        focused: Option<ElementId>,
    }

    impl OverlayHost for RecordingHost {
        fn show_popup(&mut self, anchor: &ElementId, content: &ElementId) -> OverlayHandle {
            self.calls.push(format!("popup {content} at {anchor}"));
            self.next_handle += 1;
            OverlayHandle(self.next_handle)
        }

        fn show_dialog(&mut self, content: &ElementId) -> OverlayHandle {
            self.calls.push(format!("dialog {content}"));
            self.next_handle += 1;
            OverlayHandle(self.next_handle)
        }

        fn close(&mut self, handle: OverlayHandle) {
            self.calls.push(format!("close {}", handle.0));
        }

        fn focused_element(&self) -> Option<ElementId> {
            self.focused.clone()
        }

        fn focus(&mut self, element: &ElementId) {
            self.calls.push(format!("focus {element}"));
            self.focused = Some(element.clone());
        }
    }

    fn host_focused_on(id: &str) -> RecordingHost {
        RecordingHost {
            focused: Some(ElementId::new(id)),
            ..RecordingHost::default()
        }
    }

    fn session(host: RecordingHost) -> PickerSession<ChronoAdapter, RecordingHost> {
        PickerSession::builder(host)
            .with_id("picker")
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .build()
            .expect("session")
    }

    fn input(text: &str) -> DatetimeInput<ChronoAdapter> {
        DatetimeInput::builder("when")
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .with_text(text)
            .build()
            .expect("input")
    }

    #[test]
    fn second_input_is_rejected_before_anything_renders() {
        let mut session = session(RecordingHost::default());
        session.register_input(input("")).expect("first input");
        let err = session.register_input(input("")).expect_err("second input");

        assert!(matches!(err, PickerError::InputAlreadyRegistered));
        assert!(session.host().calls.is_empty());
    }

    #[test]
    fn opening_without_input_fails() {
        let mut session = session(RecordingHost::default());
        assert!(matches!(session.open(), Err(PickerError::NoInput)));
        assert!(!session.is_open());
    }

    #[test]
    fn missing_providers_fail_at_build() {
        let missing = PickerSession::<ChronoAdapter, _>::builder(RecordingHost::default())
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .build();
        assert!(matches!(missing, Err(PickerError::MissingProvider("DateFormatConfig"))));
    }

    #[test]
    fn open_is_idempotent_and_close_restores_focus() {
        let mut session = session(host_focused_on("when"));
        session.register_input(input("2017-03-14 10:30")).expect("input");

        session.open().expect("open");
        session.open().expect("open again");
        assert_eq!(session.presentation(), Some(Presentation::Popup));
        assert!(session.aria_expanded());
        assert_eq!(session.aria_owns(), Some(&ElementId::new("picker")));
        assert_eq!(session.host().calls, vec!["popup picker-content at when".to_string()]);

        session.host_mut().focused = Some(ElementId::new("picker-day-14"));
        session.close();
        assert!(!session.is_open());
        assert!(session.calendar().is_none());
        assert_eq!(session.host().focused, Some(ElementId::new("when")));
        assert!(session.aria_owns().is_none());

        session.close();
        assert_eq!(session.host().calls.len(), 3);
    }

    #[test]
    fn touch_ui_or_touch_input_opens_a_dialog() {
        let mut flagged = PickerSession::builder(RecordingHost::default())
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .with_touch_ui(true)
            .build()
            .expect("session");
        flagged.register_input(input("")).expect("input");
        flagged.open().expect("open");
        assert_eq!(flagged.presentation(), Some(Presentation::Dialog));

        let mut touch = session(RecordingHost::default());
        let touch_input = DatetimeInput::builder("when")
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .with_touch_device(true)
            .build()
            .expect("input");
        touch.register_input(touch_input).expect("input");
        touch.open().expect("open");
        assert_eq!(touch.presentation(), Some(Presentation::Dialog));
    }

    #[test]
    fn date_then_confirm_writes_the_input_and_closes() {
        let mut session = session(host_focused_on("when"));
        session.register_input(input("2017-03-14 10:30")).expect("input");
        session.open().expect("open");

        session.handle_key(KeyEvent::plain(KeyCode::Right));
        let picked = session.handle_key(KeyEvent::plain(KeyCode::Enter));
        assert!(picked.actions.is_empty());
        assert!(session.is_open());
        assert_eq!(session.calendar().map(|c| c.stage()), Some(PickerStage::Time));

        session.handle_key(KeyEvent::plain(KeyCode::Up));
        let confirmed = session.handle_key(KeyEvent::plain(KeyCode::Enter));
        assert!(confirmed.confirmed().is_some());
        assert!(!session.is_open());

        let input = session.input_mut().expect("input");
        assert_eq!(input.text(), "2017-03-15 11:30");
        let events = input.drain_events();
        assert!(matches!(events.last(), Some(InputEvent::DateChange(Some(_)))));
    }

    #[test]
    fn escape_and_backdrop_close_without_selection() {
        let mut session = session(RecordingHost::default());
        session.register_input(input("2017-03-14 10:30")).expect("input");

        session.open().expect("open");
        assert!(session.handle_key(KeyEvent::plain(KeyCode::Esc)).handled);
        assert!(!session.is_open());

        session.open().expect("open");
        session.on_host_event(HostEvent::BackdropClicked(OverlayHandle(99)));
        assert!(session.is_open());
        session.on_host_event(HostEvent::BackdropClicked(OverlayHandle(2)));
        assert!(!session.is_open());

        let input = session.input_mut().expect("input");
        assert_eq!(input.text(), "2017-03-14 10:30");
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn deferred_focus_follows_the_active_cell_and_skips_after_close() {
        let mut session = session(RecordingHost::default());
        session.register_input(input("2017-03-14 10:30")).expect("input");
        session.open().expect("open");

        session.handle_key(KeyEvent::plain(KeyCode::Down));
        session.handle_key(KeyEvent::plain(KeyCode::Right));
        assert_eq!(session.after_render(), Some(ElementId::new("picker-day-22")));
        assert_eq!(session.after_render(), None);

        session.handle_key(KeyEvent::plain(KeyCode::Left));
        session.close();
        assert_eq!(session.after_render(), None);
    }

    #[test]
    fn constraints_are_read_from_the_input_at_open() {
        let adapter = ChronoAdapter::new();
        let mut session = session(RecordingHost::default());
        session.register_input(input("2017-03-14 10:30")).expect("input");
        session.open().expect("open");

        let min = adapter.create_date(2017, 3, 1, 0, 0);
        session.input_mut().expect("input").set_min(Some(min));
        assert!(session.calendar().and_then(|c| c.min_date()).is_none());

        session.close();
        session.open().expect("open");
        let calendar = session.calendar().expect("calendar");
        assert_eq!(calendar.min_date(), Some(&min));
        assert_eq!(calendar.active_date(), &min);
    }

    #[test]
    fn alt_down_on_input_opens_and_ids_are_unique() {
        let mut session = session(RecordingHost::default());
        session.register_input(input("")).expect("input");
        assert!(!session.input_keydown(KeyEvent::plain(KeyCode::Down)).expect("key"));
        assert!(session.input_keydown(KeyEvent::alt(KeyCode::Down)).expect("key"));
        assert!(session.is_open());

        let first = PickerSession::<ChronoAdapter, _>::builder(RecordingHost::default())
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .build()
            .expect("session");
        let second = PickerSession::<ChronoAdapter, _>::builder(RecordingHost::default())
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .build()
            .expect("session");
        assert_ne!(first.id(), second.id());
        assert!(first.id().as_str().starts_with("datetimepicker-"));
    }

    #[test]
    fn disabled_input_ignores_the_toggle() {
        let mut session = session(RecordingHost::default());
        let mut disabled = input("");
        disabled.set_disabled(true);
        session.register_input(disabled).expect("input");

        session.toggle_clicked().expect("toggle");
        assert!(!session.is_open());
    }
}
