use crate::core::ElementId;
use crate::core::adapter::DateAdapter;
use crate::core::error::{DATE_ADAPTER, DATE_FORMATS, PickerError, PickerResult};
use crate::core::formats::DateFormatConfig;
use crate::core::time_attrs::TimeAttributes;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::validators::{DateFilter, DateValidationError, date_validators, run_validators};
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent<D> {
    /// The parsed value changed, either while typing or through a write.
    ValueChanged(Option<D>),
    /// A committed change: a picker selection or the host's change event.
    DateChange(Option<D>),
    /// Alt+Down asked for the picker.
    OpenRequested,
}

pub struct DatetimeInputBuilder<A: DateAdapter> {
    id: ElementId,
    adapter: Option<Arc<A>>,
    formats: Option<DateFormatConfig>,
    time: Option<TimeAttributes>,
    attributes: Option<IndexMap<String, String>>,
    min: Option<A::Date>,
    max: Option<A::Date>,
    filter: Option<DateFilter<A::Date>>,
    touch_device: bool,
    text: String,
}

impl<A: DateAdapter + 'static> DatetimeInputBuilder<A> {
    pub fn with_adapter(mut self, adapter: Arc<A>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn with_formats(mut self, formats: DateFormatConfig) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn with_time_attributes(mut self, time: TimeAttributes) -> Self {
        self.time = Some(time);
        self
    }

    /// Element-style attributes (`hide-time`, `hour`, `minute`). Explicit
    /// [`Self::with_time_attributes`] wins over these.
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_min(mut self, min: Option<A::Date>) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: Option<A::Date>) -> Self {
        self.max = max;
        self
    }

    pub fn with_filter(mut self, filter: Option<DateFilter<A::Date>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_touch_device(mut self, touch_device: bool) -> Self {
        self.touch_device = touch_device;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build(self) -> PickerResult<DatetimeInput<A>> {
        let adapter = self.adapter.ok_or(PickerError::MissingProvider(DATE_ADAPTER))?;
        let formats = self.formats.ok_or(PickerError::MissingProvider(DATE_FORMATS))?;
        let time = match (self.time, &self.attributes) {
            (Some(time), _) => time,
            (None, Some(attributes)) => {
                let now = adapter.today();
                TimeAttributes::from_attributes(attributes, adapter.hours(&now), adapter.minutes(&now))
            }
            (None, None) => TimeAttributes::default(),
        };

        let mut input = DatetimeInput {
            id: self.id,
            adapter,
            formats,
            time,
            text: String::new(),
            value: None,
            min: self.min,
            max: self.max,
            filter: self.filter,
            disabled: false,
            touched: false,
            touch_device: self.touch_device,
            events: Vec::new(),
        };
        input.text = self.text;
        input.value = input.parse_text();
        Ok(input)
    }
}

/// Text field a picker writes into.
///
/// The text is the source of truth; `value` is its parse under the
/// date-only or date-time format depending on `hide_time`.
pub struct DatetimeInput<A: DateAdapter> {
    id: ElementId,
    adapter: Arc<A>,
    formats: DateFormatConfig,
    time: TimeAttributes,
    text: String,
    value: Option<A::Date>,
    min: Option<A::Date>,
    max: Option<A::Date>,
    filter: Option<DateFilter<A::Date>>,
    disabled: bool,
    touched: bool,
    touch_device: bool,
    events: Vec<InputEvent<A::Date>>,
}

impl<A: DateAdapter + 'static> DatetimeInput<A> {
    pub fn builder(id: impl Into<ElementId>) -> DatetimeInputBuilder<A> {
        DatetimeInputBuilder {
            id: id.into(),
            adapter: None,
            formats: None,
            time: None,
            attributes: None,
            min: None,
            max: None,
            filter: None,
            touch_device: false,
            text: String::new(),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    pub fn formats(&self) -> &DateFormatConfig {
        &self.formats
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<&A::Date> {
        self.value.as_ref()
    }

    pub fn time_attributes(&self) -> TimeAttributes {
        self.time
    }

    pub fn min(&self) -> Option<&A::Date> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&A::Date> {
        self.max.as_ref()
    }

    pub fn filter(&self) -> Option<&DateFilter<A::Date>> {
        self.filter.as_ref()
    }

    pub fn set_min(&mut self, min: Option<A::Date>) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: Option<A::Date>) {
        self.max = max;
    }

    pub fn set_filter(&mut self, filter: Option<DateFilter<A::Date>>) {
        self.filter = filter;
    }

    /// `min` as an ISO date, for the element's `min` attribute.
    pub fn min_attr(&self) -> Option<String> {
        self.min.as_ref().map(|min| self.adapter.iso_date_string(min))
    }

    pub fn max_attr(&self) -> Option<String> {
        self.max.as_ref().map(|max| self.adapter.iso_date_string(max))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_touch_device(&self) -> bool {
        self.touch_device
    }

    // ── Value coercion ──────────────────────────────────────────────────

    pub fn parse(&self, text: &str) -> Option<A::Date> {
        self.adapter
            .parse(text, self.formats.parse_format(self.time.hide_time))
    }

    pub fn format(&self, date: &A::Date) -> String {
        self.adapter
            .format(date, self.formats.display_format(self.time.hide_time))
    }

    /// Writes a value, re-rendering the text. Emits a change only when the
    /// parsed value actually differs.
    pub fn set_value(&mut self, value: Option<A::Date>) {
        let previous = self.value.take();
        self.text = value
            .as_ref()
            .map(|date| self.format(date))
            .unwrap_or_default();
        if !self.adapter.same_date(previous.as_ref(), value.as_ref()) {
            self.events.push(InputEvent::ValueChanged(value.clone()));
        }
        self.value = value;
    }

    /// A selection confirmed in the picker.
    pub fn select_from_picker(&mut self, date: A::Date) {
        log::debug!("input {} received picker selection", self.id);
        self.set_value(Some(date));
        self.touched = true;
        self.events.push(InputEvent::DateChange(self.value.clone()));
    }

    // ── Host events ─────────────────────────────────────────────────────

    /// Typing. Unparseable text clears the value.
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let parsed = self.parse_text();
        if !self.adapter.same_date(parsed.as_ref(), self.value.as_ref()) {
            self.value = parsed;
            self.events.push(InputEvent::ValueChanged(self.value.clone()));
        }
    }

    pub fn on_change(&mut self) {
        self.events.push(InputEvent::DateChange(self.value.clone()));
    }

    pub fn on_blur(&mut self) {
        self.touched = true;
    }

    /// Alt+Down opens the picker; returns whether the key was consumed.
    pub fn on_keydown(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Down && key.has_alt() && !self.disabled {
            self.events.push(InputEvent::OpenRequested);
            return true;
        }
        false
    }

    pub fn drain_events(&mut self) -> Vec<InputEvent<A::Date>> {
        std::mem::take(&mut self.events)
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Min, max and filter checks on the current value; the first failure wins.
    pub fn validate(&self) -> Result<(), DateValidationError<A::Date>> {
        let validators = date_validators(
            &self.adapter,
            self.min.as_ref(),
            self.max.as_ref(),
            self.filter.as_ref(),
        );
        run_validators(&validators, self.value.as_ref())
    }

    fn parse_text(&self) -> Option<A::Date> {
        self.parse(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::{DatetimeInput, InputEvent};
    use crate::core::adapter::DateAdapter;
    use crate::core::chrono_adapter::ChronoAdapter;
    use crate::core::error::PickerError;
    use crate::core::formats::DateFormatConfig;
    use crate::core::time_attrs::TimeAttributes;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::validators::DateValidationError;
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn input() -> DatetimeInput<ChronoAdapter> {
        DatetimeInput::builder("when")
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .build()
            .expect("input")
    }

    #[test]
    fn builder_requires_providers() {
        let err = DatetimeInput::<ChronoAdapter>::builder("when").build();
        assert!(matches!(err, Err(PickerError::MissingProvider("DateAdapter"))));
    }

    #[test]
    fn typing_parses_and_emits_only_on_change() {
        let mut input = input();
        input.on_input("2017-03-14 09:30");
        let value = *input.value().expect("parsed");
        assert_eq!(input.adapter().day(&value), 14);

        input.on_input("2017-03-14 09:30 ");
        input.on_input("garbage");
        assert!(input.value().is_none());

        let events = input.drain_events();
        assert_eq!(
            events,
            vec![InputEvent::ValueChanged(Some(value)), InputEvent::ValueChanged(None)]
        );
    }

    #[test]
    fn hidden_time_uses_date_only_formats() {
        let mut input = DatetimeInput::builder("when")
            .with_adapter(Arc::new(ChronoAdapter::new()))
            .with_formats(DateFormatConfig::default())
            .with_time_attributes(TimeAttributes::new(true, 0, 0))
            .with_text("2017-03-14")
            .build()
            .expect("input");
        assert!(input.value().is_some());

        let date = input.adapter().create_date(2018, 0, 2, 15, 0);
        input.set_value(Some(date));
        assert_eq!(input.text(), "2018-01-02");
    }

    #[test]
    fn picker_selection_formats_and_commits() {
        let mut input = input();
        let date = input.adapter().create_date(2017, 2, 14, 18, 5);
        input.select_from_picker(date);

        assert_eq!(input.text(), "2017-03-14 18:05");
        assert!(input.is_touched());
        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::ValueChanged(Some(date)),
                InputEvent::DateChange(Some(date))
            ]
        );

        input.set_value(Some(date));
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn alt_down_requests_open_unless_disabled() {
        let mut input = input();
        assert!(!input.on_keydown(KeyEvent::plain(KeyCode::Down)));
        assert!(input.on_keydown(KeyEvent::alt(KeyCode::Down)));
        assert_eq!(input.drain_events(), vec![InputEvent::OpenRequested]);

        input.set_disabled(true);
        assert!(!input.on_keydown(KeyEvent::alt(KeyCode::Down)));
    }

    #[test]
    fn attributes_and_bounds() {
        let attributes: IndexMap<String, String> = [("hide-time", "true"), ("hour", "6")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let adapter = Arc::new(ChronoAdapter::new());
        let min = adapter.create_date(2017, 0, 10, 0, 0);
        let mut input = DatetimeInput::builder("when")
            .with_adapter(Arc::clone(&adapter))
            .with_formats(DateFormatConfig::default())
            .with_attributes(attributes)
            .with_min(Some(min))
            .with_text("2017-01-05")
            .build()
            .expect("input");

        assert!(input.time_attributes().hide_time);
        assert_eq!(input.time_attributes().default_hour, 6);
        assert_eq!(input.min_attr().as_deref(), Some("2017-01-10"));
        assert!(input.max_attr().is_none());
        assert!(matches!(
            input.validate(),
            Err(DateValidationError::BelowMin { .. })
        ));

        input.on_input("2017-01-12");
        assert!(input.validate().is_ok());
        input.on_blur();
        assert!(input.is_touched());
    }
}
