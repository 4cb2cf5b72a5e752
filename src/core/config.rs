use crate::core::adapter::DateAdapter;
use crate::core::chrono_adapter::ChronoAdapter;
use crate::core::error::{PickerError, PickerResult};
use crate::core::formats::DateFormatConfig;
use crate::core::intl::IntlLabels;
use crate::core::time_attrs::TimeAttributes;
use crate::core::view_state::PeriodView;
use serde::{Deserialize, Serialize};

/// File-level picker configuration.
///
/// Dates are kept as text and parsed through the adapter with the
/// configured parse descriptors, so the same file works for any adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub touch_ui: bool,
    pub start_view: PeriodView,
    pub start_at: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub first_day_of_week: u32,
    pub twelve_hour: bool,
    pub time: TimeAttributes,
    pub formats: DateFormatConfig,
    pub labels: IntlLabels,
}

/// Parsed `min` / `max` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<D> {
    pub min: Option<D>,
    pub max: Option<D>,
}

impl PickerConfig {
    pub fn from_yaml_str(source: &str) -> PickerResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> PickerResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn chrono_adapter(&self) -> ChronoAdapter {
        ChronoAdapter::new()
            .with_first_day_of_week(self.first_day_of_week)
            .with_twelve_hour(self.twelve_hour)
    }

    pub fn bounds<A: DateAdapter>(&self, adapter: &A) -> PickerResult<Bounds<A::Date>> {
        Ok(Bounds {
            min: self.parse_field(adapter, "min", self.min.as_deref())?,
            max: self.parse_field(adapter, "max", self.max.as_deref())?,
        })
    }

    pub fn start_date<A: DateAdapter>(&self, adapter: &A) -> PickerResult<Option<A::Date>> {
        self.parse_field(adapter, "start_at", self.start_at.as_deref())
    }

    fn parse_field<A: DateAdapter>(
        &self,
        adapter: &A,
        field: &'static str,
        raw: Option<&str>,
    ) -> PickerResult<Option<A::Date>> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };
        adapter
            .parse(raw, &self.formats.parse.date_time)
            .or_else(|| adapter.parse(raw, &self.formats.parse.date_only))
            .map(Some)
            .ok_or_else(|| PickerError::InvalidDate {
                field,
                value: raw.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::PickerConfig;
    use crate::core::adapter::DateAdapter;
    use crate::core::error::PickerError;
    use crate::core::view_state::PeriodView;

    #[test]
    fn yaml_config_fills_defaults() {
        let config = PickerConfig::from_yaml_str(
            "touch_ui: true\nstart_view: year\nmin: 2017-01-01\ntime:\n  hide_time: true\n",
        )
        .expect("config");

        assert!(config.touch_ui);
        assert_eq!(config.start_view, PeriodView::Year);
        assert!(config.time.hide_time);
        assert_eq!(config.formats.parse.date_only, "%Y-%m-%d");
        assert_eq!(config.labels.submit, "Submit");

        let adapter = config.chrono_adapter();
        let bounds = config.bounds(&adapter).expect("bounds");
        let min = bounds.min.expect("min");
        assert_eq!((adapter.year(&min), adapter.month(&min)), (2017, 0));
        assert!(bounds.max.is_none());
    }

    #[test]
    fn json_config_reads_locale_fields() {
        let config =
            PickerConfig::from_json_str(r#"{"first_day_of_week": 1, "twelve_hour": true}"#)
                .expect("config");
        let adapter = config.chrono_adapter();
        assert_eq!(adapter.first_day_of_week(), 1);
        assert!(adapter.is_12_hour());
    }

    #[test]
    fn unparseable_bound_is_reported() {
        let config = PickerConfig {
            max: Some("someday".to_string()),
            ..PickerConfig::default()
        };
        let err = config
            .bounds(&config.chrono_adapter())
            .expect_err("bad max");
        assert!(matches!(err, PickerError::InvalidDate { field: "max", .. }));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            PickerConfig::from_yaml_str("touch_ui: [nope"),
            Err(PickerError::Yaml(_))
        ));
    }
}
