use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error(
        "datetimepicker: no provider found for {0}. Supply a DateAdapter implementation and a DateFormatConfig when building the picker."
    )]
    MissingProvider(&'static str),

    #[error("a datetimepicker can only be associated with a single input")]
    InputAlreadyRegistered,

    #[error("attempted to open a datetimepicker with no associated input")]
    NoInput,

    #[error("invalid date `{value}` for `{field}`")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid picker config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid picker config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PickerResult<T> = Result<T, PickerError>;

pub const DATE_ADAPTER: &str = "DateAdapter";
pub const DATE_FORMATS: &str = "DateFormatConfig";

#[cfg(test)]
mod tests {
    use super::{DATE_ADAPTER, PickerError};

    #[test]
    fn missing_provider_names_the_dependency() {
        let message = PickerError::MissingProvider(DATE_ADAPTER).to_string();
        assert!(message.contains("no provider found for DateAdapter"));
    }
}
