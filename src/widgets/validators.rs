use crate::core::adapter::DateAdapter;
use std::cmp::Ordering;
use std::sync::Arc;

/// Predicate deciding which dates can be selected.
pub type DateFilter<D> = Arc<dyn Fn(&D) -> bool + Send + Sync>;

/// Why a bound value failed validation. Returned as data for form error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValidationError<D> {
    BelowMin { min: D, actual: D },
    AboveMax { max: D, actual: D },
    FilteredOut,
}

impl<D> DateValidationError<D> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BelowMin { .. } => "BelowMin",
            Self::AboveMax { .. } => "AboveMax",
            Self::FilteredOut => "FilteredOut",
        }
    }
}

pub type DateValidator<D> = Box<dyn Fn(&D) -> Result<(), DateValidationError<D>> + Send + Sync>;

/// Run `validators` against `value`, returning the first error.
///
/// An empty value is valid; "required" is the form's concern.
pub fn run_validators<D>(
    validators: &[DateValidator<D>],
    value: Option<&D>,
) -> Result<(), DateValidationError<D>> {
    let Some(value) = value else {
        return Ok(());
    };
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn min_date<A: DateAdapter + 'static>(adapter: Arc<A>, min: A::Date) -> DateValidator<A::Date> {
    Box::new(move |value: &A::Date| {
        if adapter.compare_date(&min, value) == Ordering::Greater {
            Err(DateValidationError::BelowMin {
                min: min.clone(),
                actual: value.clone(),
            })
        } else {
            Ok(())
        }
    })
}

pub fn max_date<A: DateAdapter + 'static>(adapter: Arc<A>, max: A::Date) -> DateValidator<A::Date> {
    Box::new(move |value: &A::Date| {
        if adapter.compare_date(&max, value) == Ordering::Less {
            Err(DateValidationError::AboveMax {
                max: max.clone(),
                actual: value.clone(),
            })
        } else {
            Ok(())
        }
    })
}

pub fn filtered<D: 'static>(filter: DateFilter<D>) -> DateValidator<D> {
    Box::new(move |value: &D| {
        if filter(value) {
            Ok(())
        } else {
            Err(DateValidationError::FilteredOut)
        }
    })
}

/// The min, max and filter checks, in that order, for whichever are set.
pub fn date_validators<A: DateAdapter + 'static>(
    adapter: &Arc<A>,
    min: Option<&A::Date>,
    max: Option<&A::Date>,
    filter: Option<&DateFilter<A::Date>>,
) -> Vec<DateValidator<A::Date>> {
    let mut validators = Vec::new();
    if let Some(min) = min {
        validators.push(min_date(Arc::clone(adapter), min.clone()));
    }
    if let Some(max) = max {
        validators.push(max_date(Arc::clone(adapter), max.clone()));
    }
    if let Some(filter) = filter {
        validators.push(filtered(Arc::clone(filter)));
    }
    validators
}

#[cfg(test)]
mod tests {
    use super::{DateFilter, DateValidationError, date_validators, run_validators};
    use crate::core::adapter::DateAdapter;
    use crate::core::chrono_adapter::ChronoAdapter;
    use chrono::{Datelike, NaiveDateTime};
    use std::sync::Arc;

    #[test]
    fn first_failing_check_wins_in_min_max_filter_order() {
        let adapter = Arc::new(ChronoAdapter::new());
        let min = adapter.create_date(2017, 0, 10, 0, 0);
        let max = adapter.create_date(2017, 0, 5, 0, 0);
        let never: DateFilter<NaiveDateTime> = Arc::new(|_: &NaiveDateTime| false);
        let validators = date_validators(&adapter, Some(&min), Some(&max), Some(&never));

        // Below min and above max at once: min is reported.
        let value = adapter.create_date(2017, 0, 7, 0, 0);
        let err = run_validators(&validators, Some(&value)).expect_err("invalid");
        assert_eq!(err, DateValidationError::BelowMin { min, actual: value });

        let late = adapter.create_date(2017, 0, 12, 0, 0);
        let only_max = date_validators(&adapter, None, Some(&max), Some(&never));
        let err = run_validators(&only_max, Some(&late)).expect_err("invalid");
        assert_eq!(err.kind(), "AboveMax");
    }

    #[test]
    fn filter_and_empty_values() {
        let adapter = Arc::new(ChronoAdapter::new());
        let odd_days: DateFilter<NaiveDateTime> = Arc::new(|d: &NaiveDateTime| d.day() % 2 == 1);
        let validators = date_validators(&adapter, None, None, Some(&odd_days));

        let even = adapter.create_date(2017, 0, 2, 0, 0);
        assert_eq!(
            run_validators(&validators, Some(&even)),
            Err(DateValidationError::FilteredOut)
        );
        let odd = adapter.create_date(2017, 0, 3, 0, 0);
        assert!(run_validators(&validators, Some(&odd)).is_ok());
        assert!(run_validators(&validators, None).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let adapter = Arc::new(ChronoAdapter::new());
        let edge = adapter.create_date(2017, 0, 10, 12, 0);
        let validators = date_validators(&adapter, Some(&edge), Some(&edge), None);
        assert!(run_validators(&validators, Some(&edge)).is_ok());
    }
}
