use crate::errors::SeriesError;
use crate::models::{Record, TimeRange};

/// Daily records ordered oldest to newest, one per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    records: Vec<Record>,
}

impl Series {
    pub fn new(records: Vec<Record>) -> Result<Self, SeriesError> {
        for pair in records.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }
}

/// A non-empty trailing slice of a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    records: &'a [Record],
}

impl<'a> Window<'a> {
    pub fn new(records: &'a [Record]) -> Result<Self, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    // Never empty, so indexing the ends cannot fail.
    pub fn first(&self) -> &'a Record {
        &self.records[0]
    }

    pub fn last(&self) -> &'a Record {
        &self.records[self.records.len() - 1]
    }
}

/// Narrows `series` to the trailing records covered by `range`.
///
/// A range longer than the series yields the whole series.
pub fn select_window(series: &Series, range: TimeRange) -> Result<Window<'_>, SeriesError> {
    let records = series.records();
    let start = match range.trailing_days() {
        Some(count) => records.len().saturating_sub(count),
        None => 0,
    };
    Window::new(&records[start..])
}
