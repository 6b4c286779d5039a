//! Food use-case service.
//!
//! # Responsibility
//! - Parse and validate food forms before any table write.
//! - Build browse/search/create views with clamped pagination.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - Each view reads its row count and its rows under one lock scope.
//!
//! # See also
//! - `service::paging`

use crate::model::food::{FoodData, FoodForm, FoodValidationError};
use crate::model::record::{Record, RecordId};
use crate::repo::record_store::{RecordRepository, Table};
use crate::service::paging::{clamp_view_index, view_count, ViewPage};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for food use-cases.
#[derive(Debug, Clone, PartialEq)]
pub enum FoodServiceError {
    /// Form input failed parsing or validation.
    Validation(FoodValidationError),
}

impl Display for FoodServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid food input: {err}"),
        }
    }
}

impl Error for FoodServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<FoodValidationError> for FoodServiceError {
    fn from(value: FoodValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One page of food rows.
pub type FoodPage = ViewPage<Record<FoodData>>;

/// Food service facade over a table repository.
pub struct FoodService<R: RecordRepository<FoodData>> {
    repo: R,
    page_length: usize,
}

impl<R: RecordRepository<FoodData>> FoodService<R> {
    /// Creates a service showing `page_length` rows per view (0 means 1).
    pub fn new(repo: R, page_length: usize) -> Self {
        Self {
            repo,
            page_length: page_length.max(1),
        }
    }

    pub fn page_length(&self) -> usize {
        self.page_length
    }

    pub fn size(&self) -> usize {
        self.repo.size()
    }

    /// Counts rows named `name` under its own lock scope.
    ///
    /// A later `search` or page call may observe a different table. Use
    /// [`FoodService::search`] when the count and the page must agree.
    pub fn count_by_name(&self, name: &str) -> usize {
        self.repo.count_by_name(name)
    }

    /// Validates the form and appends a new row.
    pub fn add_food(&self, form: &FoodForm) -> Result<RecordId, FoodServiceError> {
        let food = parse_form(form)?;
        Ok(self.repo.create(food))
    }

    pub fn food_by_id(&self, id: RecordId) -> Option<Record<FoodData>> {
        self.repo.find_by_id(id)
    }

    /// Validates the form and replaces the payload of row `id`.
    ///
    /// Returns `Ok(false)` when the row does not exist.
    pub fn update_food(&self, id: RecordId, form: &FoodForm) -> Result<bool, FoodServiceError> {
        let food = parse_form(form)?;
        Ok(self.repo.update(id, food))
    }

    pub fn delete_food(&self, id: RecordId) -> bool {
        self.repo.delete(id)
    }

    /// Returns one view of the whole table.
    pub fn browse(&self, view_index: i64) -> FoodPage {
        let page_length = self.page_length;
        self.repo.read(|table| {
            let total = table.len();
            build_view(total, page_length, view_index, |start, len| {
                table.page_by_range(start, len)
            })
        })
    }

    /// Returns one view of the rows named exactly `name`.
    pub fn search(&self, name: &str, view_index: i64) -> FoodPage {
        let page_length = self.page_length;
        let page = self.repo.read(|table| {
            let total = table.count_by_name(name);
            build_view(total, page_length, view_index, |start, len| {
                table.page_by_name(name, start, len)
            })
        });
        debug!(
            "event=food_search module=service status=ok matches_on_page={} view_count={}",
            page.items.len(),
            page.view_count
        );
        page
    }

    /// Returns the last view of the table, where new rows appear.
    pub fn last_view(&self) -> FoodPage {
        self.repo.read(|table| last_view_of(table, self.page_length))
    }
}

fn parse_form(form: &FoodForm) -> Result<FoodData, FoodServiceError> {
    form.parse().map_err(|err| {
        warn!("event=food_input module=service status=rejected reason={err}");
        FoodServiceError::from(err)
    })
}

fn last_view_of(table: &Table<FoodData>, page_length: usize) -> FoodPage {
    build_view(table.len(), page_length, i64::MAX, |start, len| {
        table.page_by_range(start, len)
    })
}

fn build_view(
    total: usize,
    page_length: usize,
    requested_index: i64,
    fetch: impl FnOnce(i64, i64) -> Vec<Record<FoodData>>,
) -> FoodPage {
    let view_count = view_count(total, page_length);
    let view_index = clamp_view_index(requested_index, view_count);
    let start = i64::try_from(view_index.saturating_mul(page_length)).unwrap_or(i64::MAX);
    let len = i64::try_from(page_length).unwrap_or(i64::MAX);
    ViewPage {
        items: fetch(start, len),
        view_index,
        view_count,
    }
}
