//! Period summaries - totals and per-category breakdowns over a window.
//!
//! A summary is computed in three steps: the window is derived from the requested
//! period, the matching records are read once from a [`RecordSource`], and the records
//! are folded into a [`SummaryAccumulator`]. The fold only adds exact decimals and
//! counts, so accumulators built over disjoint shards can be merged in any order.

use crate::{
    core::period::{self, PeriodKind, PeriodWindow},
    errors::Result,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use tracing::{debug, instrument};

/// A logged entry that can be summed by category.
pub trait Aggregatable {
    /// Closed category set of this record kind
    type Category: Copy + Ord + Debug + Send + Sync;

    /// Category the record is grouped under
    fn category(&self) -> Self::Category;

    /// Quantity summed into totals (money for expenses, kilocalories for food)
    fn amount(&self) -> Decimal;
}

/// Storage read contract used by the summaries.
///
/// Implementations return every record of `user_id` whose occurrence instant lies in
/// `[window.start, window.end)`, narrowed to `category` when one is given. Reads have
/// no side effects and failures are returned as-is.
pub trait RecordSource<R: Aggregatable> {
    /// Finds the matching records in any order.
    fn find_records(
        &self,
        user_id: &str,
        window: &PeriodWindow,
        category: Option<R::Category>,
    ) -> impl Future<Output = Result<Vec<R>>> + Send;
}

/// Total and entry count of one category inside a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown<C> {
    /// The category
    pub category: C,
    /// Sum of the amounts in this category
    pub total: Decimal,
    /// Number of records in this category
    pub count: usize,
}

/// Result of summarizing one period for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<C> {
    /// Label of the period (`Today`, `This Week`, ..., `Custom Range`)
    pub period_label: String,
    /// Inclusive lower bound
    pub start: DateTime<Utc>,
    /// Exclusive upper bound
    pub end: DateTime<Utc>,
    /// Sum of all amounts
    pub total_amount: Decimal,
    /// Number of records
    pub entry_count: usize,
    /// One entry per category present, in no guaranteed order
    pub by_category: Vec<CategoryBreakdown<C>>,
}

impl<C: Ord> Summary<C> {
    /// Whether no record matched
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Breakdown ordered for display: largest total first, ties by category.
    #[must_use]
    pub fn sorted_by_total(&self) -> Vec<&CategoryBreakdown<C>> {
        let mut sorted: Vec<&CategoryBreakdown<C>> = self.by_category.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        sorted
    }
}

/// Running totals of a summary under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryAccumulator<C: Ord> {
    total_amount: Decimal,
    entry_count: usize,
    by_category: BTreeMap<C, (Decimal, usize)>,
}

impl<C: Ord> Default for SummaryAccumulator<C> {
    fn default() -> Self {
        Self {
            total_amount: Decimal::ZERO,
            entry_count: 0,
            by_category: BTreeMap::new(),
        }
    }
}

impl<C: Ord + Copy> SummaryAccumulator<C> {
    /// Creates an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record to the totals.
    pub fn add<R: Aggregatable<Category = C>>(&mut self, record: &R) {
        let amount = record.amount();
        self.total_amount += amount;
        self.entry_count += 1;

        let entry = self
            .by_category
            .entry(record.category())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: Self) {
        self.total_amount += other.total_amount;
        self.entry_count += other.entry_count;
        for (category, (total, count)) in other.by_category {
            let entry = self.by_category.entry(category).or_insert((Decimal::ZERO, 0));
            entry.0 += total;
            entry.1 += count;
        }
    }

    /// Turns the totals into the summary of `window`.
    #[must_use]
    pub fn finish(self, window: PeriodWindow) -> Summary<C> {
        Summary {
            period_label: window.label,
            start: window.start,
            end: window.end,
            total_amount: self.total_amount,
            entry_count: self.entry_count,
            by_category: self
                .by_category
                .into_iter()
                .map(|(category, (total, count))| CategoryBreakdown {
                    category,
                    total,
                    count,
                })
                .collect(),
        }
    }
}

/// Reduces already fetched records into the summary of `window`.
#[must_use]
pub fn summarize<R: Aggregatable>(records: &[R], window: PeriodWindow) -> Summary<R::Category> {
    let mut accumulator = SummaryAccumulator::new();
    for record in records {
        accumulator.add(record);
    }
    accumulator.finish(window)
}

/// Summarizes the named period containing `reference` (today when `None`).
#[instrument(skip(source))]
pub async fn compute_summary<R, S>(
    source: &S,
    user_id: &str,
    kind: PeriodKind,
    reference: Option<NaiveDate>,
    category: Option<R::Category>,
    offset: FixedOffset,
) -> Result<Summary<R::Category>>
where
    R: Aggregatable,
    S: RecordSource<R> + Sync,
{
    let reference = reference.unwrap_or_else(|| period::local_today(offset));
    let window = period::compute_period_window(kind, reference, offset)?;
    summarize_window(source, user_id, window, category).await
}

/// Summarizes `start_date` through `end_date`, both inclusive in local time.
#[instrument(skip(source))]
pub async fn compute_custom_range_summary<R, S>(
    source: &S,
    user_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset: FixedOffset,
) -> Result<Summary<R::Category>>
where
    R: Aggregatable,
    S: RecordSource<R> + Sync,
{
    let window = period::compute_custom_window(start_date, end_date, offset)?;
    summarize_window(source, user_id, window, None).await
}

async fn summarize_window<R, S>(
    source: &S,
    user_id: &str,
    window: PeriodWindow,
    category: Option<R::Category>,
) -> Result<Summary<R::Category>>
where
    R: Aggregatable,
    S: RecordSource<R> + Sync,
{
    debug!(
        "Summarizing {} for {user_id}: [{}, {})",
        window.label, window.start, window.end
    );
    let records = source.find_records(user_id, &window, category).await?;
    debug!("Fetched {} records", records.len());
    Ok(summarize(&records, window))
}
