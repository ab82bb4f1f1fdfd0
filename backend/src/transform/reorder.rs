//! Column filter + reorder: the core transform.
//!
//! Keeps only columns named in the reference list, puts them in reference
//! order and projects every row onto them. Matching is exact string equality;
//! a header differing by one character (stray space, missing accent) is
//! dropped like any other unknown column.

use serde::Serialize;
use std::collections::HashSet;

use crate::models::{NormalizedTable, Table};
use crate::profile::ReferenceColumns;

/// What the reorder kept and what it discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    /// Output columns, in output order
    pub kept: Vec<String>,
    /// Input columns not carried over, in input order
    pub dropped: Vec<String>,
    /// Reference columns absent from the input, in reference order
    pub missing: Vec<String>,
}

/// Source column indexes to keep, in reference order.
///
/// When a reference name occurs more than once in `columns`, only the first
/// occurrence is kept.
pub fn plan_columns(columns: &[String], reference: &ReferenceColumns) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut keep: Vec<(usize, usize)> = columns
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| reference.position(name).map(|pos| (pos, idx)))
        .filter(|&(pos, _)| seen.insert(pos))
        .collect();

    keep.sort_by_key(|&(pos, _)| pos);
    keep.into_iter().map(|(_, idx)| idx).collect()
}

/// Filter and reorder `table` against `reference`.
///
/// Row count is preserved, except that a table with no matching column at all
/// yields zero columns and zero rows.
pub fn reorder_columns(table: &Table, reference: &ReferenceColumns) -> NormalizedTable {
    let plan = plan_columns(&table.columns, reference);
    if plan.is_empty() {
        return NormalizedTable::from_table(Table::default());
    }

    let columns = plan.iter().map(|&i| table.columns[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            plan.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    NormalizedTable::from_table(Table::new(columns, rows))
}

/// Same as [`reorder_columns`], also describing kept, dropped and missing columns.
pub fn reorder_with_report(
    table: &Table,
    reference: &ReferenceColumns,
) -> (NormalizedTable, ReorderReport) {
    let normalized = reorder_columns(table, reference);
    let plan: HashSet<usize> = plan_columns(&table.columns, reference).into_iter().collect();

    let dropped = table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| !plan.contains(i))
        .map(|(_, name)| name.clone())
        .collect();

    let missing = reference
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(str::to_string)
        .collect();

    let report = ReorderReport {
        kept: normalized.columns().to_vec(),
        dropped,
        missing,
    };

    (normalized, report)
}
