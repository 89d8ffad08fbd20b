//! Query composer for list requests: one bounded, ordered page plus the matching total count.
//!
//! Both statements are built from the same [`HorseFilter`], so `total` always counts exactly
//! the rows the page is cut from. Ordering and pagination apply to the page only.

use super::builder::{horses_table, quoted, select_column_list, QueryBuf};
use crate::model::{HorseFilter, ListQuery, Sort, SortField};

/// The two statements issued for one list request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPlan {
    pub page: QueryBuf,
    pub count: QueryBuf,
}

pub fn plan_list(query: &ListQuery) -> ListPlan {
    ListPlan {
        page: select_page(query),
        count: count_matching(&query.filter),
    }
}

/// SELECT … WHERE filters ORDER BY field, id LIMIT OFFSET.
pub fn select_page(query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&query.filter, &mut q);
    let order_clause = order_clause(query.sort);
    let limit = q.push_param(query.limit);
    let offset = q.push_param(query.skip);
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        select_column_list(),
        horses_table(),
        where_clause,
        order_clause,
        limit,
        offset
    );
    q
}

/// SELECT COUNT(*) over the same filters, ignoring order and pagination.
pub fn count_matching(filter: &HorseFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(filter, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", horses_table(), where_clause);
    q
}

fn where_clause(filter: &HorseFilter, q: &mut QueryBuf) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &filter.name_contains {
        let ph = q.push_param(format!("%{}%", escape_like(name)));
        parts.push(format!("{} ILIKE {} ESCAPE '\\'", quoted("name"), ph));
    }
    if let Some(min) = filter.min_radius {
        let ph = q.push_param(min);
        parts.push(format!("{} >= {}", quoted("radius"), ph));
    }
    if let Some(max) = filter.max_radius {
        let ph = q.push_param(max);
        parts.push(format!("{} <= {}", quoted("radius"), ph));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// Ties on the sort column are broken by id in the same direction.
fn order_clause(sort: Sort) -> String {
    let dir = sort.order.as_sql();
    let mut clause = format!(" ORDER BY {} {}", quoted(sort.field.column()), dir);
    if sort.field != SortField::Id {
        clause.push_str(&format!(", {} {}", quoted(SortField::Id.column()), dir));
    }
    clause
}

/// Makes `%`, `_` and `\` in user input match literally inside a LIKE pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
