//! Owner-scoped task query construction.
//!
//! Listing tasks accepts optional filter, search, and sort parameters. This
//! module turns them into a [`TaskQuerySpec`]: a plain value describing the
//! filters, sort key, and direction, decoupled from execution. The spec
//! renders deterministic SQL (identical parameters always produce identical
//! SQL text and bind order), and [`super::tasks::list`] applies it.
//!
//! The owner equality filter is always present and AND-combined with the
//! optional filters; the search OR applies only between the two text columns.

use crate::models::task::{TaskQuery, TaskStatus};

/// Recognized sort columns. Anything else requested falls back to the
/// default sort instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Deadline,
    Priority,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A deterministic retrieval specification for one owner's tasks.
#[derive(Debug)]
pub struct TaskQuerySpec {
    owner_id: i32,
    status: Option<TaskStatus>,
    search: Option<String>,
    sort_key: SortKey,
    sort_order: SortOrder,
}

impl TaskQuerySpec {
    /// Builds a spec from the raw query parameters, scoped to `owner_id`.
    ///
    /// Sort resolution: `sortBy` must be one of `deadline`, `priority`, or
    /// `createdAt`; any other value, or its absence, selects the default of
    /// creation time descending (newest first), ignoring `sortOrder`. When
    /// `sortBy` is recognized, `sortOrder` of `desc` sorts descending and
    /// every other value sorts ascending.
    pub fn build(owner_id: i32, params: &TaskQuery) -> Self {
        let (sort_key, sort_order) = match params.sort_by.as_deref() {
            Some("deadline") => (SortKey::Deadline, requested_order(params)),
            Some("priority") => (SortKey::Priority, requested_order(params)),
            Some("createdAt") => (SortKey::CreatedAt, requested_order(params)),
            _ => (SortKey::CreatedAt, SortOrder::Desc),
        };

        Self {
            owner_id,
            status: params.status,
            search: params.search.clone(),
            sort_key,
            sort_order,
        }
    }

    pub fn owner_id(&self) -> i32 {
        self.owner_id
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// The `ILIKE` pattern for the search term, if any: the term wrapped in
    /// `%`, with LIKE metacharacters escaped so the search stays a literal
    /// substring match.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }

    /// Renders the spec as SQL with positional placeholders. Bind order is
    /// fixed: owner, then status (if filtered), then the search pattern twice
    /// (title, description).
    pub fn sql(&self) -> String {
        let mut sql = String::from(
            "SELECT id, user_id, title, description, deadline, status, priority, created_at \
             FROM tasks WHERE user_id = $1",
        );
        let mut next_param = 2;

        if self.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", next_param));
            next_param += 1;
        }

        if self.search.is_some() {
            // Case-insensitive substring match, OR across the two text
            // columns only.
            sql.push_str(&format!(
                " AND (title ILIKE ${} OR description ILIKE ${})",
                next_param,
                next_param + 1
            ));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(self.order_column());
        sql.push(' ');
        sql.push_str(self.direction_keyword());
        sql
    }

    fn order_column(&self) -> &'static str {
        match self.sort_key {
            SortKey::Deadline => "deadline",
            // task_priority labels are declared low, medium, high, so the
            // enum column orders by severity rather than alphabetically.
            SortKey::Priority => "priority",
            SortKey::CreatedAt => "created_at",
        }
    }

    fn direction_keyword(&self) -> &'static str {
        match self.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

fn requested_order(params: &TaskQuery) -> SortOrder {
    // Anything other than an explicit "desc" is ascending.
    if params.sort_order.as_deref() == Some("desc") {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
