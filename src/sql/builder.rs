//! Builds parameterized SELECT, INSERT, UPDATE and soft-delete statements.
//! Identifiers come from compile-time table definitions only; values are always placeholders.

use crate::sql::params::{arguments, PgBindValue};
use sqlx::postgres::PgArguments;
use uuid::Uuid;

/// Soft-delete marker column; 0 means live.
pub const DELETED_AT: &str = "deleted_at";

/// A table and the alias used for it in list/read queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub alias: &'static str,
}

impl Table {
    pub const fn new(name: &'static str, alias: &'static str) -> Self {
        Table { name, alias }
    }

    fn qualified(&self, column: &str) -> String {
        format!("{}.{}", self.alias, column)
    }
}

/// Extra columns pulled from a joined table into list rows.
#[derive(Clone, Copy, Debug)]
pub struct Join {
    pub columns: &'static str,
    pub clause: &'static str,
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }

    pub fn arguments(&self) -> Result<PgArguments, sqlx::Error> {
        arguments(&self.params)
    }
}

/// One typed filter condition. Rendered against a table alias, or bare inside a subquery.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Eq {
        column: &'static str,
        value: PgBindValue,
    },
    /// Case-insensitive substring match; the needle is matched literally.
    Contains {
        column: &'static str,
        needle: String,
    },
    AtLeast {
        column: &'static str,
        value: PgBindValue,
    },
    /// Whole years between the date column and today equal `years`.
    AgeEquals {
        column: &'static str,
        years: i32,
    },
    /// `column IN (SELECT select FROM table WHERE <live> AND inner)`.
    InSubquery {
        column: &'static str,
        table: &'static str,
        select: &'static str,
        inner: Box<Predicate>,
    },
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl Into<PgBindValue>) -> Self {
        Predicate::Eq {
            column,
            value: value.into(),
        }
    }

    pub fn at_least(column: &'static str, value: impl Into<PgBindValue>) -> Self {
        Predicate::AtLeast {
            column,
            value: value.into(),
        }
    }

    fn render(&self, alias: Option<&str>, q: &mut QueryBuf) -> String {
        let col = |c: &str| match alias {
            Some(a) => format!("{}.{}", a, c),
            None => c.to_string(),
        };
        match self {
            Predicate::Eq { column, value } => {
                let n = q.push_param(value.clone());
                format!("{} = ${}", col(*column), n)
            }
            Predicate::Contains { column, needle } => {
                let n = q.push_param(PgBindValue::Text(format!("%{}%", escape_like(needle))));
                format!("{} ILIKE ${}", col(*column), n)
            }
            Predicate::AtLeast { column, value } => {
                let n = q.push_param(value.clone());
                format!("{} >= ${}", col(*column), n)
            }
            Predicate::AgeEquals { column, years } => {
                let n = q.push_param(PgBindValue::Int(*years));
                format!(
                    "date_part('year', age(CURRENT_DATE, {}))::int = ${}",
                    col(*column),
                    n
                )
            }
            Predicate::InSubquery {
                column,
                table,
                select,
                inner,
            } => {
                let inner_sql = inner.render(None, q);
                format!(
                    "{} IN (SELECT {} FROM {} WHERE {} = 0 AND {})",
                    col(*column),
                    select,
                    table,
                    DELETED_AT,
                    inner_sql
                )
            }
        }
    }
}

/// Escape LIKE metacharacters so user input matches literally (backslash is the default escape).
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn projection(table: &Table, join: Option<&Join>) -> String {
    match join {
        Some(j) => format!("{}.*, {}", table.alias, j.columns),
        None => format!("{}.*", table.alias),
    }
}

fn from_clause(table: &Table, join: Option<&Join>) -> String {
    match join {
        Some(j) => format!("{} {} {}", table.name, table.alias, j.clause),
        None => format!("{} {}", table.name, table.alias),
    }
}

/// SELECT one live row by id.
pub fn select_by_id(table: &Table, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} AND {} = 0",
        projection(table, None),
        from_clause(table, None),
        table.qualified("id"),
        n,
        table.qualified(DELETED_AT)
    );
    q
}

/// SELECT live rows matching every predicate. No ORDER BY: callers must not rely on order.
pub fn select_list(table: &Table, join: Option<&Join>, predicates: &[Predicate]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = vec![format!("{} = 0", table.qualified(DELETED_AT))];
    for p in predicates {
        where_parts.push(p.render(Some(table.alias), &mut q));
    }
    q.sql = format!(
        "SELECT {} FROM {} WHERE {}",
        projection(table, join),
        from_clause(table, join),
        where_parts.join(" AND ")
    );
    q
}

/// INSERT one row and return it.
pub fn insert(table: &Table, values: &[(&'static str, PgBindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in values {
        let n = q.push_param(val.clone());
        cols.push(*col);
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table.name,
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// Columns supplied by a partial update, in the order they were set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changeset {
    fields: Vec<(&'static str, PgBindValue)>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: &'static str, value: impl Into<PgBindValue>) {
        self.fields.push((column, value.into()));
    }

    pub fn set_opt<T: Into<PgBindValue>>(&mut self, column: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.set(column, v);
        }
    }

    pub fn get(&self, column: &str) -> Option<&PgBindValue> {
        self.fields.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(c, _)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// UPDATE only the supplied columns plus `updated_at`. Returns None for an empty changeset,
/// in which case nothing should be sent to storage.
pub fn update(table: &Table, id: Uuid, changes: &Changeset) -> Option<QueryBuf> {
    if changes.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(changes.len() + 1);
    for (col, val) in &changes.fields {
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ${}", col, n));
    }
    sets.push("updated_at = NOW()".to_string());
    let id_param = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE id = ${} AND {} = 0 RETURNING id",
        table.name,
        sets.join(", "),
        id_param,
        DELETED_AT
    );
    Some(q)
}

/// Mark a live row deleted with the current epoch second.
pub fn soft_delete(table: &Table, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!(
        "UPDATE {} SET {} = EXTRACT(EPOCH FROM NOW())::bigint WHERE id = ${} AND {} = 0 RETURNING id",
        table.name, DELETED_AT, n, DELETED_AT
    );
    q
}

/// Lock a live row against concurrent delete for the rest of the transaction.
pub fn lock_live_row(table: &Table, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!(
        "SELECT id FROM {} WHERE id = ${} AND {} = 0 FOR SHARE",
        table.name, n, DELETED_AT
    );
    q
}
