use sqlx::MySql;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_string())
    }
}

/// ===============================
/// Dynamic WHERE clause
/// ===============================
/// Conditions are joined with AND; each `?` placeholder is matched by the
/// value pushed alongside it.
#[derive(Debug, Default)]
pub struct Filters {
    conditions: Vec<String>,
    values: Vec<SqlValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Condition with exactly one `?` placeholder.
    pub fn eq(mut self, condition: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions.push(condition.to_string());
        self.values.push(value.into());
        self
    }

    /// Condition without placeholders.
    pub fn raw(mut self, condition: &str) -> Self {
        self.conditions.push(condition.to_string());
        self
    }

    pub fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn bind<'q, O>(
        self,
        mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    ) -> QueryAs<'q, MySql, O, MySqlArguments> {
        for value in self.values {
            query = match value {
                SqlValue::String(v) => query.bind(v),
            };
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_have_no_where() {
        assert_eq!(Filters::new().where_sql(), "");
    }

    #[test]
    fn conditions_join_with_and() {
        let filters = Filters::new()
            .eq("employee = ?", "HR-EMP-00001")
            .raw("docstatus != 2")
            .eq("status = ?", "Open");

        assert_eq!(
            filters.where_sql(),
            " WHERE employee = ? AND docstatus != 2 AND status = ?"
        );
        assert_eq!(
            filters.values(),
            &[SqlValue::from("HR-EMP-00001"), SqlValue::from("Open")]
        );
    }
}
