use crate::sql::base::error::DbError;
use model::table::TableRef;

/// Wraps an identifier in Postgres double quotes.
pub fn quote_identifier(ident: &str) -> String {
    format!(r#""{ident}""#)
}

/// Postgres positional placeholder for a 0-based parameter index.
pub fn placeholder(index: usize) -> String {
    format!("${}", index + 1)
}

pub fn quote_table(table: &TableRef) -> String {
    match &table.schema {
        Some(schema) => format!(
            "{}.{}",
            quote_identifier(schema),
            quote_identifier(&table.name)
        ),
        None => quote_identifier(&table.name),
    }
}

/// EXISTS probe for "does the destination hold any row at all".
pub fn any_row_probe(table: &TableRef) -> String {
    format!("SELECT EXISTS (SELECT 1 FROM {})", quote_table(table))
}

/// A single-row parameterized INSERT, meant to be prepared once and
/// executed per record.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    table: TableRef,
    columns: Vec<String>,
    conflict_keys: Vec<String>,
}

impl InsertStatement {
    pub fn new(table: TableRef, columns: Vec<String>) -> Result<Self, DbError> {
        if columns.is_empty() {
            return Err(DbError::QueryBuildError(format!(
                "insert into '{table}' declares no columns"
            )));
        }
        Ok(InsertStatement {
            table,
            columns,
            conflict_keys: Vec::new(),
        })
    }

    /// Adds an `ON CONFLICT` clause over `keys`. Non-key columns are
    /// updated from the excluded row; when every inserted column is a key
    /// the action degrades to `DO NOTHING`.
    pub fn on_conflict(mut self, keys: &[String]) -> Self {
        self.conflict_keys = keys.to_vec();
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn render(&self) -> String {
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&quote_table(&self.table));

        sql.push_str(" (");
        let quoted: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        sql.push_str(&quoted.join(", "));
        sql.push(')');

        sql.push_str(" VALUES (");
        for i in 0..self.columns.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&placeholder(i));
        }
        sql.push(')');

        if !self.conflict_keys.is_empty() {
            sql.push_str(" ON CONFLICT (");
            let quoted: Vec<String> = self
                .conflict_keys
                .iter()
                .map(|c| quote_identifier(c))
                .collect();
            sql.push_str(&quoted.join(", "));
            sql.push(')');

            let assignments: Vec<String> = self
                .columns
                .iter()
                .filter(|c| !self.conflict_keys.contains(c))
                .map(|c| format!("{} = EXCLUDED.{}", quote_identifier(c), quote_identifier(c)))
                .collect();
            if assignments.is_empty() {
                sql.push_str(" DO NOTHING");
            } else {
                sql.push_str(" DO UPDATE SET ");
                sql.push_str(&assignments.join(", "));
            }
        }

        sql.push(';');
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(raw: &str) -> TableRef {
        raw.parse().unwrap()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_plain_insert() {
        let insert = InsertStatement::new(
            table("public.email_thread_details"),
            columns(&["thread_id", "status"]),
        )
        .unwrap();
        assert_eq!(
            insert.render(),
            concat!(
                "INSERT INTO \"public\".\"email_thread_details\" ",
                "(\"thread_id\", \"status\") VALUES ($1, $2);"
            )
        );
    }

    #[test]
    fn renders_upsert_with_excluded_assignments() {
        let insert = InsertStatement::new(table("users"), columns(&["id", "name", "email"]))
            .unwrap()
            .on_conflict(&columns(&["id"]));
        assert_eq!(
            insert.render(),
            concat!(
                "INSERT INTO \"users\" (\"id\", \"name\", \"email\") VALUES ($1, $2, $3) ",
                "ON CONFLICT (\"id\") DO UPDATE SET \"name\" = EXCLUDED.\"name\", ",
                "\"email\" = EXCLUDED.\"email\";"
            )
        );
    }

    #[test]
    fn all_key_upsert_degrades_to_do_nothing() {
        let insert = InsertStatement::new(table("pairs"), columns(&["a", "b"]))
            .unwrap()
            .on_conflict(&columns(&["a", "b"]));
        assert_eq!(
            insert.render(),
            concat!(
                "INSERT INTO \"pairs\" (\"a\", \"b\") VALUES ($1, $2) ",
                "ON CONFLICT (\"a\", \"b\") DO NOTHING;"
            )
        );
    }

    #[test]
    fn rejects_empty_column_list() {
        let err = InsertStatement::new(table("users"), vec![]).unwrap_err();
        assert!(matches!(err, DbError::QueryBuildError(_)));
    }

    #[test]
    fn probe_targets_qualified_table() {
        assert_eq!(
            any_row_probe(&table("public.events")),
            "SELECT EXISTS (SELECT 1 FROM \"public\".\"events\")"
        );
    }
}
