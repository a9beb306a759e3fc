/// The four collections of the original document store, as SQLite tables.
/// Embedded documents (keyword lists, sentence snapshots) live in JSON
/// columns; timestamps are RFC3339 UTC strings so lexicographic ORDER BY
/// matches chronological order.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "_db_metadata" (
    "key" TEXT PRIMARY KEY,
    "value" TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "sentence_bank" (
    "id" TEXT PRIMARY KEY,
    "content" TEXT NOT NULL,
    "translation" TEXT NOT NULL,
    "keywords" TEXT NOT NULL DEFAULT '[]',
    "category" TEXT NOT NULL DEFAULT 'daily',
    "difficulty" TEXT NOT NULL DEFAULT 'medium',
    "source" TEXT NOT NULL DEFAULT 'system',
    "createTime" TEXT NOT NULL,
    "isActive" INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS "idx_sentence_bank_active"
    ON "sentence_bank" ("isActive");

CREATE TABLE IF NOT EXISTS "daily_sentences" (
    "id" TEXT PRIMARY KEY,
    "date" TEXT NOT NULL UNIQUE,
    "content" TEXT NOT NULL,
    "translation" TEXT NOT NULL,
    "keywords" TEXT NOT NULL DEFAULT '[]',
    "category" TEXT NOT NULL DEFAULT 'daily',
    "difficulty" TEXT NOT NULL DEFAULT 'medium',
    "source" TEXT NOT NULL DEFAULT 'system',
    "createTime" TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "user_collections" (
    "id" TEXT PRIMARY KEY,
    "userId" TEXT NOT NULL,
    "sentenceId" TEXT NOT NULL,
    "sentence" TEXT NOT NULL,
    "collectedAt" TEXT NOT NULL,
    "createTime" TEXT NOT NULL,
    UNIQUE ("userId", "sentenceId")
);

CREATE INDEX IF NOT EXISTS "idx_user_collections_user_time"
    ON "user_collections" ("userId", "collectedAt" DESC);

CREATE TABLE IF NOT EXISTS "users" (
    "id" TEXT PRIMARY KEY,
    "openid" TEXT NOT NULL UNIQUE,
    "unionid" TEXT,
    "nickName" TEXT NOT NULL,
    "avatarUrl" TEXT NOT NULL DEFAULT '',
    "gender" INTEGER NOT NULL DEFAULT 0,
    "city" TEXT NOT NULL DEFAULT '',
    "province" TEXT NOT NULL DEFAULT '',
    "country" TEXT NOT NULL DEFAULT '',
    "createTime" TEXT NOT NULL,
    "lastLoginTime" TEXT NOT NULL,
    "totalCollections" INTEGER NOT NULL DEFAULT 0,
    "consecutiveDays" INTEGER NOT NULL DEFAULT 1,
    "totalStudyDays" INTEGER NOT NULL DEFAULT 1,
    "level" TEXT NOT NULL DEFAULT 'beginner',
    "points" INTEGER NOT NULL DEFAULT 0
);
"#;

pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ';' if !in_single_quote && !in_double_quote => {
                let stmt = current.trim();
                if !stmt.is_empty() {
                    statements.push(stmt.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }

        current.push(ch);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_semicolons_only() {
        let stmts = split_sql_statements("CREATE TABLE \"a\" (x TEXT DEFAULT ';');\nSELECT 1;");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].contains("';'"));
        assert_eq!(stmts[1], "SELECT 1");
    }

    #[test]
    fn schema_has_all_four_collections() {
        let sql = SCHEMA_SQL;
        for table in ["sentence_bank", "daily_sentences", "user_collections", "users"] {
            assert!(sql.contains(table), "missing table {table}");
        }
    }
}
