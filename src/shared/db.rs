use sea_orm::sea_query::LikeExpr;
use sea_orm::DbErr;

/// Postgres unique violation (SQLSTATE 23505).
pub fn is_unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("23505") || msg.contains("duplicate key") || msg.contains("unique constraint")
}

/// Escapes LIKE wildcards so user input only matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` with wildcards in `term` escaped.
pub fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\')
}
