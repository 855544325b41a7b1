//! Template path helpers.

/// Extension carried by template files and dropped from transpiled output.
const TEMPLATE_EXTENSION: &str = ".jinja";

/// Normalize a template path to the form used as a loader name and preset key.
///
/// Backslashes become forward slashes and leading `./` segments are dropped.
///
/// ```
/// use jinjasql_core::normalize_template_path;
///
/// assert_eq!(normalize_template_path("tables\\vehicles.sql.jinja"), "tables/vehicles.sql.jinja");
/// assert_eq!(normalize_template_path("./views/active.sql.jinja"), "views/active.sql.jinja");
/// ```
pub fn normalize_template_path(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// Remove a trailing `.jinja` extension, if present.
///
/// ```
/// use jinjasql_core::strip_template_extension;
///
/// assert_eq!(strip_template_extension("tables/vehicles.sql.jinja"), "tables/vehicles.sql");
/// assert_eq!(strip_template_extension("tables/vehicles.sql"), "tables/vehicles.sql");
/// ```
pub fn strip_template_extension(path: &str) -> &str {
    path.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_separators() {
        assert_eq!(
            normalize_template_path(".\\procs/dbo\\GetVehicle.sql.jinja"),
            "procs/dbo/GetVehicle.sql.jinja"
        );
    }

    #[test]
    fn test_strip_only_trailing_extension() {
        assert_eq!(
            strip_template_extension("a.jinja/b.sql.jinja"),
            "a.jinja/b.sql"
        );
    }
}
