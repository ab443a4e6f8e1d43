//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left alone. `field` names the config key in errors.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Variable referenced without a default and missing from the environment.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_document_root() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("EDGERING_TEST_SITE", "/srv/site");
        }
        let result = expand_env("${EDGERING_TEST_SITE}/public", "render.document_root").unwrap();
        assert_eq!(result, "/srv/site/public");
        unsafe {
            std::env::remove_var("EDGERING_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("EDGERING_TEST_UNSET_CLASS");
        }
        let result = expand_env("${EDGERING_TEST_UNSET_CLASS:-tbl_MD}", "render.table_class")
            .unwrap();
        assert_eq!(result, "tbl_MD");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("EDGERING_TEST_MISSING");
        }
        let err = expand_env("${EDGERING_TEST_MISSING}", "render.document_root").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in render.document_root: ${EDGERING_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_plain_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("public", "f").unwrap(), "public");
        assert_eq!(expand_env("$HOME/public", "f").unwrap(), "$HOME/public");
    }
}
