use std::env;

/// Retrieves an environment variable, falling back to a default when it is
/// unset or blank.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `default`: The value returned when the variable is unset or empty.
///
/// # Returns
/// - `String`
pub fn get_env_var_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}
