/// Read an environment variable, falling back to the given value when the
/// variable is unset or not valid unicode.
pub fn env_var_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}
