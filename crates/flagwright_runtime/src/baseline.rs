//! Encoding of the baseline marker in remote names.
//!
//! A baseline flag is delivered as its plain token with
//! [`BASELINE_SUFFIX`] appended: `"true_baseline"`, `"short_baseline"`.

/// Suffix marking the control group of an experiment.
pub const BASELINE_SUFFIX: &str = "_baseline";

/// Splits a remote name into its baseline marker and the remaining token.
///
/// ```
/// use flagwright_runtime::split_baseline;
///
/// assert_eq!(split_baseline("true_baseline"), (true, "true"));
/// assert_eq!(split_baseline("short"), (false, "short"));
/// ```
#[must_use]
pub fn split_baseline(name: &str) -> (bool, &str) {
    match name.strip_suffix(BASELINE_SUFFIX) {
        Some(token) => (true, token),
        None => (false, name),
    }
}

/// Joins a token and a baseline marker back into a remote name.
#[must_use]
pub fn join_baseline(token: &str, baseline: bool) -> String {
    if baseline {
        format!("{token}{BASELINE_SUFFIX}")
    } else {
        token.to_string()
    }
}

/// Parses exactly `"true"` or `"false"`.
#[must_use]
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
