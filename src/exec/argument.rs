// src/exec/argument.rs

//! Argument normalization.
//!
//! Some execution layers split each argument on its first whitespace and
//! silently drop the rest, so `--gruntfile Gruntfile.js` would reach the tool
//! as just `--gruntfile`. Options written that way are collapsed into a
//! single token (`--gruntfile=Gruntfile.js`) before they are submitted.

use std::sync::LazyLock;

use regex::Regex;

/// One or two leading dashes, an option name, then the whitespace run that
/// separates it from its value. Whitespace is ASCII only; a non-breaking
/// space belongs to the token.
static WHITESPACED_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-{1,2}[A-Za-z0-9_-]*((?-u:\s)+)").expect("whitespaced option pattern is valid")
});

/// Replace the first whitespace run of a `--option value` style argument
/// with `replacement`. Anything else is returned unchanged.
///
/// ```
/// use frontend_exec::exec::normalize_argument;
///
/// assert_eq!(normalize_argument("--option  true", "="), "--option=true");
/// assert_eq!(normalize_argument("plainarg", "="), "plainarg");
/// ```
pub fn normalize_argument(argument: &str, replacement: &str) -> String {
    let Some(whitespace) = WHITESPACED_OPTION
        .captures(argument)
        .and_then(|caps| caps.get(1))
    else {
        return argument.to_string();
    };

    let mut normalized = String::with_capacity(argument.len());
    normalized.push_str(&argument[..whitespace.start()]);
    normalized.push_str(replacement);
    normalized.push_str(&argument[whitespace.end()..]);
    normalized
}

/// Whether `normalize_argument` would rewrite this argument.
pub fn needs_normalization(argument: &str) -> bool {
    WHITESPACED_OPTION.is_match(argument)
}
