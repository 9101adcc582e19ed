//! Quoting engine and command synthesizer.
//!
//! The quoting policy targets copy/paste reproduction, not execution: a token
//! is wrapped in double quotes only when it contains whitespace or a double
//! quote, and embedded double quotes are backslash-escaped. Other shell
//! metacharacters pass through untouched.
//!
//! A POSIX shell splits the output back into the original tokens only when
//! no token contains `'` or `\`. Those characters are left as-is, so `it's`
//! leaves an open quote and `C:\dir` loses its backslash.

use std::borrow::Cow;

/// Quote a single token for display.
pub fn quote(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("\"\"");
    }
    if token.chars().any(|c| c.is_whitespace() || c == '"') {
        Cow::Owned(format!("\"{}\"", token.replace('"', "\\\"")))
    } else {
        Cow::Borrowed(token)
    }
}

/// Join a binary name and its tokens into one command line.
///
/// The binary is never quoted; tokens are separated by a single space.
pub fn synthesize(binary: &str, tokens: &[String]) -> String {
    let mut command = String::with_capacity(
        binary.len() + tokens.iter().map(|t| t.len() + 3).sum::<usize>(),
    );
    command.push_str(binary);
    for token in tokens {
        command.push(' ');
        command.push_str(&quote(token));
    }
    command
}
