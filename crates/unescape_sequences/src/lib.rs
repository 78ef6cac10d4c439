// crates/unescape_sequences/src/lib.rs

/// Converts the backslash escapes a shell user can type (`\n`, `\r`, `\t`
/// and `\\`) into the characters they stand for.
///
/// Any other backslash sequence, including a lone trailing backslash, is
/// copied through unchanged so that text such as `C:\dir` or a regex literal
/// survives intact.
pub fn unescape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}
