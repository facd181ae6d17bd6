/// Splitting for Set-Cookie header values as surfaced by the DevTools
/// protocol, which folds repeated headers into a single value joined
/// by newlines (newer Chrome) or commas (older). Commas inside
/// attribute values such as `Expires=Wed, 21-Oct-2026 ...` must not
/// start a new directive.

/// Split a folded Set-Cookie header value into individual directives.
///
/// A comma starts a new directive only when it is followed (after
/// optional whitespace) by a cookie name token and `=`.
pub fn split_set_cookie_header(header: &str) -> Vec<String> {
    let mut directives = Vec::new();
    for line in header.split('\n') {
        let mut start = 0;
        for (i, b) in line.bytes().enumerate() {
            if b == b',' && starts_new_directive(&line[i + 1..]) {
                push_directive(&mut directives, &line[start..i]);
                start = i + 1;
            }
        }
        push_directive(&mut directives, &line[start..]);
    }
    directives
}

/// Extract the cookie name from a single directive: the trimmed text
/// before the first `=`, or None when that is empty.
pub fn directive_name(directive: &str) -> Option<String> {
    let name = directive.split('=').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn push_directive(directives: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        directives.push(trimmed.to_string());
    }
}

/// True when the text after a comma begins with `token=`, where the
/// token contains no whitespace, `;`, `,` or `=`. Date values like
/// `21-Oct-2026 07:28:00 GMT` fail this because of the spaces.
fn starts_new_directive(rest: &str) -> bool {
    let mut saw_token = false;
    for c in rest.trim_start().chars() {
        match c {
            '=' => return saw_token,
            ';' | ',' => return false,
            c if c.is_whitespace() => return false,
            _ => saw_token = true,
        }
    }
    false
}
