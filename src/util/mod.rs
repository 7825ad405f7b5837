/// Quotes a value the way a shell would need it: bare when it is a single
/// plain word, otherwise wrapped in double quotes with `"` and `\` escaped.
pub fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'');

    if needs_quotes {
        force_quote(value)
    } else {
        value.to_string()
    }
}

/// Always wraps the value in double quotes, escaping `"` and `\`.
pub fn force_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Lexically normalizes a `/` separated path: repeated separators and `.`
/// segments are collapsed and `..` consumes the preceding segment. An empty
/// result becomes `.`. Exactly two leading separators stay as they are.
/// The filesystem is never touched.
pub fn normalize_path(path: &str) -> String {
    let is_absolute = path.starts_with('/');
    let root = if path.starts_with("//") && !path.starts_with("///") {
        "//"
    } else if is_absolute {
        "/"
    } else {
        ""
    };
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                // `/..` is still `/`
                _ if is_absolute => {}
                _ => segments.push(".."),
            },
            segment => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("{root}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
