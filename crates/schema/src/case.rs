//! Name case conversion
//!
//! `_` is inserted at camel-case boundaries (`userId`, `HTTPServer`) and in
//! place of `-` and whitespace. Underscores already present are never
//! dropped, so a name that is snake_case comes back unchanged.

/// `userId` / `User Id` / `user-id` -> `user_id`
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c.is_whitespace() {
            out.push('_');
            continue;
        }

        if c.is_uppercase() && i > 0 && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }
    out
}

/// `user_id` -> `userId`
///
/// Only a single `_` between two alphanumerics is a word break. Leading,
/// trailing and repeated underscores are kept.
pub fn to_camel_case(name: &str) -> String {
    let snake: Vec<char> = to_snake_case(name).chars().collect();
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;

    for (i, &c) in snake.iter().enumerate() {
        let is_break = c == '_'
            && i > 0
            && snake[i - 1].is_alphanumeric()
            && snake.get(i + 1).is_some_and(|n| n.is_alphanumeric());
        if is_break {
            upper_next = true;
            continue;
        }

        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `order_items` -> `OrderItems`
pub fn to_pascal_case(name: &str) -> String {
    let camel = to_camel_case(name);
    let body = camel.trim_start_matches('_');
    let prefix = &camel[..camel.len() - body.len()];

    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
