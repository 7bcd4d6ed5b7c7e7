//! Naming-convention predicates.
//!
//! All predicates look at ASCII letters only and treat the empty string as
//! conforming.

/// Returns true if `name` starts with an uppercase letter and has no `_`.
#[must_use]
pub fn is_upper_camel_case(name: &str) -> bool {
    name.bytes().next().map_or(true, |b| b.is_ascii_uppercase()) && !name.contains('_')
}

/// Returns true if `name` starts with a lowercase letter and has no `_`.
#[must_use]
pub fn is_lower_camel_case(name: &str) -> bool {
    name.bytes().next().map_or(true, |b| b.is_ascii_lowercase()) && !name.contains('_')
}

/// Returns true if `name` has no lowercase letters.
#[must_use]
pub fn is_all_caps(name: &str) -> bool {
    !name.bytes().any(|b| b.is_ascii_lowercase())
}

/// Returns true if `name` has no lowercase letters.
#[must_use]
pub fn is_caps_snake_case(name: &str) -> bool {
    is_all_caps(name)
}

/// Returns true if `name` has no uppercase letters.
#[must_use]
pub fn is_lower_snake_case(name: &str) -> bool {
    !name.bytes().any(|b| b.is_ascii_uppercase())
}

/// Returns true if a keyword is spelled in the configured case.
#[must_use]
pub fn has_keyword_case(word: &str, upper: bool) -> bool {
    if upper {
        is_all_caps(word)
    } else {
        is_lower_snake_case(word)
    }
}

const HEADER_LAST_WORDS: [&str; 8] = [
    "FUNCTION", "EXISTS", "TABLE", "TYPE", "VIEW", "=", "PROTO", "MODULE",
];

/// Returns true if `line` is a one-line `CREATE ...` or `IMPORT ...` header.
///
/// Such a line starts with `CREATE` or `IMPORT`, reaches one of `FUNCTION`,
/// `EXISTS`, `TABLE`, `TYPE`, `VIEW`, `PROTO`, `MODULE` or `=`, and then has
/// at most one more word (none after `=`). Long names in these headers
/// cannot be wrapped, so line-length does not apply to them.
#[must_use]
pub fn is_one_line_statement(line: &str) -> bool {
    let mut words = line.split(' ').filter(|w| !w.is_empty());

    match words.next() {
        Some(first) if first.eq_ignore_ascii_case("CREATE") || first.eq_ignore_ascii_case("IMPORT") => {}
        _ => return false,
    }

    let mut last = false;
    let mut finish = false;
    for word in words {
        if finish {
            return false;
        }
        if last {
            finish = true;
            continue;
        }
        let upper = word.to_ascii_uppercase();
        if HEADER_LAST_WORDS.contains(&upper.as_str()) {
            last = true;
            finish = upper == "=";
        }
    }
    true
}
