//! Classification helpers for value and type text

/// `%local` or `@global` name (quoted forms included)
pub fn is_register(value: &str) -> bool {
    value.len() > 1 && (value.starts_with('%') || value.starts_with('@'))
}

pub fn is_global(value: &str) -> bool {
    value.len() > 1 && value.starts_with('@')
}

/// The name a use of `value` is tracked under: the register itself, or the
/// global a constant expression is built on
/// (`getelementptr inbounds ([4 x i32], ptr @arr, i64 0, i64 1)` is `@arr`).
/// Literals, string constants and metadata track nothing.
pub fn tracked_name(value: &str) -> Option<&str> {
    if is_register(value) {
        return Some(value);
    }
    if value.starts_with("c\"") || value.starts_with('!') {
        return None;
    }
    let mut in_quotes = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '@' if !in_quotes => {
                if let Some(name) = global_at(value, i) {
                    return Some(name);
                }
            }
            _ => {}
        }
    }
    None
}

/// `@name` or `@"quoted name"` starting at byte `start`
fn global_at(value: &str, start: usize) -> Option<&str> {
    let rest = &value[start + 1..];
    let len = match rest.strip_prefix('"') {
        Some(quoted) => quoted.find('"')? + 2,
        None => rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '-')))
            .unwrap_or(rest.len()),
    };
    let name = &value[start..start + 1 + len];
    is_global(name).then_some(name)
}

/// Pointer-typed text: `T*`, `T addrspace(N)*`, `ptr`, `ptr addrspace(N)`
pub fn is_pointer_type(ty: &str) -> bool {
    let ty = ty.trim();
    ty.ends_with('*') || ty == "ptr" || ty.starts_with("ptr ")
}

/// Normalize a block label (`5`, `entry`, `"a b"`) to its register form (`%5`)
pub fn label_register(label: &str) -> String {
    if label.starts_with('%') {
        label.to_string()
    } else {
        format!("%{label}")
    }
}

/// Does an attribute list carry `name`, bare or with an argument?
pub fn has_attribute(attributes: &[String], name: &str) -> bool {
    attributes.iter().any(|attribute| {
        attribute == name
            || attribute
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('(') || rest.starts_with(' '))
    })
}
