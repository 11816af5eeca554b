//! Display labels derived from a candidate's name
//!
//! Names are split on single spaces. Only the first two tokens are used, and
//! a missing token contributes an empty string rather than an error.

fn tokens(name: &str) -> (&str, &str) {
    let mut parts = name.split(' ');
    let first = parts.next().unwrap_or("");
    let second = parts.next().unwrap_or("");
    (first, second)
}

fn initial(token: &str) -> String {
    token.chars().next().map(String::from).unwrap_or_default()
}

/// Column label: first initial, a dot, second initial (`"Ada Lovelace"` → `"A.L"`).
pub fn initials_label(name: &str) -> String {
    let (first, second) = tokens(name);
    format!("{}.{}", initial(first), initial(second))
}

/// First name plus the initial of the second token (`"Ada Lovelace"` → `"Ada L"`).
pub fn short_name(name: &str) -> String {
    let (first, second) = tokens(name);
    format!("{} {}", first, initial(second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_label() {
        assert_eq!(initials_label("Ada Lovelace"), "A.L");
        assert_eq!(initials_label("Grace Brewster Hopper"), "G.B");
    }

    #[test]
    fn test_initials_label_single_token() {
        assert_eq!(initials_label("Madonna"), "M.");
        assert_eq!(initials_label(""), ".");
    }

    #[test]
    fn test_initials_label_unicode() {
        assert_eq!(initials_label("Émile Zola"), "É.Z");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Ada Lovelace"), "Ada L");
        assert_eq!(short_name("Madonna"), "Madonna ");
    }

    #[test]
    fn test_double_space_yields_empty_second_token() {
        assert_eq!(initials_label("Ada  Lovelace"), "A.");
    }
}
