use std::borrow::Cow;

/// Collapse any number of leading repetitions of `prefix` in `key` to a
/// single one. Keys without the prefix are returned unchanged.
///
/// `squash_prefix(".", "...a")` is `".a"`.
pub fn squash_prefix<'a>(prefix: &str, key: &'a str) -> Cow<'a, str> {
    if prefix.is_empty() {
        return Cow::Borrowed(key);
    }
    let mut rest = key;
    let mut count = 0usize;
    while let Some(stripped) = rest.strip_prefix(prefix) {
        rest = stripped;
        count += 1;
    }
    if count <= 1 {
        return Cow::Borrowed(key);
    }
    Cow::Owned(format!("{prefix}{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_squash() {
        assert_eq!(squash_prefix(".", "...a"), ".a");
        assert_eq!(squash_prefix(".", ".a"), ".a");
        assert_eq!(squash_prefix(".", "a"), "a");
        assert_eq!(squash_prefix(".", "a..b"), "a..b");
        assert_eq!(squash_prefix("+", "++x"), "+x");
        assert_eq!(squash_prefix("ab", "ababc"), "abc");
        assert_eq!(squash_prefix("", "key"), "key");
    }

    #[test]
    fn test_squash_borrows_when_unchanged() {
        assert!(matches!(squash_prefix(".", ".a"), Cow::Borrowed(_)));
    }

    proptest! {
        #[test]
        fn squashing_is_idempotent(key in "[.a-z]{0,12}") {
            let once = squash_prefix(".", &key).into_owned();
            let twice = squash_prefix(".", &once).into_owned();
            prop_assert_eq!(&once, &twice);
            prop_assert!(!once.starts_with(".."));
            prop_assert_eq!(once.trim_start_matches('.'), key.trim_start_matches('.'));
        }
    }
}
