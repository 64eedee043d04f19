use tendril_core::{TendrilError, TendrilResult};

/// Turn a resource token into a type name: `blog_post` -> `BlogPost`.
///
/// `_` and `-` separate words; each word gets its first character
/// upper-cased and keeps the rest untouched. Nothing is pluralised or
/// singularised.
pub fn classify(name: &str) -> String {
    name.split(['_', '-'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Check that `name` can be used both as a path segment and as an
/// identifier fragment. `kind` only feeds the error message.
pub fn validate_name(kind: &str, name: &str) -> TendrilResult<()> {
    let Some(first) = name.chars().next() else {
        return Err(TendrilError::Validation(format!("{} name must not be empty", kind)));
    };

    if first.is_ascii_digit() {
        return Err(TendrilError::Validation(format!(
            "Invalid {} name: {}. It must not start with a digit",
            kind, name
        )));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(TendrilError::Validation(format!(
            "Invalid {} name: {}. Unexpected character '{}'",
            kind, name, bad
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("user"), "User");
        assert_eq!(classify("dashboard"), "Dashboard");
        assert_eq!(classify("blog_post"), "BlogPost");
        assert_eq!(classify("line-item"), "LineItem");
        assert_eq!(classify("apiKey"), "ApiKey");
    }

    #[test]
    fn test_classify_ignores_repeated_separators() {
        assert_eq!(classify("user__profile"), "UserProfile");
        assert_eq!(classify("_user"), "User");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("resource", "user").is_ok());
        assert!(validate_name("resource", "blog_post").is_ok());
        assert!(validate_name("resource", "line-item").is_ok());

        assert!(validate_name("resource", "").is_err());
        assert!(validate_name("resource", "1user").is_err());
        assert!(validate_name("resource", "users/admin").is_err());
        assert!(validate_name("resource", "user name").is_err());
    }
}
