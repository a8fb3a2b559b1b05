//! Credential Check

use platform::password::verify_password;

use crate::domain::entity::user::UserRecord;

/// True only when a record exists and its stored hash matches `plain`.
pub fn authenticate(user: Option<&UserRecord>, plain: &str) -> bool {
    match user {
        Some(user) => verify_password(plain, &user.hashed_password),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;
    use chrono::NaiveDate;
    use platform::password::hash_password;

    fn user_with_password(plain: &str) -> UserRecord {
        UserRecord::new(
            Email::new("a@x.com").unwrap(),
            "Ada",
            hash_password(plain).unwrap().into_phc_string(),
            36,
            NaiveDate::from_ymd_opt(1989, 12, 10).unwrap(),
        )
    }

    #[test]
    fn test_no_record() {
        assert!(!authenticate(None, "anything"));
    }

    #[test]
    fn test_matching_password() {
        let user = user_with_password("s3cret-pass");
        assert!(authenticate(Some(&user), "s3cret-pass"));
        assert!(!authenticate(Some(&user), "wrong-pass"));
    }

    #[test]
    fn test_corrupt_hash_is_a_mismatch() {
        let mut user = user_with_password("s3cret-pass");
        user.hashed_password = "not-a-phc-string".to_string();
        assert!(!authenticate(Some(&user), "s3cret-pass"));
    }
}
