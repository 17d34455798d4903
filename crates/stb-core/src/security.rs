use crate::domain::UserId;

/// Admin allow-list check for admin-only commands.
///
/// Messages without a sender are denied, and an empty list denies everyone.
pub fn is_admin(user_id: Option<UserId>, admin_ids: &[i64]) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    if admin_ids.is_empty() {
        return false;
    }
    admin_ids.contains(&user_id.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_is_admin() {
        assert!(is_admin(Some(UserId(111)), &[111, 222]));
    }

    #[test]
    fn non_member_is_not_admin() {
        assert!(!is_admin(Some(UserId(333)), &[111, 222]));
    }

    #[test]
    fn missing_sender_is_denied() {
        assert!(!is_admin(None, &[111]));
    }

    #[test]
    fn empty_list_denies_everyone() {
        assert!(!is_admin(Some(UserId(111)), &[]));
    }
}
