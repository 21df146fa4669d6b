//! Owner checks for fetched records.
//!
//! Read paths scope their queries by owner, so a foreign record looks like a
//! missing one. Update and delete paths fetch by raw id first and then call
//! [`ensure_owner`], which is what distinguishes "not yours" (403) from
//! "does not exist" (404) on mutation.

use uuid::Uuid;

use vault_core::error::AppError;

/// Fails with an authorization error unless `user_id` owns the record.
pub fn ensure_owner(owner_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    if owner_id != user_id {
        return Err(AppError::authorization(
            "You do not have permission to access this resource",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::error::ErrorKind;

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert!(ensure_owner(id, id).is_ok());
    }

    #[test]
    fn non_owner_is_rejected() {
        let err = ensure_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
