//! Explicit transaction scope for service operations
//!
//! A service opens a transaction with [`begin`], routes every repository call
//! through it, and hands the outcome to [`finish`], which commits on success
//! and rolls back on failure. If a panic unwinds past the handle, SeaORM rolls
//! it back on drop.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::domain::DomainError;

pub async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, DomainError> {
    db.begin()
        .await
        .map_err(|e| DomainError::TransactionFailure(format!("begin failed: {}", e)))
}

pub async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            txn.commit()
                .await
                .map_err(|e| DomainError::TransactionFailure(format!("commit failed: {}", e)))?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!("Rolling back: {}", err);
            if let Err(rollback_err) = txn.rollback().await {
                // the original error is what the caller needs to see
                tracing::error!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewStudent, StudentRepository};
    use crate::infrastructure::db::init_db;
    use crate::infrastructure::repositories::SeaOrmStudentRepository;

    #[tokio::test]
    async fn test_finish_commits_on_success() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let repo = SeaOrmStudentRepository::new();

        let txn = begin(&db).await.unwrap();
        let result = repo.save(&txn, NewStudent::new("Ada", None, None)).await;
        let saved = finish(txn, result).await.unwrap();

        assert!(repo.find_by_id(&db, saved.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_finish_rolls_back_on_error() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        let repo = SeaOrmStudentRepository::new();

        let txn = begin(&db).await.unwrap();
        let saved = repo
            .save(&txn, NewStudent::new("Ada", None, None))
            .await
            .unwrap();
        let outcome: Result<(), DomainError> =
            finish(txn, Err(DomainError::Validation("later step failed".into()))).await;

        assert!(matches!(outcome, Err(DomainError::Validation(_))));
        assert!(repo.find_by_id(&db, saved.id).await.unwrap().is_none());
    }
}
