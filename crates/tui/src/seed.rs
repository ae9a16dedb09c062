use std::fs;

use pfm_engine::Transaction;

use crate::error::Result;

/// Reads the initial transactions from a JSON array.
///
/// No path, or a path that does not exist, yields the built-in sample.
pub fn load(path: Option<&str>) -> Result<Vec<Transaction>> {
    let Some(path) = path else {
        return Ok(pfm_engine::default_seed());
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path, "seed file not found, using the built-in sample");
            return Ok(pfm_engine::default_seed());
        }
        Err(err) => return Err(err.into()),
    };

    let seed: Vec<Transaction> = serde_json::from_str(&content)?;
    tracing::info!(path, transactions = seed.len(), "seed loaded");
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pfm_engine::{Amount, TransactionId, TransactionKind};

    use super::*;
    use crate::error::AppError;

    fn seed_path(name: &str) -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_seeds");
        fs::create_dir_all(&root).unwrap();
        root.join(name)
    }

    #[test]
    fn no_path_uses_sample() {
        assert_eq!(load(None).unwrap(), pfm_engine::default_seed());
    }

    #[test]
    fn missing_file_uses_sample() {
        let path = seed_path("missing.json");
        let _ = fs::remove_file(&path);

        assert_eq!(
            load(path.to_str()).unwrap(),
            pfm_engine::default_seed()
        );
    }

    #[test]
    fn reads_records_in_file_order() {
        let path = seed_path("two_records.json");
        fs::write(
            &path,
            r#"[
                {"id": 5, "date": "2023-05-01", "amount": 1200, "type": "Income", "category": "Salary"},
                {"id": 3, "amount": "9,99", "type": "Expense"}
            ]"#,
        )
        .unwrap();

        let seed = load(path.to_str()).unwrap();

        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, TransactionId::new(5));
        assert_eq!(seed[0].amount(), Some(Amount::from_whole(1200)));
        assert_eq!(seed[1].id, TransactionId::new(3));
        assert_eq!(seed[1].amount(), Some(Amount::new(999)));
        assert_eq!(seed[1].kind(), Some(TransactionKind::Expense));
        assert_eq!(seed[1].category(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = seed_path("malformed.json");
        fs::write(&path, r#"[{"id": 1, "type": "Refund"}]"#).unwrap();

        assert!(matches!(load(path.to_str()), Err(AppError::Json(_))));
    }
}
