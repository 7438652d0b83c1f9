use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::foods::dto::NewFood;
use crate::foods::repo;

/// Outcome of a catalog import, echoed to the client.
#[derive(Debug, serde::Serialize)]
pub struct ImportSummary {
    pub imported: usize,
}

/// Parse an uploaded CSV catalog and insert every row in one transaction.
///
/// Expected header: `description,servingSize,carbohydrates,protein,totalFat,calories`.
/// Any malformed or invalid row aborts the whole import; partial catalogs
/// are never written.
pub async fn import_csv(db: &PgPool, user_id: Uuid, data: &[u8]) -> Result<ImportSummary, ImportError> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows: Vec<NewFood> = Vec::new();

    for (idx, record) in reader.deserialize::<NewFood>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let food = record.map_err(|e| ImportError::Malformed {
            line,
            reason: e.to_string(),
        })?;
        food.validate().map_err(|reason| ImportError::Invalid { line, reason })?;
        rows.push(food);
    }

    if rows.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut tx = db.begin().await.map_err(|e| ImportError::Db(e.into()))?;
    for food in &rows {
        repo::create_in_tx(&mut tx, user_id, food)
            .await
            .map_err(ImportError::Db)?;
    }
    tx.commit().await.map_err(|e| ImportError::Db(e.into()))?;

    info!(user_id = %user_id, imported = rows.len(), "food catalog imported");
    Ok(ImportSummary {
        imported: rows.len(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("file contains no food rows")]
    Empty,
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: {reason}")]
    Invalid { line: usize, reason: String },
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<Vec<NewFood>, ImportError> {
        let mut reader = csv::Reader::from_reader(data);
        let mut rows = Vec::new();
        for (idx, record) in reader.deserialize::<NewFood>().enumerate() {
            let line = idx + 2;
            let food: NewFood = record.map_err(|e| ImportError::Malformed {
                line,
                reason: e.to_string(),
            })?;
            food.validate()
                .map_err(|reason| ImportError::Invalid { line, reason })?;
            rows.push(food);
        }
        Ok(rows)
    }

    #[test]
    fn parses_well_formed_catalog() {
        let csv = b"description,servingSize,carbohydrates,protein,totalFat,calories\n\
                    Oats,100,66,17,7,389\n\
                    Rice,100,28,2.7,0.3,130\n";
        let rows = parse(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Oats");
        assert_eq!(rows[1].calories, 130.0);
    }

    #[test]
    fn reports_line_of_malformed_row() {
        let csv = b"description,servingSize,carbohydrates,protein,totalFat,calories\n\
                    Oats,100,66,17,7,389\n\
                    Rice,not-a-number,28,2.7,0.3,130\n";
        match parse(csv) {
            Err(ImportError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn reports_line_of_invalid_row() {
        let csv = b"description,servingSize,carbohydrates,protein,totalFat,calories\n\
                    Oats,0,66,17,7,389\n";
        match parse(csv) {
            Err(ImportError::Invalid { line, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "servingSize must be positive");
            }
            other => panic!("expected invalid error, got {other:?}"),
        }
    }
}
