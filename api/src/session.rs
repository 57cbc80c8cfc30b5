use axum::body::Bytes;
use serde::Serialize;

use crate::app::AppState;
use crate::error::AppResult;
use crate::model::{now_timestamp, PredictionRecord, ScoredPrediction};
use crate::upload::{self, UploadSummary};

#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub timestamp: String,
    pub upload: UploadSummary,
    pub predictions: Vec<ScoredPrediction>,
    pub history: Vec<PredictionRecord>,
    pub total_records: i64,
}

pub async fn run(state: &AppState, file_name: &str, image: Bytes) -> AppResult<SessionOutcome> {
    let upload = {
        let file_name = file_name.to_string();
        let image = image.clone();
        tokio::task::spawn_blocking(move || upload::decode(&file_name, &image)).await??
    };
    tracing::info!(
        file = %upload.file_name,
        width = upload.width,
        height = upload.height,
        "analyzing upload"
    );

    tokio::time::sleep(state.config.analysis_delay).await;
    let predictions = state.scorer.score(&image)?;

    let timestamp = now_timestamp();
    let records: Vec<PredictionRecord> = predictions
        .iter()
        .map(|p| p.to_record(&timestamp))
        .collect();
    state.store.append_all(&records).await?;

    let history = state.store.recent(state.config.history_limit).await?;
    let total_records = state.store.count().await?;
    if let Some(top) = predictions.first() {
        tracing::info!(
            top = %top.breed.name,
            confidence = top.confidence,
            "session complete"
        );
    }

    Ok(SessionOutcome {
        timestamp,
        upload,
        predictions,
        history,
        total_records,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::error::AppError;
    use crate::upload::sample_png;

    async fn state(dir: &TempDir) -> AppState {
        let config = Config {
            database_url: format!("sqlite://{}", dir.path().join("p.db").display()),
            analysis_delay: Duration::ZERO,
            ..Config::default()
        };
        AppState::new(config, Arc::new(Catalog::builtin()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn session_persists_three_records_with_one_timestamp() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let outcome = run(&state, "dog.png", sample_png(8, 8).into()).await.unwrap();

        assert_eq!(outcome.predictions.len(), 3);
        assert_eq!(outcome.history.len(), 3);
        assert!(outcome.history.iter().all(|r| r.timestamp == outcome.timestamp));

        let stored: Vec<_> = outcome.history.iter().map(|r| &r.breed_name).collect();
        for p in &outcome.predictions {
            assert!(stored.contains(&&p.breed.name));
        }
    }

    #[tokio::test]
    async fn history_is_capped() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir).await;
        state.config = Arc::new(Config {
            history_limit: 4,
            ..(*state.config).clone()
        });

        for _ in 0..3 {
            run(&state, "dog.png", sample_png(8, 8).into()).await.unwrap();
        }
        let outcome = run(&state, "dog.png", sample_png(8, 8).into()).await.unwrap();
        assert_eq!(outcome.history.len(), 4);
        assert_eq!(outcome.total_records, 12);
    }

    #[tokio::test]
    async fn malformed_upload_stores_nothing() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let err = run(&state, "dog.jpg", Bytes::from_static(b"garbage")).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedImage(_)));
        assert_eq!(state.store.count().await.unwrap(), 0);
    }
}
