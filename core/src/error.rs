use thiserror::Error;

use crate::overlay::OverlayError;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("Shared store is detached (suite '{suite}')")]
    StoreDetached { suite: String },

    #[error("Engine has been shut down")]
    EngineClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PetResult<T> = Result<T, PetError>;
