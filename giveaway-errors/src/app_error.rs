use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Aucune publication sélectionnée")]
    EmptySelection,

    #[error("Nombre de gagnants invalide: {0}")]
    InvalidWinnerCount(String),

    #[error("Filtre invalide: {0}")]
    InvalidFilter(String),

    #[error("Requête invalide: {0}")]
    InvalidRequest(String),

    #[error("Erreur du service: {0}")]
    Service(String),

    #[error("Erreur de la plateforme: {0}")]
    Upstream(String),

    #[error("Erreur réseau: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Trop de requêtes: {0}")]
    RateLimited(String),

    #[error("Configuration manquante: {0}")]
    NotConfigured(String),

    #[error("Erreur interne: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::EmptySelection => "Veuillez sélectionner au moins une publication.",
            Self::InvalidWinnerCount(_) => "Le nombre de gagnants doit être un entier positif.",
            Self::InvalidFilter(_) => "Un des filtres est invalide. Vérifiez le formulaire.",
            Self::InvalidRequest(_) => "La demande de tirage est invalide.",
            Self::Service(msg) | Self::Upstream(msg) | Self::RateLimited(msg) => msg,
            Self::Network(_) => "Impossible de joindre le serveur. Réessayez.",
            Self::Timeout => "Le serveur met trop de temps à répondre. Réessayez.",
            Self::NotConfigured(_) => "Le mode live n'est pas configuré sur ce serveur.",
            Self::Internal(_) => "Une erreur est survenue. Réessayez plus tard.",
        }
    }

    /// Validation failures are caught before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection
                | Self::InvalidWinnerCount(_)
                | Self::InvalidFilter(_)
                | Self::InvalidRequest(_)
        )
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        error: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::EmptySelection
                | AppError::InvalidWinnerCount(_)
                | AppError::InvalidFilter(_)
                | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                AppError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AppError::Upstream(_) | AppError::Network(_) => StatusCode::BAD_GATEWAY,
                AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let error = match &self {
                AppError::InvalidWinnerCount(msg)
                | AppError::InvalidFilter(msg)
                | AppError::InvalidRequest(msg) => msg.clone(),
                other => other.user_message().to_string(),
            };
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(AppError::EmptySelection.is_validation());
        assert!(AppError::InvalidWinnerCount("abc".into()).is_validation());
        assert!(!AppError::Timeout.is_validation());
        assert!(!AppError::Service("down".into()).is_validation());
    }

    #[test]
    fn test_service_messages_pass_through() {
        let err = AppError::Service("Publication introuvable".into());
        assert_eq!(err.user_message(), "Publication introuvable");
        assert_eq!(
            AppError::EmptySelection.user_message(),
            "Veuillez sélectionner au moins une publication."
        );
    }

    #[test]
    fn test_serde_roundtrip_keeps_variant() {
        let json = serde_json::to_string(&AppError::Timeout).unwrap();
        let back: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AppError::Timeout);
    }
}
