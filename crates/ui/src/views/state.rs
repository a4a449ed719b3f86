use revise_core::model::ValidationError;
use services::{ApiError, ClientError};

/// What the UI can tell the user about a failed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotConfigured,
    InvalidInput(String),
    Service(String),
    BadQuiz,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::NotConfigured => {
                "No API key is configured. Set REVISE_AI_API_KEY and restart.".to_string()
            }
            ViewError::InvalidInput(detail) => detail.clone(),
            ViewError::Service(detail) => format!("The AI service could not answer: {detail}"),
            ViewError::BadQuiz => {
                "The AI service returned a quiz we could not read. Please try again.".to_string()
            }
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyText => "Enter some text to study first.".to_string(),
        ValidationError::EmptySummary => "There is no summary to build a quiz from.".to_string(),
        other => {
            let text = other.to_string();
            let mut chars = text.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
    }
}

impl From<&ClientError> for ViewError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Configuration(_) => ViewError::NotConfigured,
            ClientError::Validation(err) => ViewError::InvalidInput(validation_message(err)),
            ClientError::Api(ApiError::Status { status, .. }) => {
                ViewError::Service(format!("request failed with status {status}"))
            }
            ClientError::Api(ApiError::Transport(_)) => {
                ViewError::Service("the network request failed".to_string())
            }
            ClientError::Api(ApiError::InvalidBody { .. }) => {
                ViewError::Service("the reply was not valid JSON".to_string())
            }
            ClientError::Api(_) => ViewError::Service("the reply was empty".to_string()),
            ClientError::MalformedResponse(_) => ViewError::BadQuiz,
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revise_core::normalize::MalformedResponseError;
    use services::ConfigurationError;

    #[test]
    fn client_errors_map_to_user_messages() {
        let err = ClientError::from(ConfigurationError::MissingApiKey);
        assert_eq!(ViewError::from(&err), ViewError::NotConfigured);

        let err = ClientError::from(ValidationError::EmptyText);
        assert_eq!(
            ViewError::from(&err).message(),
            "Enter some text to study first."
        );

        let err = ClientError::from(MalformedResponseError::NoJsonFound);
        assert_eq!(ViewError::from(&err), ViewError::BadQuiz);

        let err = ClientError::from(ApiError::Status {
            status: services::StatusCode::UNAUTHORIZED,
            body: String::new(),
        });
        assert!(ViewError::from(&err).message().contains("401"));
    }
}
