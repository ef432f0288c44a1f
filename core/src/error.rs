/// Coarse class of an entry-point result, mirroring HTTP status classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// Representative status code of the class.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::ClientError => 400,
            Self::ServerError => 500,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// The evaluation id does not resolve in the record store.
    /// Nothing has been mutated when this is returned.
    #[error("The evaluation '{0}' doesn't exist")]
    UnknownEvaluation(String),

    /// The evaluation references a problem that does not exist. Every
    /// evaluation must point at an existing problem, so this signals upstream
    /// data corruption, not a normal not-found.
    #[error("Evaluation '{evaluation_id}' references nonexistent problem '{problem_id}'")]
    DanglingProblemReference {
        evaluation_id: String,
        problem_id: String,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl EvaluateError {
    pub fn status_class(&self) -> StatusClass {
        match self {
            Self::UnknownEvaluation(_) => StatusClass::ClientError,
            Self::DanglingProblemReference { .. } | Self::Internal(_) => StatusClass::ServerError,
        }
    }
}

impl From<fsutil::Error> for EvaluateError {
    fn from(e: fsutil::Error) -> Self {
        Self::Internal(e.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_classes_map_to_status_codes() {
        let unknown = EvaluateError::UnknownEvaluation("1".into());
        assert_eq!(unknown.status_class(), StatusClass::ClientError);
        assert_eq!(unknown.status_class().status_code(), 400);

        let dangling = EvaluateError::DanglingProblemReference {
            evaluation_id: "1".into(),
            problem_id: "2".into(),
        };
        assert_eq!(dangling.status_class(), StatusClass::ServerError);
        assert_eq!(dangling.status_class().status_code(), 500);

        assert_eq!(StatusClass::Success.status_code(), 200);
    }
}
