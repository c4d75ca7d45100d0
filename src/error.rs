/// Failure of a snapshot read.
///
/// Any single failed read aborts the whole snapshot; the message of the
/// underlying client error is carried through unchanged so entry points can
/// surface it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The endpoint could not be reached, timed out, or the transport failed.
    #[error("provider error during {operation}: {message}")]
    Provider { operation: String, message: String },

    /// A view call reverted or its return data could not be decoded.
    #[error("contract call {function}() failed: {message}")]
    ContractCall { function: String, message: String },
}

impl SnapshotError {
    pub fn provider(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        SnapshotError::Provider {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn contract_call(function: impl Into<String>, message: impl std::fmt::Display) -> Self {
        SnapshotError::ContractCall {
            function: function.into(),
            message: message.to_string(),
        }
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, SnapshotError::Provider { .. })
    }

    pub fn is_contract_call(&self) -> bool {
        matches!(self, SnapshotError::ContractCall { .. })
    }
}
