/*!
 * Generation-service clients.
 *
 * Every pipeline stage that needs linguistic work delegates it through the
 * narrow `GenerationClient` contract defined here:
 * - `openai`: OpenAI-compatible chat completions client
 * - `mock`: Scripted clients for testing
 */

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::model::StageId;

/// A prompt context sent to the generation service on behalf of a stage
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The stage this request belongs to
    pub stage: StageId,

    /// System prompt establishing the stage's role
    pub system_prompt: String,

    /// User prompt carrying the text and upstream context
    pub user_prompt: String,
}

/// A successful response from the generation service
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Raw response content; stages parse this into their typed payload
    pub content: String,
}

/// Contract between the pipeline and the external generation service.
///
/// The orchestrator treats the service as opaque: success must return
/// content the stage can parse against its payload schema, and failure must
/// be distinguishable from success.
#[async_trait]
pub trait GenerationClient: Send + Sync + Debug {
    /// Send a stage's prompt context and return the raw response
    ///
    /// # Arguments
    /// * `request` - The prompt context to complete
    ///
    /// # Returns
    /// * `Result<GenerationResponse, ProviderError>` - The response or an error
    async fn invoke(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is usable
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Process-wide client handle, initialized once and shared immutably.
static SHARED_CLIENT: OnceCell<Arc<dyn GenerationClient>> = OnceCell::new();

/// Install the process-wide generation client. Returns an error if a client
/// has already been installed.
pub fn init_shared_client(client: Arc<dyn GenerationClient>) -> Result<(), ProviderError> {
    SHARED_CLIENT.set(client).map_err(|_| {
        ProviderError::RequestFailed("shared generation client already initialized".to_string())
    })
}

/// The process-wide generation client, if one has been installed.
///
/// Orchestrators take an injected handle; this accessor exists for callers
/// that want a single client for the lifetime of the process.
pub fn shared_client() -> Option<Arc<dyn GenerationClient>> {
    SHARED_CLIENT.get().cloned()
}

pub mod mock;
pub mod openai;
