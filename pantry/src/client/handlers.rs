use tracing::Instrument;

use crate::state::SharedState;

use super::{Client, ClientRequest};

/// starts the client's request handler
pub async fn start_client_handler(
    state: SharedState,
    client: Client,
    client_sub: flume::Receiver<ClientRequest>,
) {
    while let Ok(request) = client_sub.recv_async().await {
        let state = state.clone();
        let client = client.clone();
        let span = tracing::info_span!("client_request", request = ?request);

        tokio::task::spawn(
            async move {
                client.handle_request(&state, request).await;
            }
            .instrument(span),
        );
    }
}
