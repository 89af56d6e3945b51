//! AI actor for async processing of generation requests

use tokio::sync::mpsc;

use super::TextGenerator;
use super::dispatcher::{Dispatcher, GenerationRequest};
use super::error::GenerationResult;

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Generate a reply; the id comes back on the matching event
    Generate {
        request_id: u64,
        request: GenerationRequest,
    },
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the AI actor
#[derive(Debug, Clone)]
pub enum AiEvent {
    Generated {
        request_id: u64,
        result: GenerationResult,
    },
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task. Commands are handled one at a time.
pub fn spawn_ai_actor<A, B>(dispatcher: Dispatcher<A, B>) -> AiActorHandle
where
    A: TextGenerator + 'static,
    B: TextGenerator + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(32);

    tokio::spawn(ai_actor_loop(dispatcher, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop<A, B>(
    dispatcher: Dispatcher<A, B>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) where
    A: TextGenerator,
    B: TextGenerator,
{
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AiCommand::Generate {
                request_id,
                request,
            } => {
                let result = dispatcher.generate_response(&request).await;
                if event_tx
                    .send(AiEvent::Generated { request_id, result })
                    .await
                    .is_err()
                {
                    tracing::warn!("AI actor: event receiver dropped");
                    break;
                }
            }

            AiCommand::Shutdown => {
                tracing::debug!("AI actor shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::dispatcher::tests::FakeGenerator;
    use crate::ai::error::GenerationError;

    #[tokio::test]
    async fn test_generate_round_trip_keeps_request_id() {
        let bedrock = FakeGenerator::replying(Ok("titan says hi".to_string()));
        let chat = FakeGenerator::replying(Ok("chat says hi".to_string()));
        let mut handle = spawn_ai_actor(Dispatcher::new(bedrock.clone(), chat.clone()));

        handle
            .cmd_tx
            .send(AiCommand::Generate {
                request_id: 7,
                request: GenerationRequest::new("Hello", "DeepSeek V3", "Professional"),
            })
            .await
            .unwrap();
        handle
            .cmd_tx
            .send(AiCommand::Generate {
                request_id: 8,
                request: GenerationRequest::new("  ", "DeepSeek V3", "Professional"),
            })
            .await
            .unwrap();

        let AiEvent::Generated { request_id, result } = handle.event_rx.recv().await.unwrap();
        assert_eq!(request_id, 7);
        assert_eq!(result, Ok("chat says hi".to_string()));

        let AiEvent::Generated { request_id, result } = handle.event_rx.recv().await.unwrap();
        assert_eq!(request_id, 8);
        assert_eq!(result, Err(GenerationError::EmptyInput));

        assert_eq!(chat.call_count(), 1);
        assert_eq!(bedrock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_closes_event_channel() {
        let fake = FakeGenerator::replying(Ok(String::new()));
        let mut handle = spawn_ai_actor(Dispatcher::new(fake.clone(), fake));

        handle.cmd_tx.send(AiCommand::Shutdown).await.unwrap();
        assert!(handle.event_rx.recv().await.is_none());
    }
}
