use std::sync::Arc;

use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    misc::ChatRole,
};
use db::models::chat::ChatMessage;
use limiter::{
    entitlements::Entitlements,
    repository::{PlanRepository, UsageRepository},
};
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::chat::PromptMessage, services::llm::CompletionClient};

pub const SYSTEM_PROMPT: &str = "You are Kitchen Spark AI, a helpful cooking assistant. \
You help users with recipes, cooking tips, meal planning, and food-related questions. \
Be friendly, knowledgeable, and concise. When suggesting recipes, mention ingredients and \
cooking methods. Always prioritize food safety and dietary considerations.";

/// Messages returned by the history endpoint.
pub const HISTORY_LIMIT: i64 = 100;
/// Stored messages sent along with each prompt.
pub const CONTEXT_WINDOW: i64 = 10;

#[automock]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn history(&self, user_id: Uuid, limit: i64) -> Res<Vec<ChatMessage>>;
    async fn recent(&self, user_id: Uuid, limit: i64) -> Res<Vec<ChatMessage>>;
    async fn insert(&self, user_id: Uuid, role: ChatRole, content: String) -> Res<ChatMessage>;
}

pub struct PgChatStore {
    pool: Arc<PgPool>,
}

impl PgChatStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatStore {
    async fn history(&self, user_id: Uuid, limit: i64) -> Res<Vec<ChatMessage>> {
        db::chat::get_chat_history(self.pool.as_ref(), user_id, limit).await
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Res<Vec<ChatMessage>> {
        db::chat::get_recent_messages(self.pool.as_ref(), user_id, limit).await
    }

    async fn insert(&self, user_id: Uuid, role: ChatRole, content: String) -> Res<ChatMessage> {
        db::chat::insert_chat_message(self.pool.as_ref(), user_id, role, &content).await
    }
}

/// System persona followed by the stored turns, oldest first.
pub fn build_prompt(recent: Vec<ChatMessage>) -> Res<Vec<PromptMessage>> {
    let mut prompt = Vec::with_capacity(recent.len() + 1);
    prompt.push(PromptMessage {
        role: ChatRole::System,
        content: SYSTEM_PROMPT.to_string(),
    });
    for message in recent {
        prompt.push(PromptMessage {
            role: message.role.parse()?,
            content: message.content,
        });
    }
    Ok(prompt)
}

/// One chat exchange between a user and the completion endpoint.
pub struct ChatService<R, C>
where
    R: ChatRepository + 'static,
    C: CompletionClient + 'static,
{
    repo: Arc<R>,
    client: Arc<C>,
}

impl<R, C> ChatService<R, C>
where
    R: ChatRepository + 'static,
    C: CompletionClient + 'static,
{
    pub fn new(repo: Arc<R>, client: Arc<C>) -> Self {
        Self { repo, client }
    }

    pub async fn history(&self, user_id: Uuid) -> Res<Vec<ChatMessage>> {
        self.repo.history(user_id, HISTORY_LIMIT).await
    }

    /// The user's turn is stored before the completion call and stays stored if it fails.
    /// Usage is counted only for answered messages, and a counter failure is only logged.
    pub async fn send<P, U>(
        &self,
        user_id: Uuid,
        message: &str,
        entitlements: &Entitlements<P, U>,
    ) -> Res<String>
    where
        P: PlanRepository + 'static,
        U: UsageRepository + 'static,
    {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message cannot be empty".to_string()));
        }

        self.repo
            .insert(user_id, ChatRole::User, message.to_string())
            .await?;

        let recent = self.repo.recent(user_id, CONTEXT_WINDOW).await?;
        let prompt = build_prompt(recent)?;

        let reply = self.client.complete(prompt).await.map_err(|e| {
            log::error!("Completion failed for user {}: {}", user_id, e);
            e
        })?;

        self.repo
            .insert(user_id, ChatRole::Assistant, reply.clone())
            .await?;

        if let Err(e) = entitlements.increment_ai_usage(user_id).await {
            log::error!("Failed to record AI usage for user {}: {}", user_id, e);
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::models::usage::AiMessageUsage;
    use limiter::repository::{MockPlanRepository, MockUsageRepository};
    use mockall::predicate::eq;

    use super::*;
    use crate::services::llm::MockCompletionClient;

    fn stored(user_id: Uuid, id: i64, role: ChatRole, content: &str) -> ChatMessage {
        ChatMessage {
            id,
            user_id,
            role: role.as_str().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    fn entitlements(
        increments: usize,
    ) -> Entitlements<MockPlanRepository, MockUsageRepository> {
        let mut usage = MockUsageRepository::new();
        usage
            .expect_increment()
            .times(increments)
            .returning(|user_id, reset_at| {
                Ok(AiMessageUsage {
                    id: 1,
                    user_id,
                    message_count: 1,
                    reset_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });
        Entitlements::new(Arc::new(MockPlanRepository::new()), Arc::new(usage))
    }

    #[tokio::test]
    async fn user_turn_survives_completion_failure() {
        let user_id = Uuid::new_v4();
        let mut repo = MockChatRepository::new();
        repo.expect_insert()
            .with(eq(user_id), eq(ChatRole::User), eq("How long do I boil an egg?".to_string()))
            .times(1)
            .returning(move |user_id, role, content| Ok(stored(user_id, 1, role, &content)));
        repo.expect_insert()
            .with(eq(user_id), eq(ChatRole::Assistant), mockall::predicate::always())
            .times(0);
        repo.expect_recent()
            .with(eq(user_id), eq(CONTEXT_WINDOW))
            .returning(move |user_id, _| {
                Ok(vec![stored(user_id, 1, ChatRole::User, "How long do I boil an egg?")])
            });

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_| Err(AppError::Internal("upstream down".to_string())));

        let service = ChatService::new(Arc::new(repo), Arc::new(client));
        let result = service
            .send(user_id, "  How long do I boil an egg? ", &entitlements(0))
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn prompt_is_persona_plus_recent_turns() {
        let user_id = Uuid::new_v4();
        let mut repo = MockChatRepository::new();
        repo.expect_insert()
            .times(2)
            .returning(move |user_id, role, content| Ok(stored(user_id, 11, role, &content)));
        repo.expect_recent()
            .with(eq(user_id), eq(CONTEXT_WINDOW))
            .returning(move |user_id, limit| {
                Ok((0..limit)
                    .map(|i| {
                        let role = if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
                        stored(user_id, i, role, &format!("turn {}", i))
                    })
                    .collect())
            });

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|prompt| {
                prompt.len() == 11
                    && prompt[0].role == ChatRole::System
                    && prompt[0].content == SYSTEM_PROMPT
                    && prompt[1].content == "turn 0"
                    && prompt[10].role == ChatRole::Assistant
            })
            .times(1)
            .returning(|_| Ok("Seven minutes for jammy yolks.".to_string()));

        let service = ChatService::new(Arc::new(repo), Arc::new(client));
        let reply = service
            .send(user_id, "How long do I boil an egg?", &entitlements(1))
            .await
            .unwrap();

        assert_eq!(reply, "Seven minutes for jammy yolks.");
    }

    #[tokio::test]
    async fn blank_message_is_rejected_before_storing() {
        let repo = MockChatRepository::new();
        let client = MockCompletionClient::new();
        let service = ChatService::new(Arc::new(repo), Arc::new(client));

        let err = service
            .send(Uuid::new_v4(), "   ", &entitlements(0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn usage_counter_failure_does_not_fail_the_reply() {
        let user_id = Uuid::new_v4();
        let mut repo = MockChatRepository::new();
        repo.expect_insert()
            .times(2)
            .returning(move |user_id, role, content| Ok(stored(user_id, 1, role, &content)));
        repo.expect_recent().returning(|_, _| Ok(Vec::new()));

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(|_| Ok("Try a frittata.".to_string()));

        let mut usage = MockUsageRepository::new();
        usage
            .expect_increment()
            .times(1)
            .returning(|_, _| Err(AppError::Internal("counter down".to_string())));
        let entitlements = Entitlements::new(Arc::new(MockPlanRepository::new()), Arc::new(usage));

        let service = ChatService::new(Arc::new(repo), Arc::new(client));
        let reply = service.send(user_id, "Leftover eggs?", &entitlements).await.unwrap();
        assert_eq!(reply, "Try a frittata.");
    }
}
