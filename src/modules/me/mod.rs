use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use plume_kernel::Module;

use crate::catalog::models::User;

/// Serves the signed-in reader at `/api/me`.
pub struct MeModule {
    user: Arc<User>,
}

impl MeModule {
    pub fn new(user: User) -> Self {
        Self {
            user: Arc::new(user),
        }
    }
}

#[async_trait]
impl Module for MeModule {
    fn name(&self) -> &'static str {
        "me"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(current_user))
            .with_state(self.user.clone())
    }

    async fn start(&self, _ctx: &plume_kernel::InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), user = %self.user.id, "me module started");
        Ok(())
    }
}

async fn current_user(State(user): State<Arc<User>>) -> Json<User> {
    Json(user.as_ref().clone())
}

pub fn create_module(user: User) -> Arc<dyn Module> {
    Arc::new(MeModule::new(user))
}
