//! 进程内 POS 仓储
//!
//! 用于测试以及没有数据库的本地运行

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Pos, PosId, PosRepository};
use crate::error::{ServiceError, ServiceResult};

#[derive(Default)]
struct State {
    last_id: i64,
    records: BTreeMap<PosId, Pos>,
}

impl State {
    fn name_taken(&self, name: &str, except: Option<PosId>) -> bool {
        self.records
            .values()
            .any(|p| p.name == name && p.id != except)
    }
}

/// 名称检查与写入在同一把写锁内完成
#[derive(Default)]
pub struct InMemoryPosRepository {
    state: RwLock<State>,
}

impl InMemoryPosRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PosRepository for InMemoryPosRepository {
    async fn find_all(&self) -> ServiceResult<Vec<Pos>> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PosId) -> ServiceResult<Option<Pos>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Pos>> {
        let state = self.state.read().await;
        Ok(state.records.values().find(|p| p.name == name).cloned())
    }

    async fn upsert(&self, pos: &Pos) -> ServiceResult<Pos> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        if state.name_taken(&pos.name, pos.id) {
            return Err(ServiceError::DuplicatePosName(pos.name.clone()));
        }

        let saved = match pos.id {
            None => {
                state.last_id += 1;
                Pos {
                    id: Some(PosId(state.last_id)),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..pos.clone()
                }
            }
            Some(id) => {
                let existing = state
                    .records
                    .get(&id)
                    .ok_or(ServiceError::PosNotFound(id))?;
                Pos {
                    id: Some(id),
                    created_at: existing.created_at,
                    updated_at: existing.updated_at.max(Some(now)),
                    ..pos.clone()
                }
            }
        };

        if let Some(id) = saved.id {
            state.records.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn clear(&self) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        *state = State::default();
        Ok(())
    }
}
