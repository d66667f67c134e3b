use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BoardError, BoardResult};
use crate::models::{Board, CreateBoard, CreateTask, Task, UpdateBoard, UpdateTask};

/// Repository trait for Board persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// All boards in insertion order
    async fn get_all(&self) -> BoardResult<Vec<Board>>;

    async fn get_by_id(&self, id: Uuid) -> BoardResult<Option<Board>>;

    async fn create(&self, input: CreateBoard) -> BoardResult<Board>;

    /// Update an existing board in place
    async fn update(&self, id: Uuid, input: UpdateBoard) -> BoardResult<Board>;

    /// Returns false if no board had this id
    async fn delete(&self, id: Uuid) -> BoardResult<bool>;
}

/// Repository trait for Task persistence.
///
/// Tasks are addressed through their board: a task id looked up under the
/// wrong board is absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_all(&self) -> BoardResult<Vec<Task>>;

    async fn get_all_by_board(&self, board_id: Uuid) -> BoardResult<Vec<Task>>;

    async fn get_by_id(&self, board_id: Uuid, task_id: Uuid) -> BoardResult<Option<Task>>;

    async fn create(&self, board_id: Uuid, input: CreateTask) -> BoardResult<Task>;

    async fn update(&self, board_id: Uuid, task_id: Uuid, input: UpdateTask)
    -> BoardResult<Task>;

    async fn delete(&self, board_id: Uuid, task_id: Uuid) -> BoardResult<bool>;

    /// Remove every task on the board. Returns how many were removed.
    async fn on_board_deleted(&self, board_id: Uuid) -> BoardResult<usize>;

    /// Clear `user_id` on every task owned by the user. Returns how many changed.
    async fn on_user_deleted(&self, user_id: Uuid) -> BoardResult<usize>;
}

/// In-memory implementation of BoardRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBoardRepository {
    boards: Arc<RwLock<Vec<Board>>>,
}

impl InMemoryBoardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn get_all(&self) -> BoardResult<Vec<Board>> {
        Ok(self.boards.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> BoardResult<Option<Board>> {
        let boards = self.boards.read().await;
        Ok(boards.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, input: CreateBoard) -> BoardResult<Board> {
        let board = Board::new(input);
        self.boards.write().await.push(board.clone());

        tracing::info!(board_id = %board.id, columns = board.columns.len(), "Created board");
        Ok(board)
    }

    async fn update(&self, id: Uuid, input: UpdateBoard) -> BoardResult<Board> {
        let mut boards = self.boards.write().await;
        let board = boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BoardError::BoardNotFound(id))?;

        board.apply_update(input);

        tracing::info!(board_id = %id, "Updated board");
        Ok(board.clone())
    }

    async fn delete(&self, id: Uuid) -> BoardResult<bool> {
        let mut boards = self.boards.write().await;

        match boards.iter().position(|b| b.id == id) {
            Some(index) => {
                boards.remove(index);
                tracing::info!(board_id = %id, "Deleted board");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory implementation of TaskRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn on_board(task: &Task, board_id: Uuid, task_id: Uuid) -> bool {
    task.id == task_id && task.board_id == Some(board_id)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_all(&self) -> BoardResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get_all_by_board(&self, board_id: Uuid) -> BoardResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.board_id == Some(board_id))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, board_id: Uuid, task_id: Uuid) -> BoardResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| on_board(t, board_id, task_id)).cloned())
    }

    async fn create(&self, board_id: Uuid, input: CreateTask) -> BoardResult<Task> {
        let task = Task::new(board_id, input);
        self.tasks.write().await.push(task.clone());

        tracing::info!(board_id = %board_id, task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn update(
        &self,
        board_id: Uuid,
        task_id: Uuid,
        input: UpdateTask,
    ) -> BoardResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| on_board(t, board_id, task_id))
            .ok_or(BoardError::TaskNotFound { board_id, task_id })?;

        task.apply_update(input);

        tracing::info!(board_id = %board_id, task_id = %task_id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, board_id: Uuid, task_id: Uuid) -> BoardResult<bool> {
        let mut tasks = self.tasks.write().await;

        match tasks.iter().position(|t| on_board(t, board_id, task_id)) {
            Some(index) => {
                tasks.remove(index);
                tracing::info!(board_id = %board_id, task_id = %task_id, "Deleted task");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn on_board_deleted(&self, board_id: Uuid) -> BoardResult<usize> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.board_id != Some(board_id));
        let removed = before - tasks.len();

        tracing::info!(board_id = %board_id, removed, "Removed tasks of deleted board");
        Ok(removed)
    }

    async fn on_user_deleted(&self, user_id: Uuid) -> BoardResult<usize> {
        let mut tasks = self.tasks.write().await;
        let mut cleared = 0;
        for task in tasks.iter_mut().filter(|t| t.user_id == Some(user_id)) {
            task.user_id = None;
            cleared += 1;
        }

        tracing::info!(user_id = %user_id, cleared, "Unassigned tasks of deleted user");
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> CreateTask {
        CreateTask {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_board() {
        let repo = InMemoryBoardRepository::new();

        let board = repo
            .create(CreateBoard {
                title: Some("Sprint 1".into()),
                columns: Some(vec![]),
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(board.id).await.unwrap();
        assert_eq!(fetched, Some(board));
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_target_and_keeps_order() {
        let repo = InMemoryBoardRepository::new();
        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            let board = repo
                .create(CreateBoard {
                    title: Some(title.into()),
                    columns: None,
                })
                .await
                .unwrap();
            ids.push(board.id);
        }

        assert!(repo.delete(ids[1]).await.unwrap());
        assert!(!repo.delete(ids[1]).await.unwrap());

        let titles: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_update_missing_board_is_not_found() {
        let repo = InMemoryBoardRepository::new();
        let result = repo.update(Uuid::new_v4(), UpdateBoard::default()).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound(_))));
    }

    #[tokio::test]
    async fn test_clones_share_the_collection() {
        let repo = InMemoryTaskRepository::new();
        let other = repo.clone();
        let board_id = Uuid::new_v4();

        repo.create(board_id, titled("shared")).await.unwrap();
        assert_eq!(other.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_task_only_visible_under_its_board() {
        let repo = InMemoryTaskRepository::new();
        let board_id = Uuid::new_v4();
        let task = repo.create(board_id, titled("Fix bug")).await.unwrap();

        assert!(repo.get_by_id(board_id, task.id).await.unwrap().is_some());
        assert!(repo.get_by_id(Uuid::new_v4(), task.id).await.unwrap().is_none());
        assert!(!repo.delete(Uuid::new_v4(), task.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_on_board_deleted_removes_only_that_boards_tasks() {
        let repo = InMemoryTaskRepository::new();
        let doomed = Uuid::new_v4();
        let kept = Uuid::new_v4();

        repo.create(doomed, titled("t1")).await.unwrap();
        repo.create(kept, titled("keep")).await.unwrap();
        repo.create(doomed, titled("t2")).await.unwrap();

        assert_eq!(repo.on_board_deleted(doomed).await.unwrap(), 2);

        let remaining = repo.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "keep");
        assert!(repo.get_all_by_board(doomed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_on_user_deleted_nulls_owner_without_removing() {
        let repo = InMemoryTaskRepository::new();
        let board_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let other_user = Uuid::new_v4();

        let owned = repo
            .create(
                board_id,
                CreateTask {
                    user_id: Some(user_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let foreign = repo
            .create(
                board_id,
                CreateTask {
                    user_id: Some(other_user),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.on_user_deleted(user_id).await.unwrap(), 1);

        let owned = repo.get_by_id(board_id, owned.id).await.unwrap().unwrap();
        let foreign = repo.get_by_id(board_id, foreign.id).await.unwrap().unwrap();
        assert_eq!(owned.user_id, None);
        assert_eq!(foreign.user_id, Some(other_user));
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }
}
