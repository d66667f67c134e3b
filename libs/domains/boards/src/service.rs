use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BoardError, BoardResult, parse_id};
use crate::models::{Board, CreateBoard, CreateTask, Task, UpdateBoard, UpdateTask};
use crate::repository::{BoardRepository, TaskRepository};

fn validate<T: Validate>(input: &T) -> BoardResult<()> {
    input
        .validate()
        .map_err(|e| BoardError::Validation(e.to_string()))
}

/// Orders task writes against board deletion.
///
/// Task writes hold it shared from the board existence check until the task
/// is stored. Board deletion holds it exclusively across the removal and the
/// task cascade. A [`BoardService`] and the [`TaskService`] for the same
/// collections must be given clones of one lock.
#[derive(Debug, Clone, Default)]
pub struct BoardLock(Arc<RwLock<()>>);

impl BoardLock {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Service layer for Board business logic
#[derive(Clone)]
pub struct BoardService<B: BoardRepository, T: TaskRepository> {
    boards: Arc<B>,
    tasks: Arc<T>,
    lock: BoardLock,
}

impl<B: BoardRepository, T: TaskRepository> BoardService<B, T> {
    pub fn new(boards: B, tasks: T, lock: BoardLock) -> Self {
        Self {
            boards: Arc::new(boards),
            tasks: Arc::new(tasks),
            lock,
        }
    }

    pub async fn list_boards(&self) -> BoardResult<Vec<Board>> {
        self.boards.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_board(&self, id: &str) -> BoardResult<Board> {
        let id = parse_id("boardId", id)?;
        self.find_board(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_board(&self, input: CreateBoard) -> BoardResult<Board> {
        validate(&input)?;
        self.boards.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_board(&self, id: &str, input: UpdateBoard) -> BoardResult<Board> {
        let id = parse_id("boardId", id)?;
        validate(&input)?;
        self.find_board(id).await?;
        self.boards.update(id, input).await
    }

    /// Delete a board together with all of its tasks.
    ///
    /// Returns the number of tasks removed by the cascade.
    #[instrument(skip(self))]
    pub async fn delete_board(&self, id: &str) -> BoardResult<usize> {
        let id = parse_id("boardId", id)?;
        let _guard = self.lock.0.write().await;

        if !self.boards.delete(id).await? {
            return Err(BoardError::BoardNotFound(id));
        }

        self.tasks.on_board_deleted(id).await
    }

    async fn find_board(&self, id: Uuid) -> BoardResult<Board> {
        self.boards
            .get_by_id(id)
            .await?
            .ok_or(BoardError::BoardNotFound(id))
    }
}

/// Service layer for tasks, always scoped to an existing board
#[derive(Clone)]
pub struct TaskService<T: TaskRepository, B: BoardRepository> {
    tasks: Arc<T>,
    boards: Arc<B>,
    lock: BoardLock,
}

impl<T: TaskRepository, B: BoardRepository> TaskService<T, B> {
    pub fn new(tasks: T, boards: B, lock: BoardLock) -> Self {
        Self {
            tasks: Arc::new(tasks),
            boards: Arc::new(boards),
            lock,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self, board_id: &str) -> BoardResult<Vec<Task>> {
        let board_id = self.existing_board(board_id).await?;
        self.tasks.get_all_by_board(board_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, board_id: &str, task_id: &str) -> BoardResult<Task> {
        let board_id = self.existing_board(board_id).await?;
        let task_id = parse_id("taskId", task_id)?;
        self.find_task(board_id, task_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_task(&self, board_id: &str, input: CreateTask) -> BoardResult<Task> {
        let _guard = self.lock.0.read().await;
        let board_id = self.existing_board(board_id).await?;
        validate(&input)?;
        self.tasks.create(board_id, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_task(
        &self,
        board_id: &str,
        task_id: &str,
        input: UpdateTask,
    ) -> BoardResult<Task> {
        let _guard = self.lock.0.read().await;
        let board_id = self.existing_board(board_id).await?;
        let task_id = parse_id("taskId", task_id)?;
        validate(&input)?;
        self.find_task(board_id, task_id).await?;
        self.tasks.update(board_id, task_id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, board_id: &str, task_id: &str) -> BoardResult<()> {
        let board_id = self.existing_board(board_id).await?;
        let task_id = parse_id("taskId", task_id)?;

        if !self.tasks.delete(board_id, task_id).await? {
            return Err(BoardError::TaskNotFound { board_id, task_id });
        }

        Ok(())
    }

    async fn existing_board(&self, board_id: &str) -> BoardResult<Uuid> {
        let board_id = parse_id("boardId", board_id)?;
        if self.boards.get_by_id(board_id).await?.is_none() {
            return Err(BoardError::BoardNotFound(board_id));
        }
        Ok(board_id)
    }

    async fn find_task(&self, board_id: Uuid, task_id: Uuid) -> BoardResult<Task> {
        self.tasks
            .get_by_id(board_id, task_id)
            .await?
            .ok_or(BoardError::TaskNotFound { board_id, task_id })
    }
}
