//! Boards Domain
//!
//! Boards with their columns, and the tasks that live on a board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /boards, /boards/{boardId}/tasks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← id checks, existence checks, board → task cascade
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← BoardRepository, TaskRepository (+ in-memory impls)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Board, Column, Task, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_boards::{
//!     handlers, BoardLock, BoardService, InMemoryBoardRepository, InMemoryTaskRepository,
//!     TaskService,
//! };
//!
//! // One instance per collection, shared by every service that needs it
//! let boards = InMemoryBoardRepository::new();
//! let tasks = InMemoryTaskRepository::new();
//! let lock = BoardLock::new();
//!
//! let board_service = BoardService::new(boards.clone(), tasks.clone(), lock.clone());
//! let task_service = TaskService::new(tasks, boards, lock);
//!
//! let router = handlers::router(board_service, task_service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{BoardError, BoardResult};
pub use handlers::ApiDoc;
pub use models::{Board, Column, CreateBoard, CreateColumn, CreateTask, Task, UpdateBoard, UpdateTask};
pub use repository::{BoardRepository, InMemoryBoardRepository, InMemoryTaskRepository, TaskRepository};
pub use service::{BoardLock, BoardService, TaskService};
