//! Users Domain
//!
//! User accounts with hashed passwords, optimistic `version` counter and
//! millisecond timestamps. Deleting a user unassigns their tasks through
//! [`domain_boards::TaskRepository`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_boards::InMemoryTaskRepository;
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let tasks = InMemoryTaskRepository::new();
//! let service = UserService::new(InMemoryUserRepository::new(), tasks);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{ChangePassword, CreateUser, UpdateUser, User, UserResponse};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
