//! Comment handlers.

mod commands;
mod queries;

pub use commands::{
    AddCommentCommand, AddCommentHandler, DeleteCommentCommand, DeleteCommentHandler,
    UpdateCommentCommand, UpdateCommentHandler,
};
pub use queries::{ListCommentsHandler, ListCommentsQuery};
