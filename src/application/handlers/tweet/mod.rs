//! Tweet handlers.

mod commands;
mod queries;

pub use commands::{
    CreateTweetCommand, CreateTweetHandler, DeleteTweetCommand, DeleteTweetHandler,
    UpdateTweetCommand, UpdateTweetHandler,
};
pub use queries::{ListTweetsHandler, ListTweetsQuery};
