//! Tweet domain module.

mod aggregate;
mod views;

pub use aggregate::{NewTweet, Tweet, TweetChanges};
pub use views::{all_tweets, user_tweets, TweetView};
