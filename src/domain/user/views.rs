//! Read models centred on users: channel profiles, watch history and the
//! owner summaries embedded in other views.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::read_model::{
    Collection, ComputedField, Filter, JoinSpec, Projection, ReadModelBuilder, ID_FIELD,
};
use crate::domain::video::{with_card_shape, VideoCard};

/// Public fields of a user embedded in another document.
///
/// Which fields are present depends on the projection of the join that
/// produced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribers_count: Option<u64>,
}

/// One-to-one join of a user relation (by default `owner`) keeping only
/// the given public fields.
pub fn user_join(local_field: &str, as_field: &str, fields: &[&str]) -> JoinSpec {
    JoinSpec::one(Collection::Users, local_field, ID_FIELD, as_field)
        .project(Projection::new().without_id().fields(fields.iter().copied()))
}

/// Joins the `owner` relation with the given public fields.
pub fn owner_join(fields: &[&str]) -> JoinSpec {
    user_join("owner", "owner", fields)
}

/// A channel page: the user plus subscription counts relative to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    #[serde(default)]
    pub cover_image: String,
    pub subscribers_count: u64,
    pub channels_subscribed_to_count: u64,
    pub is_subscribed: bool,
}

/// Channel profile of `username` as seen by `caller`.
///
/// The lookup ignores case. Subscriptions pointing at the channel are
/// counted into `subscribers`, and those made by the channel into
/// `subscribedTo`. `isSubscribed` is true exactly when the caller appears
/// among the channel's subscribers.
pub fn channel_profile(username: &str, caller: UserId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Users)
        .filter(Filter::all().eq_ignore_case("username", username.trim()))
        .join(JoinSpec::count(
            Collection::Subscriptions,
            ID_FIELD,
            "channel",
            "subscribers",
        ))
        .join(JoinSpec::count(
            Collection::Subscriptions,
            ID_FIELD,
            "subscriber",
            "subscribedTo",
        ))
        .compute(ComputedField::size("subscribersCount", "subscribers"))
        .compute(ComputedField::size("channelsSubscribedToCount", "subscribedTo"))
        .compute(ComputedField::contains(
            "isSubscribed",
            "subscribers.subscriber",
            caller.to_value(),
        ))
        .project(Projection::new().fields([
            "fullName",
            "username",
            "email",
            "avatar",
            "coverImage",
            "subscribersCount",
            "channelsSubscribedToCount",
            "isSubscribed",
        ]))
}

/// The caller's watch history row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistory {
    #[serde(default)]
    pub watch_history: Vec<VideoCard>,
}

/// Watch history of `user`, each video with its owner summary.
///
/// Videos follow the order of the stored history. Deleted videos are
/// skipped.
pub fn watch_history(user: UserId) -> ReadModelBuilder {
    ReadModelBuilder::new(Collection::Users)
        .filter(Filter::by_id(user))
        .join(with_card_shape(JoinSpec::many(
            Collection::Videos,
            "watchHistory",
            ID_FIELD,
            "watchHistory",
        )))
        .project(Projection::new().without_id().include("watchHistory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::read_model::{decode_row, StagedRow};
    use serde_json::json;

    fn staged(value: serde_json::Value) -> StagedRow {
        StagedRow::new(value.as_object().cloned().unwrap())
    }

    #[test]
    fn view_pipelines_validate() {
        assert!(channel_profile("ana", UserId::new()).build(None).is_ok());
        assert!(watch_history(UserId::new()).build(None).is_ok());
    }

    #[test]
    fn channel_profile_shapes_counts_and_membership() {
        let caller = UserId::new();
        let channel = UserId::new();
        let pipeline = channel_profile("ana", caller).build(None).unwrap();
        let join = &pipeline.joins()[0];

        let mut row = staged(json!({
            "_id": channel.to_string(),
            "username": "ana",
            "fullName": "Ana",
            "email": "ana@example.com",
            "avatar": "/media/a.png",
            "password": "hash",
        }));
        join.attach(
            &mut row,
            &[json!({"_id": "s1", "channel": channel.to_string(), "subscriber": caller.to_string()})
                .as_object()
                .cloned()
                .unwrap()],
        );
        pipeline.joins()[1].attach(&mut row, &[]);

        let out = pipeline.finish(vec![row]);
        let profile: ChannelProfile = decode_row(out.rows[0].clone()).unwrap();
        assert_eq!(profile.subscribers_count, 1);
        assert_eq!(profile.channels_subscribed_to_count, 0);
        assert!(profile.is_subscribed);
        assert!(!out.rows[0].contains_key("password"));
        assert!(!out.rows[0].contains_key("subscribers"));
    }

    #[test]
    fn user_summary_omits_absent_fields() {
        let summary = UserSummary {
            username: "ana".into(),
            avatar: Some("/a.png".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"username": "ana", "avatar": "/a.png"})
        );
    }
}
