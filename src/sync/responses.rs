//! Response shaping
//!
//! Concepts only know user ids. Before a result leaves the synchronization
//! layer every author, owner, member and request party is replaced by a
//! username; ids of deleted accounts become `DELETED_USER`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;

use crate::concepts::AuthingConcept;
use crate::database::Document;
use crate::models::{
    Badge, BadgeRecord, Comment, CommentId, FriendRequest, Group, GroupId, Location, Post, PostId, PostOptions,
    RequestStatus, UserId,
};
use crate::utils::errors::{KinshipError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub options: Option<PostOptions>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub post: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    #[serde(rename = "_id")]
    pub id: GroupId,
    pub group_name: String,
    pub group_description: String,
    pub group_owner: String,
    pub group_members: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendRequestView {
    pub from: String,
    pub to: String,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub user: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgesView {
    pub owner: String,
    pub badges: BTreeMap<Badge, bool>,
}

impl BadgesView {
    pub fn earned(&self) -> Vec<Badge> {
        self.badges
            .iter()
            .filter(|(_, earned)| **earned)
            .map(|(badge, _)| *badge)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Responses {
    authing: AuthingConcept,
}

impl Responses {
    pub fn new(authing: AuthingConcept) -> Self {
        Self { authing }
    }

    async fn username(&self, id: UserId) -> Result<String> {
        let mut names = self.authing.ids_to_usernames(&[id]).await?;
        Ok(names.pop().unwrap_or_default())
    }

    pub async fn usernames(&self, ids: &[UserId]) -> Result<Vec<String>> {
        self.authing.ids_to_usernames(ids).await
    }

    pub async fn post(&self, post: Document<Post>) -> Result<PostView> {
        Ok(PostView {
            author: self.username(post.body.author).await?,
            id: post.id,
            content: post.body.content,
            options: post.body.options,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }

    pub async fn posts(&self, posts: Vec<Document<Post>>) -> Result<Vec<PostView>> {
        try_join_all(posts.into_iter().map(|post| self.post(post))).await
    }

    pub async fn comment(&self, comment: Document<Comment>) -> Result<CommentView> {
        Ok(CommentView {
            author: self.username(comment.body.author).await?,
            id: comment.id,
            content: comment.body.content,
            post: comment.body.post,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }

    pub async fn comments(&self, comments: Vec<Document<Comment>>) -> Result<Vec<CommentView>> {
        try_join_all(comments.into_iter().map(|comment| self.comment(comment))).await
    }

    pub async fn group(&self, group: Document<Group>) -> Result<GroupView> {
        let mut ids = Vec::with_capacity(group.body.group_members.len() + 1);
        ids.push(group.body.group_owner);
        ids.extend(group.body.group_members.iter().copied());

        let mut names = self.usernames(&ids).await?.into_iter();
        let group_owner = names.next().unwrap_or_default();

        Ok(GroupView {
            id: group.id,
            group_name: group.body.group_name,
            group_description: group.body.group_description,
            group_owner,
            group_members: names.collect(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        })
    }

    pub async fn groups(&self, groups: Vec<Document<Group>>) -> Result<Vec<GroupView>> {
        try_join_all(groups.into_iter().map(|group| self.group(group))).await
    }

    pub async fn friend_requests(&self, requests: Vec<Document<FriendRequest>>) -> Result<Vec<FriendRequestView>> {
        try_join_all(requests.into_iter().map(|request| async move {
            let mut names = self.usernames(&[request.body.from, request.body.to]).await?.into_iter();
            Ok::<_, KinshipError>(FriendRequestView {
                from: names.next().unwrap_or_default(),
                to: names.next().unwrap_or_default(),
                status: request.body.status,
            })
        }))
        .await
    }

    pub async fn location(&self, location: Document<Location>) -> Result<LocationView> {
        Ok(LocationView {
            user: self.username(location.body.user).await?,
            city: location.body.city,
            state: location.body.state,
        })
    }

    pub async fn badges(&self, record: Document<BadgeRecord>) -> Result<BadgesView> {
        Ok(BadgesView {
            owner: self.username(record.body.owner).await?,
            badges: record.body.badges,
        })
    }
}
