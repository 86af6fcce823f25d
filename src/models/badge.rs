//! Badge model
//!
//! One record per user maps every badge name to an earned flag. A flag only
//! ever moves from unearned to earned.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserId;
use crate::utils::errors::KinshipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "Getting Started: Created Account")]
    GettingStarted,
    #[serde(rename = "Building Community")]
    BuildingCommunity,
    #[serde(rename = "Branching Out")]
    BranchingOut,
    #[serde(rename = "Post Superstar")]
    PostSuperstar,
    #[serde(rename = "Knowledge Power")]
    KnowledgePower,
    #[serde(rename = "Comment Guru")]
    CommentGuru,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::GettingStarted,
        Badge::BuildingCommunity,
        Badge::BranchingOut,
        Badge::PostSuperstar,
        Badge::KnowledgePower,
        Badge::CommentGuru,
    ];

    /// Badges a user must hold before creating a group, in reporting order
    pub const GROUP_PREREQUISITES: [Badge; 3] = [
        Badge::CommentGuru,
        Badge::PostSuperstar,
        Badge::GettingStarted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Badge::GettingStarted => "Getting Started: Created Account",
            Badge::BuildingCommunity => "Building Community",
            Badge::BranchingOut => "Branching Out",
            Badge::PostSuperstar => "Post Superstar",
            Badge::KnowledgePower => "Knowledge Power",
            Badge::CommentGuru => "Comment Guru",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Badge {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Badge::ALL
            .into_iter()
            .find(|badge| badge.name() == s.trim())
            .ok_or_else(|| KinshipError::NotFound(format!("Badge {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRecord {
    pub owner: UserId,
    pub badges: BTreeMap<Badge, bool>,
}

impl BadgeRecord {
    /// A fresh record with every badge unearned
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            badges: Badge::ALL.into_iter().map(|badge| (badge, false)).collect(),
        }
    }

    pub fn has(&self, badge: Badge) -> bool {
        self.badges.get(&badge).copied().unwrap_or(false)
    }

    /// Mark a badge earned; `false` if it already was
    pub fn earn(&mut self, badge: Badge) -> bool {
        let earned = self.badges.entry(badge).or_insert(false);
        if *earned {
            return false;
        }
        *earned = true;
        true
    }

    /// The subset of `required` not yet earned, in the given order
    pub fn missing(&self, required: &[Badge]) -> Vec<Badge> {
        required.iter().copied().filter(|badge| !self.has(*badge)).collect()
    }

    pub fn earned(&self) -> Vec<Badge> {
        self.badges
            .iter()
            .filter(|(_, earned)| **earned)
            .map(|(badge, _)| *badge)
            .collect()
    }
}
