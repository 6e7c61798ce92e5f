//! # Domain Model: Lists, Items and their Ids
//!
//! This module defines the core data structures: [`List`], [`Item`],
//! [`ItemStatus`], [`ListScope`] and [`OwnerKey`]. Everything here is pure; the
//! store is the only thing that touches disk.
//!
//! ## Id Allocation
//!
//! Item ids are unique within their list and are assigned by the list itself via
//! [`List::next_item_id`]: the smallest non-negative integer not currently used.
//! Deleting an item frees its id for the next insert. List ids follow the same
//! rule but are allocated globally by [`crate::ids::IdAllocator`].
//!
//! ## Status Codes
//!
//! Statuses are persisted as integers so that files written by older clients
//! stay readable:
//!
//! | Code | Status |
//! |------|--------|
//! | 0 | `NotStarted` |
//! | 1 | `InProgress` |
//! | 2 | `Done` |
//! | 3 | `Paused` |
//! | 4 | `Abandoned` |
//!
//! ## Deadlines
//!
//! Deadlines have minute precision and are exchanged as `YYYY-MM-DD HH:MM`
//! ([`DEADLINE_FORMAT`]). There is no timezone: the value is whatever wall-clock
//! time the user typed.

use crate::error::{Result, TodoError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

pub type ListId = u32;
pub type ItemId = u32;
pub type UserId = u64;

/// Text format of item deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Returns the smallest non-negative integer absent from `used`.
pub fn first_free_id<I: IntoIterator<Item = u32>>(used: I) -> u32 {
    let used: HashSet<u32> = used.into_iter().collect();
    (0..).find(|candidate| !used.contains(candidate)).unwrap_or(0)
}

/// Identifier of the user, channel or server a collection of lists is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(pub u64);

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(OwnerKey)
    }
}

impl From<u64> for OwnerKey {
    fn from(value: u64) -> Self {
        OwnerKey(value)
    }
}

/// What a list is "for".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListScope {
    #[default]
    User,
    Channel,
    Server,
}

impl FromStr for ListScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "channel" => Ok(Self::Channel),
            "server" | "guild" => Ok(Self::Server),
            other => Err(format!("unknown scope: {}", other)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum ItemStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Paused,
    Abandoned,
}

impl ItemStatus {
    /// Every status, in code order.
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::NotStarted,
        ItemStatus::InProgress,
        ItemStatus::Done,
        ItemStatus::Paused,
        ItemStatus::Abandoned,
    ];

    pub fn code(self) -> i64 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Done => 2,
            Self::Paused => 3,
            Self::Abandoned => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Paused => "Paused",
            Self::Abandoned => "Abandoned",
        }
    }
}

impl TryFrom<i64> for ItemStatus {
    type Error = TodoError;

    fn try_from(code: i64) -> Result<Self> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| TodoError::InvalidStatus(code.to_string()))
    }
}

impl From<ItemStatus> for i64 {
    fn from(status: ItemStatus) -> Self {
        status.code()
    }
}

/// Accepts either the numeric code or a name such as `in-progress`.
impl FromStr for ItemStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return ItemStatus::try_from(code);
        }
        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "notstarted" | "todo" => Ok(Self::NotStarted),
            "inprogress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "paused" => Ok(Self::Paused),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(TodoError::InvalidStatus(trimmed.to_string())),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a deadline in [`DEADLINE_FORMAT`].
pub fn parse_deadline(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DEADLINE_FORMAT)
        .map_err(|_| TodoError::InvalidDeadlineFormat(text.to_string()))
}

pub fn format_deadline(deadline: &NaiveDateTime) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}

mod deadline_format {
    use super::{format_deadline, parse_deadline};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        deadline: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match deadline {
            Some(value) => serializer.serialize_str(&format_deadline(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| parse_deadline(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub content: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "deadline_format"
    )]
    pub deadline: Option<NaiveDateTime>,
}

impl Item {
    /// Builds an item, parsing `deadline` in [`DEADLINE_FORMAT`].
    pub fn new(
        id: ItemId,
        content: impl Into<String>,
        deadline: Option<&str>,
        status: Option<ItemStatus>,
    ) -> Result<Self> {
        let deadline = deadline.map(parse_deadline).transpose()?;
        Ok(Self {
            id,
            content: content.into(),
            status: status.unwrap_or_default(),
            deadline,
        })
    }

    /// Replaces the status with the one encoded by `code`.
    ///
    /// Fails with [`TodoError::InvalidStatus`] for anything outside 0-4, leaving
    /// the item untouched.
    pub fn update_status(&mut self, code: i64) -> Result<()> {
        self.status = ItemStatus::try_from(code)?;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// `None` clears the deadline.
    pub fn set_deadline(&mut self, deadline: Option<&str>) -> Result<()> {
        self.deadline = deadline.map(parse_deadline).transpose()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub scope: ListScope,
    pub scope_id: u64,
    #[serde(default)]
    pub authors: BTreeSet<UserId>,
    #[serde(default, with = "crate::codec::tagged_items")]
    pub items: Vec<Item>,
}

impl List {
    pub fn new(
        id: ListId,
        name: impl Into<String>,
        scope: ListScope,
        scope_id: u64,
        author: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            scope,
            scope_id,
            authors: BTreeSet::from([author]),
            items: Vec::new(),
        }
    }

    pub fn next_item_id(&self) -> ItemId {
        first_free_id(self.items.iter().map(|item| item.id))
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes the first item with `id`. Returns `None`, leaving the list
    /// untouched, when there is no such item.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn is_author(&self, user: UserId) -> bool {
        self.authors.contains(&user)
    }

    /// Returns false if `user` already was an author.
    pub fn add_author(&mut self, user: UserId) -> bool {
        self.authors.insert(user)
    }

    /// Items bucketed by status in code order, keeping insertion order inside
    /// each bucket. Empty buckets are included.
    pub fn items_by_status(&self) -> Vec<(ItemStatus, Vec<&Item>)> {
        ItemStatus::ALL
            .into_iter()
            .map(|status| {
                let items = self
                    .items
                    .iter()
                    .filter(|item| item.status == status)
                    .collect();
                (status, items)
            })
            .collect()
    }
}
