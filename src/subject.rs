//! School subjects, and the timeslots they own

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::timeslot::TimeslotKey;

/// The colour swatches a subject can be displayed with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "bg-red-100")]
    Red,
    #[serde(rename = "bg-yellow-100")]
    Yellow,
    #[serde(rename = "bg-blue-100")]
    Blue,
    #[serde(rename = "bg-green-100")]
    Green,
    #[serde(rename = "bg-pink-100")]
    Pink,
    #[serde(rename = "bg-purple-100")]
    Purple,
    #[serde(rename = "bg-orange-100")]
    Orange,
    #[serde(rename = "bg-gray-100")]
    Gray,
    #[serde(rename = "bg-indigo-100")]
    Indigo,
    #[serde(rename = "bg-teal-100")]
    Teal,
}

impl Color {
    /// Every swatch, in the order they are offered to the user
    pub const ALL: [Color; 10] = [
        Color::Red, Color::Yellow, Color::Blue, Color::Green, Color::Pink,
        Color::Purple, Color::Orange, Color::Gray, Color::Indigo, Color::Teal,
    ];

    /// The name this swatch is persisted with
    pub fn swatch_name(self) -> &'static str {
        match self {
            Color::Red => "bg-red-100",
            Color::Yellow => "bg-yellow-100",
            Color::Blue => "bg-blue-100",
            Color::Green => "bg-green-100",
            Color::Pink => "bg-pink-100",
            Color::Purple => "bg-purple-100",
            Color::Orange => "bg-orange-100",
            Color::Gray => "bg-gray-100",
            Color::Indigo => "bg-indigo-100",
            Color::Teal => "bg-teal-100",
        }
    }

    /// The hex code of this swatch
    pub fn hex(self) -> &'static str {
        match self {
            Color::Red => "#fee2e2",
            Color::Yellow => "#fef9c3",
            Color::Blue => "#dbeafe",
            Color::Green => "#dcfce7",
            Color::Pink => "#fce7f3",
            Color::Purple => "#f3e8ff",
            Color::Orange => "#ffedd5",
            Color::Gray => "#f3f4f6",
            Color::Indigo => "#e0e7ff",
            Color::Teal => "#ccfbf1",
        }
    }

    /// This swatch as a CSS colour, for renderers that need actual RGB values
    pub fn css_color(self) -> Result<csscolorparser::Color, csscolorparser::ParseColorError> {
        csscolorparser::parse(self.hex())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Red
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.swatch_name())
    }
}


/// The identifier of a subject document in a [`DocumentStore`](crate::traits::DocumentStore)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId {
    content: String,
}

impl SubjectId {
    /// Generate a random SubjectId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for SubjectId {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<&str> for SubjectId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}


/// A subject, as it is stored in a document store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub timeslots: BTreeMap<TimeslotKey, bool>,
}


/// A school subject, and the timeslots it is taught in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    id: SubjectId,
    name: String,
    color: Color,
    /// Keys mapping to `false` are kept as they are stored, they simply do not count as claimed
    timeslots: BTreeMap<TimeslotKey, bool>,
}

impl Subject {
    pub fn new(id: SubjectId, name: String, color: Color, timeslots: BTreeMap<TimeslotKey, bool>) -> Self {
        Self { id, name, color, timeslots }
    }

    pub fn from_record(id: SubjectId, record: SubjectRecord) -> Self {
        Self::new(id, record.name, record.color, record.timeslots)
    }

    pub fn to_record(&self) -> SubjectRecord {
        SubjectRecord {
            name: self.name.clone(),
            color: self.color,
            timeslots: self.timeslots.clone(),
        }
    }

    pub fn id(&self) -> &SubjectId    { &self.id    }
    pub fn name(&self) -> &str        { &self.name  }
    pub fn color(&self) -> Color      { self.color  }
    pub fn timeslots(&self) -> &BTreeMap<TimeslotKey, bool> { &self.timeslots }

    /// Whether this subject claims the given slot
    pub fn claims(&self, key: &TimeslotKey) -> bool {
        self.timeslots.get(key).copied().unwrap_or(false)
    }

    /// Every slot this subject claims
    pub fn claimed_keys(&self) -> impl Iterator<Item = &TimeslotKey> + '_ {
        self.timeslots.iter()
            .filter(|(_, claimed)| **claimed)
            .map(|(key, _)| key)
    }
}
