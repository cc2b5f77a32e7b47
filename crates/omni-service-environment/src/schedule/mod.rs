use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ScheduleError;
use crate::identifiers::IdGenerator;
use crate::image_reference::ImageReference;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ScheduleItemId(String);

impl ScheduleItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A posted schedule image. Immutable once created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    id: ScheduleItemId,
    title: String,
    date: NaiveDate,
    image_url: ImageReference,
}

impl ScheduleItem {
    pub(crate) fn new(
        id: ScheduleItemId,
        title: impl Into<String>,
        date: NaiveDate,
        image_url: ImageReference,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            image_url,
        }
    }

    pub fn id(&self) -> &ScheduleItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn image_url(&self) -> &ImageReference {
        &self.image_url
    }
}

pub fn default_title(date: NaiveDate) -> String {
    format!("Schedule - {}", date.format("%Y-%m-%d"))
}

/// Append-only schedule history, newest first. Items are never updated or
/// removed.
#[derive(Clone, Debug)]
pub struct ScheduleItems {
    inner: Vec<ScheduleItem>,
    id_generator: IdGenerator,
}

impl ScheduleItems {
    pub fn new(schedule_items: Vec<ScheduleItem>, id_generator: IdGenerator) -> Self {
        Self {
            inner: schedule_items,
            id_generator,
        }
    }

    pub fn upload(
        &mut self,
        title: Option<String>,
        image_url: ImageReference,
        upload_date: NaiveDate,
    ) -> Result<&ScheduleItem, ScheduleError> {
        if image_url.is_empty() {
            return Err(ScheduleError::MissingImage);
        }

        let title = title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| default_title(upload_date));

        let taken: HashSet<&str> = self
            .inner
            .iter()
            .map(|schedule_item| schedule_item.id.as_str())
            .collect();
        let id = ScheduleItemId::new(self.id_generator.next_id(&taken));

        self.inner
            .insert(0, ScheduleItem::new(id, title, upload_date, image_url));
        Ok(&self.inner[0])
    }

    pub fn list(&self) -> &[ScheduleItem] {
        &self.inner
    }

    /// The `count` most recent items.
    pub fn latest(&self, count: usize) -> &[ScheduleItem] {
        &self.inner[..count.min(self.inner.len())]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
