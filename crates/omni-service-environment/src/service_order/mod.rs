pub mod display;
pub mod priority;
pub mod status;

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

use crate::error::ServiceOrderError;
use crate::identifiers::IdGenerator;
use crate::image_reference::ImageReference;

pub use self::priority::Priority;
pub use self::status::Status;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable fields of a service order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OrderField {
    Title,
    Description,
    Location,
    Priority,
    Deadline,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    id: OrderId,
    title: String,
    description: String,
    location: String,
    priority: Priority,
    status: Status,
    deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evidence_image: Option<ImageReference>,
}

impl ServiceOrder {
    pub(crate) fn new(id: OrderId, fields: OrderFields) -> Self {
        ServiceOrder {
            id,
            title: fields.title,
            description: fields.description,
            location: fields.location,
            priority: fields.priority,
            status: Status::Open,
            deadline: fields.deadline,
            evidence_image: None,
        }
    }

    pub(crate) fn completed(mut self, evidence_image: Option<ImageReference>) -> Self {
        self.status = Status::Done;
        self.evidence_image = evidence_image;
        self
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    pub fn evidence_image(&self) -> Option<&ImageReference> {
        self.evidence_image.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Current mutable fields, the starting point of an edit.
    pub fn fields(&self) -> OrderFields {
        OrderFields {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            priority: self.priority,
            deadline: self.deadline,
        }
    }
}

/// Everything a caller supplies to create a service order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
}

impl OrderFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        priority: Priority,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            priority,
            deadline,
        }
    }

    pub fn validate(&self) -> Result<(), ServiceOrderError> {
        require_text(OrderField::Title, &self.title)?;
        require_text(OrderField::Description, &self.description)?;
        require_text(OrderField::Location, &self.location)?;
        Ok(())
    }
}

/// Replacement values for an existing order. `None` keeps the stored value,
/// so a patch built from a full `OrderFields` replaces every mutable field.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<Status>,
    pub evidence_image: Option<ImageReference>,
}

impl OrderPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn evidence_image(mut self, evidence_image: ImageReference) -> Self {
        self.evidence_image = Some(evidence_image);
        self
    }

    fn validate_against(&self, service_order: &ServiceOrder) -> Result<(), ServiceOrderError> {
        if let Some(title) = &self.title {
            require_text(OrderField::Title, title)?;
        }
        if let Some(description) = &self.description {
            require_text(OrderField::Description, description)?;
        }
        if let Some(location) = &self.location {
            require_text(OrderField::Location, location)?;
        }

        let next_status = self.status.unwrap_or(service_order.status);
        if !service_order.status.allows_transition_to(next_status) {
            return Err(ServiceOrderError::StatusRegression(service_order.id.clone()));
        }
        if self.evidence_image.is_some() && next_status.is_open() {
            return Err(ServiceOrderError::EvidenceRequiresCompletion(
                service_order.id.clone(),
            ));
        }
        Ok(())
    }

    fn apply_to(self, service_order: &mut ServiceOrder) {
        if let Some(title) = self.title {
            service_order.title = title;
        }
        if let Some(description) = self.description {
            service_order.description = description;
        }
        if let Some(location) = self.location {
            service_order.location = location;
        }
        if let Some(priority) = self.priority {
            service_order.priority = priority;
        }
        if let Some(deadline) = self.deadline {
            service_order.deadline = deadline;
        }
        if let Some(status) = self.status {
            service_order.status = status;
        }
        if let Some(evidence_image) = self.evidence_image {
            service_order.evidence_image = Some(evidence_image);
        }
    }
}

impl From<OrderFields> for OrderPatch {
    fn from(fields: OrderFields) -> Self {
        OrderPatch {
            title: Some(fields.title),
            description: Some(fields.description),
            location: Some(fields.location),
            priority: Some(fields.priority),
            deadline: Some(fields.deadline),
            status: None,
            evidence_image: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl OrderFilter {
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn matches(&self, service_order: &ServiceOrder) -> bool {
        self.status.is_none_or(|status| service_order.status == status)
            && self
                .priority
                .is_none_or(|priority| service_order.priority == priority)
    }
}

/// Service orders, most recently created first. The stored order is the
/// presentation order; queries never re-sort.
#[derive(Clone, Debug)]
pub struct ServiceOrders {
    inner: Vec<ServiceOrder>,
    id_generator: IdGenerator,
}

impl ServiceOrders {
    pub fn new(service_orders: Vec<ServiceOrder>, id_generator: IdGenerator) -> Self {
        Self {
            inner: service_orders,
            id_generator,
        }
    }

    pub fn records(&self) -> &[ServiceOrder] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, id: &OrderId) -> Option<&ServiceOrder> {
        self.inner.iter().find(|service_order| &service_order.id == id)
    }

    pub fn create(&mut self, fields: OrderFields) -> Result<&ServiceOrder, ServiceOrderError> {
        fields.validate()?;

        let taken: HashSet<&str> = self
            .inner
            .iter()
            .map(|service_order| service_order.id.as_str())
            .collect();
        let id = OrderId::new(self.id_generator.next_id(&taken));

        self.inner.insert(0, ServiceOrder::new(id, fields));
        Ok(&self.inner[0])
    }

    pub fn update(
        &mut self,
        id: &OrderId,
        order_patch: OrderPatch,
    ) -> Result<&ServiceOrder, ServiceOrderError> {
        let position = self.position(id)?;
        let service_order = &mut self.inner[position];

        order_patch.validate_against(service_order)?;
        order_patch.apply_to(service_order);
        Ok(service_order)
    }

    /// Removes the order and hands it back; `None` when no such order exists.
    pub fn delete(&mut self, id: &OrderId) -> Option<ServiceOrder> {
        let position = self.position(id).ok()?;
        Some(self.inner.remove(position))
    }

    /// Marks the order DONE. Supplied evidence replaces any earlier image,
    /// absent evidence keeps it.
    pub fn complete(
        &mut self,
        id: &OrderId,
        evidence_image: Option<ImageReference>,
    ) -> Result<&ServiceOrder, ServiceOrderError> {
        let position = self.position(id)?;
        let service_order = &mut self.inner[position];

        service_order.status = Status::Done;
        if let Some(evidence_image) = evidence_image {
            service_order.evidence_image = Some(evidence_image);
        }
        Ok(service_order)
    }

    pub fn list(&self, order_filter: &OrderFilter) -> Vec<&ServiceOrder> {
        self.inner
            .iter()
            .filter(|service_order| order_filter.matches(service_order))
            .collect()
    }

    fn position(&self, id: &OrderId) -> Result<usize, ServiceOrderError> {
        self.inner
            .iter()
            .position(|service_order| &service_order.id == id)
            .ok_or_else(|| ServiceOrderError::NotFound(id.clone()))
    }
}

fn require_text(order_field: OrderField, value: &str) -> Result<(), ServiceOrderError> {
    if value.trim().is_empty() {
        return Err(ServiceOrderError::MissingField(order_field));
    }
    Ok(())
}
