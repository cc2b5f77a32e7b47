use std::str::FromStr;

use chrono::NaiveDate;
use omni_service_environment::service_order::OrderFields;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::Priority;
use omni_service_environment::service_order::ServiceOrder;

use crate::form_shell::FieldKind;
use crate::form_shell::FieldSpec;
use crate::form_shell::FormError;
use crate::form_shell::FormModel;
use crate::form_shell::FormValues;

pub const TITLE: &str = "title";
pub const LOCATION: &str = "location";
pub const DEADLINE: &str = "deadline";
pub const PRIORITY: &str = "priority";
pub const DESCRIPTION: &str = "description";

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

const ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: TITLE,
        label: "Order Title",
        kind: FieldKind::Text,
        placeholder: Some("e.g. HVAC Repair"),
    },
    FieldSpec {
        name: LOCATION,
        label: "Location",
        kind: FieldKind::Text,
        placeholder: Some("e.g. Building A"),
    },
    FieldSpec {
        name: DEADLINE,
        label: "Deadline",
        kind: FieldKind::Date,
        placeholder: None,
    },
    FieldSpec {
        name: PRIORITY,
        label: "Priority Level",
        kind: FieldKind::Choice(&["LOW", "MED", "HIGH"]),
        placeholder: None,
    },
    FieldSpec {
        name: DESCRIPTION,
        label: "Description",
        kind: FieldKind::TextArea,
        placeholder: Some("Detailed instructions..."),
    },
];

/// The admin create/edit form for service orders.
#[derive(Clone, Debug)]
pub struct OrderForm {
    default_priority: Priority,
}

impl OrderForm {
    pub fn new(default_priority: Priority) -> Self {
        Self { default_priority }
    }
}

impl FormModel for OrderForm {
    type Target = ServiceOrder;
    type Key = OrderId;
    type Output = OrderFields;

    fn create_title(&self) -> String {
        "Create Service Order".to_string()
    }

    fn edit_title(&self, _target: &ServiceOrder) -> String {
        "Edit Service Order".to_string()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        ORDER_FIELDS
    }

    fn defaults(&self) -> FormValues {
        let mut values = FormValues::default();
        values.insert(PRIORITY, self.default_priority.to_string());
        values
    }

    fn prefill(&self, target: &ServiceOrder) -> FormValues {
        let mut values = FormValues::default();
        values.insert(TITLE, target.title());
        values.insert(LOCATION, target.location());
        values.insert(DEADLINE, target.deadline().format(DEADLINE_FORMAT).to_string());
        values.insert(PRIORITY, target.priority().to_string());
        values.insert(DESCRIPTION, target.description());
        values
    }

    fn key_of(&self, target: &ServiceOrder) -> OrderId {
        target.id().clone()
    }

    fn parse(&self, values: &FormValues) -> Result<OrderFields, FormError> {
        let title = values.required(TITLE)?;
        let location = values.required(LOCATION)?;
        let deadline = values.required(DEADLINE)?;
        let priority = values.required(PRIORITY)?;
        let description = values.required(DESCRIPTION)?;

        let deadline = NaiveDate::parse_from_str(deadline, DEADLINE_FORMAT).map_err(|_| {
            FormError::InvalidValue {
                field: DEADLINE,
                value: deadline.to_string(),
            }
        })?;
        let priority = Priority::from_str(priority).map_err(|_| FormError::InvalidValue {
            field: PRIORITY,
            value: priority.to_string(),
        })?;

        Ok(OrderFields::new(title, description, location, priority, deadline))
    }
}

#[cfg(test)]
mod tests {
    use omni_service_environment::seed;

    use super::*;
    use crate::form_shell::FormShell;
    use crate::form_shell::FormSubmission;

    fn filled_values() -> FormValues {
        let mut values = FormValues::default();
        values.insert(TITLE, "HVAC Maintenance");
        values.insert(LOCATION, "Building B");
        values.insert(DEADLINE, "2023-11-15");
        values.insert(PRIORITY, "HIGH");
        values.insert(DESCRIPTION, "Replace filters");
        values
    }

    #[test]
    fn test_create_defaults_select_medium_priority() {
        let order_form = OrderForm::new(Priority::Med);

        let values = order_form.defaults();

        assert_eq!(values.get(PRIORITY), Some("MED"));
        assert_eq!(values.get(TITLE), None);
    }

    #[test]
    fn test_prefill_covers_every_mutable_field() {
        let order_form = OrderForm::new(Priority::Med);
        let service_order = &seed::service_orders()[1];

        let values = order_form.prefill(service_order);

        assert_eq!(values.get(TITLE), Some("Electrical Repair"));
        assert_eq!(values.get(LOCATION), Some("Building C, Floor 2"));
        assert_eq!(values.get(DEADLINE), Some("2023-11-16"));
        assert_eq!(values.get(PRIORITY), Some("MED"));
        assert_eq!(values.get(DESCRIPTION), Some("Fix flickering lights in hallway"));
        assert_eq!(order_form.parse(&values).unwrap(), service_order.fields());
    }

    #[test]
    fn test_parse_valid_values() {
        let order_form = OrderForm::new(Priority::Med);

        let fields = order_form.parse(&filled_values()).unwrap();

        assert_eq!(fields.title, "HVAC Maintenance");
        assert_eq!(fields.priority, Priority::High);
        assert_eq!(fields.deadline, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
    }

    #[test]
    fn test_parse_rejects_missing_and_malformed_values() {
        let order_form = OrderForm::new(Priority::Med);

        let mut missing = filled_values();
        missing.insert(DESCRIPTION, " ");
        let mut bad_date = filled_values();
        bad_date.insert(DEADLINE, "15/11/2023");
        let mut bad_priority = filled_values();
        bad_priority.insert(PRIORITY, "URGENT");

        assert_eq!(order_form.parse(&missing), Err(FormError::MissingField(DESCRIPTION)));
        assert_eq!(
            order_form.parse(&bad_date),
            Err(FormError::InvalidValue {
                field: DEADLINE,
                value: "15/11/2023".to_string()
            })
        );
        assert!(matches!(
            order_form.parse(&bad_priority),
            Err(FormError::InvalidValue { field: PRIORITY, .. })
        ));
    }

    #[test]
    fn test_shell_titles() {
        let mut form_shell = FormShell::new(OrderForm::new(Priority::Med));
        let service_order = &seed::service_orders()[0];

        form_shell.open_create();
        assert_eq!(form_shell.modal().title(), "Create Service Order");

        form_shell.open_edit(service_order);
        assert_eq!(form_shell.modal().title(), "Edit Service Order");
        assert_eq!(
            form_shell.submit().unwrap(),
            FormSubmission::Edit(service_order.id().clone(), service_order.fields())
        );
    }
}
