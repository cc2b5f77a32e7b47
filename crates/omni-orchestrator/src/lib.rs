pub mod logging;
pub mod model_initializers;
pub mod persistent_store;

use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use chrono::NaiveDate;
use chrono::Utc;
use omni_configuration::SystemConfigurations;
use omni_contracts::SystemMessages;
use omni_contracts::SystemResponses;
use omni_contracts::admin::AdminRequest;
use omni_contracts::admin::AdminResponse;
use omni_contracts::admin::OrderInput;
use omni_contracts::contractor::ContractorRequest;
use omni_contracts::contractor::ContractorResponse;
use omni_service_environment::ServiceEnvironment;
use omni_service_environment::image_reference::ImageReference;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::ServiceOrder;
use omni_service_environment::service_order::Status;
use omni_user_interface::ContractorTab;
use omni_user_interface::ViewController;
use omni_user_interface::ViewControllerError;
use omni_user_interface::order_form;
use tracing::Level;
use tracing::event;
use tracing::instrument;

use self::persistent_store::FileStorage;
use self::persistent_store::KeyValueStorage;
use self::persistent_store::PersistentStore;

/// Composition root: owns the repositories, the UI state and the store, and
/// turns each front-end message into one synchronous state transition. Every
/// mutation is written through to the store before the response is returned.
pub struct Orchestrator<S> {
    pub service_environment: ServiceEnvironment,
    pub view_controller: ViewController,
    pub persistent_store: PersistentStore<S>,
    pub system_configurations: Arc<ArcSwap<SystemConfigurations>>,
}

impl Orchestrator<FileStorage> {
    pub fn new(system_configurations: Arc<ArcSwap<SystemConfigurations>>) -> Self {
        let storage_directory = system_configurations
            .load()
            .persistence
            .storage_directory
            .clone();
        Self::with_storage(system_configurations, FileStorage::new(storage_directory))
    }
}

impl<S: KeyValueStorage> Orchestrator<S> {
    pub fn with_storage(
        system_configurations: Arc<ArcSwap<SystemConfigurations>>,
        storage: S,
    ) -> Self {
        let configurations = system_configurations.load();
        let persistent_store = PersistentStore::new(storage, &configurations.persistence);
        let service_environment =
            model_initializers::initialize_service_environment(&configurations, &persistent_store);
        let view_controller = ViewController::new(&configurations.user_interface);

        Self {
            service_environment,
            view_controller,
            persistent_store,
            system_configurations: Arc::clone(&system_configurations),
        }
    }

    #[instrument(level = "info", skip_all, fields(role = %system_message.role()))]
    pub fn handle(&mut self, system_message: SystemMessages) -> Result<SystemResponses> {
        self.view_controller.set_role(system_message.role());

        match system_message {
            SystemMessages::Admin(admin_request) => {
                Ok(SystemResponses::Admin(self.handle_admin(admin_request)?))
            }
            SystemMessages::Contractor(contractor_request) => Ok(SystemResponses::Contractor(
                self.handle_contractor(contractor_request)?,
            )),
        }
    }

    fn handle_admin(&mut self, admin_request: AdminRequest) -> Result<AdminResponse> {
        match admin_request {
            AdminRequest::Dashboard => Ok(AdminResponse::Dashboard(
                self.view_controller.admin_dashboard(&self.service_environment),
            )),
            AdminRequest::ListOrders(order_filter) => Ok(AdminResponse::Orders(
                self.service_environment
                    .service_orders
                    .list(&order_filter)
                    .into_iter()
                    .cloned()
                    .collect(),
            )),
            AdminRequest::Create(order_input) => {
                self.view_controller.open_create_form()?;
                let service_order = self.submit_order_input(order_input, None, None)?;
                event!(Level::INFO, service_order = %service_order, "created service order");
                self.persist_service_orders();
                Ok(AdminResponse::Created(service_order))
            }
            AdminRequest::Edit {
                id,
                order_input,
                status,
                evidence_image,
            } => {
                let service_order = self.edit(&id, order_input, status, evidence_image)?;
                event!(Level::INFO, service_order = %service_order, "updated service order");
                self.persist_service_orders();
                Ok(AdminResponse::Updated(service_order))
            }
            AdminRequest::Delete { id, confirmed } => {
                self.view_controller
                    .request_delete(&self.service_environment, &id)
                    .or_else(|error| match error {
                        // Unknown ids are a no-op delete, not a failure.
                        ViewControllerError::ServiceOrder(_) => Ok(()),
                        error => Err(error),
                    })?;
                if self.view_controller.pending_deletion().is_none() {
                    event!(Level::INFO, %id, "no such service order to delete");
                    return Ok(AdminResponse::NothingDeleted(id));
                }
                if !confirmed {
                    self.view_controller.cancel_delete();
                    return Ok(AdminResponse::DeletionCancelled(id));
                }

                self.view_controller
                    .confirm_delete(&mut self.service_environment)?;
                event!(Level::INFO, %id, "deleted service order");
                self.persist_service_orders();
                Ok(AdminResponse::Deleted(id))
            }
            AdminRequest::UploadSchedule { title, image_url } => {
                let schedule_item = self.view_controller.upload_schedule(
                    &mut self.service_environment,
                    title,
                    image_url,
                    today(),
                )?;
                event!(Level::INFO, id = %schedule_item.id(), "uploaded schedule item");
                self.persistent_store
                    .save_schedule_items(self.service_environment.schedule_items.list());
                Ok(AdminResponse::ScheduleUploaded(schedule_item))
            }
        }
    }

    fn handle_contractor(
        &mut self,
        contractor_request: ContractorRequest,
    ) -> Result<ContractorResponse> {
        match contractor_request {
            ContractorRequest::Tasks => {
                self.view_controller.select_tab(ContractorTab::Tasks)?;
                Ok(ContractorResponse::View(
                    self.view_controller.contractor_view(&self.service_environment),
                ))
            }
            ContractorRequest::Schedule => {
                self.view_controller.select_tab(ContractorTab::Schedule)?;
                Ok(ContractorResponse::View(
                    self.view_controller.contractor_view(&self.service_environment),
                ))
            }
            ContractorRequest::Show(id) => Ok(ContractorResponse::Detail(
                self.view_controller
                    .inspect_order(&self.service_environment, &id)?,
            )),
            ContractorRequest::Complete { id, evidence_image } => {
                self.view_controller
                    .inspect_order(&self.service_environment, &id)?;
                let service_order = self
                    .view_controller
                    .complete_inspected_order(&mut self.service_environment, evidence_image)?;
                event!(Level::INFO, id = %service_order.id(), "completed service order");
                self.persist_service_orders();
                Ok(ContractorResponse::Completed(service_order))
            }
        }
    }

    /// Edits run through the pre-filled form. Status and evidence are not
    /// form fields; they ride along in the same update so a rejected edit
    /// changes nothing.
    fn edit(
        &mut self,
        id: &OrderId,
        order_input: OrderInput,
        status: Option<Status>,
        evidence_image: Option<ImageReference>,
    ) -> Result<ServiceOrder> {
        self.view_controller
            .open_edit_form(&self.service_environment, id)?;
        self.submit_order_input(order_input, status, evidence_image)
    }

    fn submit_order_input(
        &mut self,
        order_input: OrderInput,
        status: Option<Status>,
        evidence_image: Option<ImageReference>,
    ) -> Result<ServiceOrder> {
        let values = [
            (order_form::TITLE, order_input.title),
            (order_form::LOCATION, order_input.location),
            (order_form::DEADLINE, order_input.deadline),
            (
                order_form::PRIORITY,
                order_input.priority.map(|priority| priority.to_string()),
            ),
            (order_form::DESCRIPTION, order_input.description),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                if let Err(error) = self.view_controller.set_form_value(name, value) {
                    self.view_controller.cancel_form();
                    return Err(error.into());
                }
            }
        }

        let result = self.view_controller.submit_order_form_with(
            &mut self.service_environment,
            status,
            evidence_image,
        );
        if result.is_err() {
            self.view_controller.cancel_form();
        }
        Ok(result?)
    }

    fn persist_service_orders(&mut self) {
        self.persistent_store
            .save_service_orders(self.service_environment.service_orders.records());
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use omni_service_environment::service_order::Priority;
    use omni_user_interface::views::ContractorView;
    use omni_user_interface::views::DetailAction;

    use super::*;
    use crate::persistent_store::MemoryStorage;

    fn orchestrator() -> Orchestrator<MemoryStorage> {
        Orchestrator::with_storage(
            Arc::new(ArcSwap::from_pointee(SystemConfigurations::default())),
            MemoryStorage::default(),
        )
    }

    fn hvac_input() -> OrderInput {
        OrderInput {
            title: Some("HVAC Maintenance".to_string()),
            location: Some("Building B".to_string()),
            deadline: Some("2023-11-15".to_string()),
            priority: Some(Priority::High),
            description: Some("Replace filters".to_string()),
        }
    }

    fn persisted_orders(orchestrator: &Orchestrator<MemoryStorage>) -> Vec<ServiceOrder> {
        orchestrator
            .persistent_store
            .load_service_orders()
            .unwrap_or_default()
    }

    #[test]
    fn test_create_persists_orders() {
        let mut orchestrator = orchestrator();

        let system_responses = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::Create(hvac_input())))
            .unwrap();

        let SystemResponses::Admin(AdminResponse::Created(service_order)) = system_responses else {
            panic!("expected a created order");
        };
        assert_eq!(persisted_orders(&orchestrator)[0], service_order);
        assert_eq!(persisted_orders(&orchestrator).len(), 4);
        assert!(orchestrator.persistent_store.load_schedule_items().is_none());
    }

    #[test]
    fn test_create_with_missing_field_changes_nothing() {
        let mut orchestrator = orchestrator();
        let mut order_input = hvac_input();
        order_input.deadline = None;

        let error = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::Create(order_input)))
            .unwrap_err();

        assert!(error.to_string().contains("deadline"));
        assert_eq!(orchestrator.service_environment.service_orders.len(), 3);
        assert!(orchestrator.persistent_store.load_service_orders().is_none());
    }

    #[test]
    fn test_edit_with_status_and_evidence() {
        let mut orchestrator = orchestrator();
        let evidence_image = ImageReference::from("data:image/png;base64,AA==");

        let system_responses = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::Edit {
                id: OrderId::from("OS-1002"),
                order_input: OrderInput {
                    title: Some("Electrical Repair, east wing".to_string()),
                    ..OrderInput::default()
                },
                status: Some(Status::Done),
                evidence_image: Some(evidence_image.clone()),
            }))
            .unwrap();

        let SystemResponses::Admin(AdminResponse::Updated(service_order)) = system_responses else {
            panic!("expected an updated order");
        };
        assert_eq!(service_order.title(), "Electrical Repair, east wing");
        assert_eq!(service_order.location(), "Building C, Floor 2");
        assert!(service_order.is_done());
        assert_eq!(service_order.evidence_image(), Some(&evidence_image));
        assert_eq!(persisted_orders(&orchestrator)[1], service_order);
    }

    #[test]
    fn test_rejected_edits_change_nothing() {
        let mut orchestrator = orchestrator();
        let rejected_edits = [
            (OrderId::from("OS-1003"), Some(Status::Open), None),
            (
                OrderId::from("OS-1001"),
                None,
                Some(ImageReference::from("data:image/png;base64,AA==")),
            ),
        ];

        for (id, status, evidence_image) in rejected_edits {
            let error = orchestrator
                .handle(SystemMessages::Admin(AdminRequest::Edit {
                    id: id.clone(),
                    order_input: OrderInput {
                        title: Some("Renamed".to_string()),
                        ..OrderInput::default()
                    },
                    status,
                    evidence_image,
                }))
                .unwrap_err();

            assert!(matches!(
                error.downcast_ref::<ViewControllerError>(),
                Some(ViewControllerError::ServiceOrder(_))
            ));
            assert!(!orchestrator.view_controller.order_form().is_open());
        }

        assert_eq!(
            orchestrator.service_environment.service_orders.records(),
            omni_service_environment::seed::service_orders().as_slice()
        );
        assert!(orchestrator.persistent_store.load_service_orders().is_none());
    }

    #[test]
    fn test_unconfirmed_delete_keeps_order() {
        let mut orchestrator = orchestrator();
        let id = OrderId::from("OS-1002");

        let system_responses = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::Delete {
                id: id.clone(),
                confirmed: false,
            }))
            .unwrap();

        assert_eq!(
            system_responses,
            SystemResponses::Admin(AdminResponse::DeletionCancelled(id))
        );
        assert_eq!(orchestrator.service_environment.service_orders.len(), 3);
    }

    #[test]
    fn test_delete_unknown_is_a_no_op() {
        let mut orchestrator = orchestrator();
        let id = OrderId::from("OS-9999");

        let system_responses = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::Delete {
                id: id.clone(),
                confirmed: true,
            }))
            .unwrap();

        assert_eq!(
            system_responses,
            SystemResponses::Admin(AdminResponse::NothingDeleted(id))
        );
        assert_eq!(orchestrator.service_environment.service_orders.len(), 3);
    }

    #[test]
    fn test_upload_uses_default_title() {
        let mut orchestrator = orchestrator();
        let day_before = Utc::now().date_naive();

        let system_responses = orchestrator
            .handle(SystemMessages::Admin(AdminRequest::UploadSchedule {
                title: None,
                image_url: ImageReference::from("data:image/png;base64,AA=="),
            }))
            .unwrap();

        let SystemResponses::Admin(AdminResponse::ScheduleUploaded(schedule_item)) =
            system_responses
        else {
            panic!("expected an uploaded schedule item");
        };
        let date = schedule_item.date();
        assert!(day_before <= date && date <= Utc::now().date_naive());
        assert_eq!(
            schedule_item.title(),
            format!("Schedule - {}", schedule_item.date().format("%Y-%m-%d"))
        );
        assert_eq!(
            orchestrator
                .persistent_store
                .load_schedule_items()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_contractor_completes_order() {
        let mut orchestrator = orchestrator();
        let evidence_image = ImageReference::from("data:image/jpeg;base64,/9j/");

        orchestrator
            .handle(SystemMessages::Contractor(ContractorRequest::Complete {
                id: OrderId::from("OS-1001"),
                evidence_image: evidence_image.clone(),
            }))
            .unwrap();

        let persisted = persisted_orders(&orchestrator);
        assert!(persisted[0].is_done());
        assert_eq!(persisted[0].evidence_image(), Some(&evidence_image));
        assert!(orchestrator.view_controller.inspected_order().is_none());
    }

    #[test]
    fn test_contractor_cannot_complete_done_order() {
        let mut orchestrator = orchestrator();

        let error = orchestrator
            .handle(SystemMessages::Contractor(ContractorRequest::Complete {
                id: OrderId::from("OS-1003"),
                evidence_image: ImageReference::from("data:image/png;base64,AA=="),
            }))
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<ViewControllerError>(),
            Some(&ViewControllerError::AlreadyCompleted(OrderId::from("OS-1003")))
        );
        assert!(orchestrator.persistent_store.load_service_orders().is_none());
    }

    #[test]
    fn test_contractor_views() {
        let mut orchestrator = orchestrator();

        let tasks = orchestrator
            .handle(SystemMessages::Contractor(ContractorRequest::Tasks))
            .unwrap();
        let detail = orchestrator
            .handle(SystemMessages::Contractor(ContractorRequest::Show(
                OrderId::from("OS-1003"),
            )))
            .unwrap();

        assert!(matches!(
            tasks,
            SystemResponses::Contractor(ContractorResponse::View(ContractorView::Tasks(_)))
        ));
        let SystemResponses::Contractor(ContractorResponse::Detail(order_detail)) = detail else {
            panic!("expected an order detail");
        };
        assert!(matches!(order_detail.action, DetailAction::Completed { .. }));
    }
}
