use chrono::NaiveDate;
use omni_configuration::UserInterface;
use omni_service_environment::ServiceEnvironment;
use omni_service_environment::error::ScheduleError;
use omni_service_environment::error::ServiceOrderError;
use omni_service_environment::image_reference::ImageReference;
use omni_service_environment::schedule::ScheduleItem;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::OrderPatch;
use omni_service_environment::service_order::ServiceOrder;
use omni_service_environment::service_order::Status;
use thiserror::Error;

use crate::form_shell::FormError;
use crate::form_shell::FormShell;
use crate::form_shell::FormSubmission;
use crate::modal::Modal;
use crate::order_form::OrderForm;
use crate::role::ContractorTab;
use crate::role::Role;
use crate::views::AdminDashboard;
use crate::views::ContractorView;
use crate::views::OrderDetail;
use crate::views::ScheduleFeed;
use crate::views::Screen;
use crate::views::TaskBoard;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewControllerError {
    #[error("this action belongs to the {required} view, the current role is {current}")]
    RoleNotPermitted { required: Role, current: Role },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    ServiceOrder(#[from] ServiceOrderError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("no service order is being inspected")]
    NothingInspected,
    #[error("service order {0} is already DONE")]
    AlreadyCompleted(OrderId),
    #[error("no deletion is awaiting confirmation")]
    NoPendingDeletion,
}

/// UI state of the dashboard: the active role, the contractor tab and the
/// current selection. Mutations go to the `ServiceEnvironment` handed in by
/// the caller, which stays responsible for persisting it afterwards.
pub struct ViewController {
    role: Role,
    contractor_tab: ContractorTab,
    order_form: FormShell<OrderForm>,
    detail_modal: Modal,
    inspected_order: Option<OrderId>,
    pending_deletion: Option<OrderId>,
    gallery_preview_size: usize,
}

impl ViewController {
    pub fn new(user_interface: &UserInterface) -> Self {
        Self {
            role: Role::default(),
            contractor_tab: ContractorTab::default(),
            order_form: FormShell::new(OrderForm::new(user_interface.default_priority)),
            detail_modal: Modal::default(),
            inspected_order: None,
            pending_deletion: None,
            gallery_preview_size: user_interface.gallery_preview_size,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn contractor_tab(&self) -> ContractorTab {
        self.contractor_tab
    }

    pub fn order_form(&self) -> &FormShell<OrderForm> {
        &self.order_form
    }

    pub fn detail_modal(&self) -> &Modal {
        &self.detail_modal
    }

    pub fn inspected_order(&self) -> Option<&OrderId> {
        self.inspected_order.as_ref()
    }

    pub fn pending_deletion(&self) -> Option<&OrderId> {
        self.pending_deletion.as_ref()
    }

    pub fn toggle_role(&mut self) -> Role {
        self.set_role(self.role.toggled());
        self.role
    }

    /// Switching persona discards the selection of the view being left.
    pub fn set_role(&mut self, role: Role) {
        if role == self.role {
            return;
        }
        self.role = role;
        self.contractor_tab = ContractorTab::default();
        self.order_form.close();
        self.detail_modal.close();
        self.inspected_order = None;
        self.pending_deletion = None;
    }

    pub fn select_tab(&mut self, contractor_tab: ContractorTab) -> Result<(), ViewControllerError> {
        self.require(Role::Contractor)?;
        self.contractor_tab = contractor_tab;
        Ok(())
    }

    pub fn open_create_form(&mut self) -> Result<(), ViewControllerError> {
        self.require(Role::Admin)?;
        self.order_form.open_create();
        Ok(())
    }

    pub fn open_edit_form(
        &mut self,
        service_environment: &ServiceEnvironment,
        id: &OrderId,
    ) -> Result<(), ViewControllerError> {
        self.require(Role::Admin)?;
        let service_order = service_environment
            .service_orders
            .get(id)
            .ok_or_else(|| ServiceOrderError::NotFound(id.clone()))?;
        self.order_form.open_edit(service_order);
        Ok(())
    }

    pub fn set_form_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ViewControllerError> {
        Ok(self.order_form.set_value(name, value)?)
    }

    pub fn cancel_form(&mut self) {
        self.order_form.close();
    }

    /// Dispatches the form to `create` or `update` and closes it on success.
    /// On failure the form stays open with what was entered.
    pub fn submit_order_form(
        &mut self,
        service_environment: &mut ServiceEnvironment,
    ) -> Result<ServiceOrder, ViewControllerError> {
        self.submit_order_form_with(service_environment, None, None)
    }

    /// Like `submit_order_form`, but an edit also carries a status and an
    /// evidence image. The form fields and these extras go through a single
    /// validated update, so a rejected edit leaves the order untouched.
    /// A create ignores the extras and always starts OPEN.
    pub fn submit_order_form_with(
        &mut self,
        service_environment: &mut ServiceEnvironment,
        status: Option<Status>,
        evidence_image: Option<ImageReference>,
    ) -> Result<ServiceOrder, ViewControllerError> {
        self.require(Role::Admin)?;
        let service_order = match self.order_form.submit()? {
            FormSubmission::Create(fields) => {
                service_environment.service_orders.create(fields)?.clone()
            }
            FormSubmission::Edit(id, fields) => {
                let order_patch = OrderPatch {
                    status,
                    evidence_image,
                    ..OrderPatch::from(fields)
                };
                service_environment
                    .service_orders
                    .update(&id, order_patch)?
                    .clone()
            }
        };
        self.order_form.close();
        Ok(service_order)
    }

    /// First half of a delete: nothing is removed until `confirm_delete`.
    pub fn request_delete(
        &mut self,
        service_environment: &ServiceEnvironment,
        id: &OrderId,
    ) -> Result<(), ViewControllerError> {
        self.require(Role::Admin)?;
        if service_environment.service_orders.get(id).is_none() {
            return Err(ServiceOrderError::NotFound(id.clone()).into());
        }
        self.pending_deletion = Some(id.clone());
        Ok(())
    }

    pub fn confirm_delete(
        &mut self,
        service_environment: &mut ServiceEnvironment,
    ) -> Result<Option<ServiceOrder>, ViewControllerError> {
        self.require(Role::Admin)?;
        let id = self
            .pending_deletion
            .take()
            .ok_or(ViewControllerError::NoPendingDeletion)?;
        Ok(service_environment.service_orders.delete(&id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    pub fn upload_schedule(
        &mut self,
        service_environment: &mut ServiceEnvironment,
        title: Option<String>,
        image_url: ImageReference,
        upload_date: NaiveDate,
    ) -> Result<ScheduleItem, ViewControllerError> {
        self.require(Role::Admin)?;
        Ok(service_environment
            .schedule_items
            .upload(title, image_url, upload_date)?
            .clone())
    }

    /// Opens the detail view of an order, titled with its id.
    pub fn inspect_order(
        &mut self,
        service_environment: &ServiceEnvironment,
        id: &OrderId,
    ) -> Result<OrderDetail, ViewControllerError> {
        self.require(Role::Contractor)?;
        let service_order = service_environment
            .service_orders
            .get(id)
            .ok_or_else(|| ServiceOrderError::NotFound(id.clone()))?;
        self.inspected_order = Some(id.clone());
        self.detail_modal.open(id.as_str());
        Ok(OrderDetail::new(service_order))
    }

    pub fn close_detail(&mut self) {
        self.inspected_order = None;
        self.detail_modal.close();
    }

    /// Completes the inspected OPEN order with the supplied photo and closes
    /// the detail view. DONE orders offer no mutation path.
    pub fn complete_inspected_order(
        &mut self,
        service_environment: &mut ServiceEnvironment,
        evidence_image: ImageReference,
    ) -> Result<ServiceOrder, ViewControllerError> {
        self.require(Role::Contractor)?;
        let id = self
            .inspected_order
            .clone()
            .ok_or(ViewControllerError::NothingInspected)?;
        let service_order = service_environment
            .service_orders
            .get(&id)
            .ok_or_else(|| ServiceOrderError::NotFound(id.clone()))?;
        if service_order.is_done() {
            return Err(ViewControllerError::AlreadyCompleted(id));
        }

        let service_order = service_environment
            .service_orders
            .complete(&id, Some(evidence_image))?
            .clone();
        self.close_detail();
        Ok(service_order)
    }

    pub fn admin_dashboard(&self, service_environment: &ServiceEnvironment) -> AdminDashboard {
        AdminDashboard::derive(service_environment, self.gallery_preview_size)
    }

    pub fn contractor_view(&self, service_environment: &ServiceEnvironment) -> ContractorView {
        match self.contractor_tab {
            ContractorTab::Tasks => ContractorView::Tasks(TaskBoard::derive(service_environment)),
            ContractorTab::Schedule => {
                ContractorView::Schedule(ScheduleFeed::derive(service_environment))
            }
        }
    }

    /// Detail of the inspected order; `None` once it was closed or the order
    /// no longer exists.
    pub fn order_detail(&self, service_environment: &ServiceEnvironment) -> Option<OrderDetail> {
        let id = self.inspected_order.as_ref()?;
        service_environment
            .service_orders
            .get(id)
            .map(OrderDetail::new)
    }

    pub fn screen(&self, service_environment: &ServiceEnvironment) -> Screen {
        match self.role {
            Role::Admin => Screen::Admin(self.admin_dashboard(service_environment)),
            Role::Contractor => Screen::Contractor {
                view: self.contractor_view(service_environment),
                detail: self.order_detail(service_environment),
            },
        }
    }

    fn require(&self, required: Role) -> Result<(), ViewControllerError> {
        if self.role != required {
            return Err(ViewControllerError::RoleNotPermitted {
                required,
                current: self.role,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use omni_service_environment::service_order::Priority;

    use super::*;
    use crate::form_shell::FormMode;
    use crate::order_form;
    use crate::views::DetailAction;

    fn admin() -> ViewController {
        ViewController::new(&UserInterface::default())
    }

    fn contractor() -> ViewController {
        let mut view_controller = admin();
        view_controller.toggle_role();
        view_controller
    }

    fn fill_order_form(view_controller: &mut ViewController) {
        view_controller
            .set_form_value(order_form::TITLE, "HVAC Maintenance")
            .unwrap();
        view_controller
            .set_form_value(order_form::LOCATION, "Building B")
            .unwrap();
        view_controller
            .set_form_value(order_form::DEADLINE, "2023-11-15")
            .unwrap();
        view_controller
            .set_form_value(order_form::PRIORITY, "HIGH")
            .unwrap();
        view_controller
            .set_form_value(order_form::DESCRIPTION, "Replace filters")
            .unwrap();
    }

    #[test]
    fn test_create_flow() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();

        view_controller.open_create_form().unwrap();
        assert_eq!(view_controller.order_form().values().get(order_form::PRIORITY), Some("MED"));
        fill_order_form(&mut view_controller);
        let service_order = view_controller
            .submit_order_form(&mut service_environment)
            .unwrap();

        assert!(!view_controller.order_form().is_open());
        assert_eq!(service_environment.service_orders.records()[0], service_order);
        assert_eq!(service_order.status(), Status::Open);
        assert_eq!(service_order.priority(), Priority::High);
    }

    #[test]
    fn test_failed_submit_keeps_form_open() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();

        view_controller.open_create_form().unwrap();
        view_controller
            .set_form_value(order_form::TITLE, "Roof inspection")
            .unwrap();
        let result = view_controller.submit_order_form(&mut service_environment);

        assert_eq!(
            result,
            Err(ViewControllerError::Form(FormError::MissingField(order_form::LOCATION)))
        );
        assert!(view_controller.order_form().is_open());
        assert_eq!(
            view_controller.order_form().values().get(order_form::TITLE),
            Some("Roof inspection")
        );
        assert_eq!(service_environment.service_orders.len(), 3);
    }

    #[test]
    fn test_edit_flow_preserves_status_and_evidence() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();
        let id = OrderId::from("OS-1003");

        view_controller
            .open_edit_form(&service_environment, &id)
            .unwrap();
        assert_eq!(view_controller.order_form().mode(), &FormMode::Edit(id.clone()));
        assert_eq!(
            view_controller.order_form().values().get(order_form::TITLE),
            Some("Plumbing Leak")
        );
        view_controller
            .set_form_value(order_form::PRIORITY, "LOW")
            .unwrap();
        let service_order = view_controller
            .submit_order_form(&mut service_environment)
            .unwrap();

        assert_eq!(service_order.priority(), Priority::Low);
        assert_eq!(service_order.status(), Status::Done);
        assert_eq!(
            service_order.evidence_image(),
            Some(&ImageReference::from("https://picsum.photos/200/200"))
        );
        assert_eq!(service_environment.service_orders.records()[2], service_order);
    }

    #[test]
    fn test_rejected_edit_leaves_order_untouched() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();
        let before = service_environment.service_orders.records().to_vec();

        view_controller
            .open_edit_form(&service_environment, &OrderId::from("OS-1003"))
            .unwrap();
        view_controller
            .set_form_value(order_form::TITLE, "Reopened leak")
            .unwrap();
        let error = view_controller
            .submit_order_form_with(&mut service_environment, Some(Status::Open), None)
            .unwrap_err();

        assert_eq!(
            error,
            ViewControllerError::ServiceOrder(ServiceOrderError::StatusRegression(
                OrderId::from("OS-1003")
            ))
        );
        assert_eq!(service_environment.service_orders.records(), before.as_slice());
        assert!(view_controller.order_form().is_open());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();
        let id = OrderId::from("OS-1002");

        view_controller
            .request_delete(&service_environment, &id)
            .unwrap();
        assert_eq!(service_environment.service_orders.len(), 3);
        view_controller.cancel_delete();
        assert_eq!(
            view_controller.confirm_delete(&mut service_environment),
            Err(ViewControllerError::NoPendingDeletion)
        );

        view_controller
            .request_delete(&service_environment, &id)
            .unwrap();
        let removed = view_controller
            .confirm_delete(&mut service_environment)
            .unwrap();

        assert_eq!(removed.map(|service_order| service_order.id().clone()), Some(id));
        assert_eq!(service_environment.service_orders.len(), 2);
    }

    #[test]
    fn test_role_permissions() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = contractor();

        assert_eq!(
            view_controller.open_create_form(),
            Err(ViewControllerError::RoleNotPermitted {
                required: Role::Admin,
                current: Role::Contractor,
            })
        );
        assert!(view_controller
            .upload_schedule(
                &mut service_environment,
                None,
                ImageReference::from("data:image/png;base64,AA=="),
                NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
            )
            .is_err());

        let mut view_controller = admin();
        assert!(view_controller
            .inspect_order(&service_environment, &OrderId::from("OS-1001"))
            .is_err());
        assert!(view_controller.select_tab(ContractorTab::Schedule).is_err());
    }

    #[test]
    fn test_contractor_completion_flow() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = contractor();
        let id = OrderId::from("OS-1001");
        let evidence_image = ImageReference::from("data:image/jpeg;base64,/9j/4AAQ");

        let order_detail = view_controller
            .inspect_order(&service_environment, &id)
            .unwrap();
        assert_eq!(order_detail.action, DetailAction::AwaitEvidence);
        assert_eq!(view_controller.detail_modal().title(), "OS-1001");

        let service_order = view_controller
            .complete_inspected_order(&mut service_environment, evidence_image.clone())
            .unwrap();

        assert_eq!(service_order.status(), Status::Done);
        assert_eq!(service_order.evidence_image(), Some(&evidence_image));
        assert!(view_controller.inspected_order().is_none());
        assert!(!view_controller.detail_modal().is_open());
    }

    #[test]
    fn test_done_order_has_no_mutation_path() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = contractor();
        let id = OrderId::from("OS-1003");

        view_controller
            .inspect_order(&service_environment, &id)
            .unwrap();
        let result = view_controller.complete_inspected_order(
            &mut service_environment,
            ImageReference::from("data:image/png;base64,AA=="),
        );

        assert_eq!(result, Err(ViewControllerError::AlreadyCompleted(id.clone())));
        assert_eq!(
            service_environment
                .service_orders
                .get(&id)
                .unwrap()
                .evidence_image(),
            Some(&ImageReference::from("https://picsum.photos/200/200"))
        );
    }

    #[test]
    fn test_complete_without_selection() {
        let mut service_environment = ServiceEnvironment::seeded();
        let mut view_controller = contractor();

        assert_eq!(
            view_controller.complete_inspected_order(
                &mut service_environment,
                ImageReference::from("data:image/png;base64,AA==")
            ),
            Err(ViewControllerError::NothingInspected)
        );
    }

    #[test]
    fn test_screen_follows_role_and_tab() {
        let service_environment = ServiceEnvironment::seeded();
        let mut view_controller = admin();

        assert!(matches!(
            view_controller.screen(&service_environment),
            Screen::Admin(_)
        ));

        view_controller.toggle_role();
        view_controller.select_tab(ContractorTab::Schedule).unwrap();
        match view_controller.screen(&service_environment) {
            Screen::Contractor {
                view: ContractorView::Schedule(schedule_feed),
                detail: None,
            } => assert_eq!(schedule_feed.items.len(), 1),
            screen => panic!("unexpected screen {:?}", screen),
        }
    }

    #[test]
    fn test_toggling_role_resets_selection() {
        let service_environment = ServiceEnvironment::seeded();
        let mut view_controller = contractor();
        view_controller.select_tab(ContractorTab::Schedule).unwrap();
        view_controller
            .inspect_order(&service_environment, &OrderId::from("OS-1002"))
            .unwrap();

        view_controller.toggle_role();
        view_controller.toggle_role();

        assert_eq!(view_controller.contractor_tab(), ContractorTab::Tasks);
        assert!(view_controller.inspected_order().is_none());
        assert!(view_controller.order_detail(&service_environment).is_none());
    }
}
