use colored::Colorize;
use omni_contracts::SystemResponses;
use omni_contracts::admin::AdminResponse;
use omni_contracts::contractor::ContractorResponse;
use omni_user_interface::display::NO_ORDERS;
use omni_user_interface::display::OrderRow;
use omni_user_interface::display::ScheduleRow;

/// Terminal text for a response, ending with a newline.
pub fn render(system_responses: &SystemResponses) -> String {
    match system_responses {
        SystemResponses::Admin(admin_response) => render_admin(admin_response),
        SystemResponses::Contractor(contractor_response) => render_contractor(contractor_response),
    }
}

fn render_admin(admin_response: &AdminResponse) -> String {
    match admin_response {
        AdminResponse::Dashboard(admin_dashboard) => admin_dashboard.to_string(),
        AdminResponse::Orders(service_orders) if service_orders.is_empty() => {
            format!("{}\n", NO_ORDERS.dimmed())
        }
        AdminResponse::Orders(service_orders) => service_orders
            .iter()
            .map(|service_order| format!("{}\n", OrderRow(service_order)))
            .collect(),
        AdminResponse::Created(service_order) => {
            format!("{} {}\n", "Created".green().bold(), OrderRow(service_order))
        }
        AdminResponse::Updated(service_order) => {
            format!("{} {}\n", "Updated".green().bold(), OrderRow(service_order))
        }
        AdminResponse::Deleted(id) => format!("{} {}\n", "Deleted".green().bold(), id),
        AdminResponse::NothingDeleted(id) => {
            format!("{}\n", format!("No service order {}", id).yellow())
        }
        AdminResponse::DeletionCancelled(id) => {
            format!("{}\n", format!("Kept service order {}", id).dimmed())
        }
        AdminResponse::ScheduleUploaded(schedule_item) => format!(
            "{} {}\n",
            "Uploaded".green().bold(),
            ScheduleRow(schedule_item)
        ),
    }
}

fn render_contractor(contractor_response: &ContractorResponse) -> String {
    match contractor_response {
        ContractorResponse::View(contractor_view) => contractor_view.to_string(),
        ContractorResponse::Detail(order_detail) => order_detail.to_string(),
        ContractorResponse::Completed(service_order) => format!(
            "{} {}\n",
            "Work Completed".green().bold(),
            OrderRow(service_order)
        ),
    }
}
