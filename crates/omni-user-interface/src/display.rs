//! Terminal rendering of the derived views.

use std::fmt;

use colored::ColoredString;
use colored::Colorize;
use omni_service_environment::schedule::ScheduleItem;
use omni_service_environment::service_order::Priority;
use omni_service_environment::service_order::ServiceOrder;
use omni_service_environment::service_order::Status;

use crate::views::AdminDashboard;
use crate::views::ContractorView;
use crate::views::DetailAction;
use crate::views::OrderDetail;
use crate::views::OrderStatistics;
use crate::views::ScheduleFeed;
use crate::views::Screen;
use crate::views::TaskBoard;

pub const NO_ORDERS: &str = "No orders found. Create one to get started.";
pub const NO_SCHEDULES: &str = "No schedules uploaded by Admin yet.";
pub const ALL_CAUGHT_UP: &str = "All Caught Up!";
pub const NO_OPEN_ORDERS: &str = "No open service orders assigned.";
pub const EVIDENCE_REQUEST: &str =
    "Please upload a photo of the completed work to close this order.";

pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::High => label.red().bold(),
        Priority::Med => label.truecolor(255, 165, 0).bold(),
        Priority::Low => label.green().bold(),
    }
}

pub fn status_badge(status: Status) -> ColoredString {
    let label = status.to_string();
    match status {
        Status::Done => label.green(),
        Status::Open => label.blue(),
    }
}

/// One line per order, as in the dashboard table and the task list.
pub struct OrderRow<'a>(pub &'a ServiceOrder);

impl fmt::Display for OrderRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let service_order = self.0;
        write!(
            f,
            "{:<8} {:<28} {:<24} {:>6}  {:<4}  due {}",
            service_order.id().as_str().bold(),
            service_order.title(),
            service_order.location().dimmed(),
            priority_badge(service_order.priority()),
            status_badge(service_order.status()),
            service_order.deadline().format("%Y-%m-%d"),
        )
    }
}

pub struct ScheduleRow<'a>(pub &'a ScheduleItem);

impl fmt::Display for ScheduleRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let schedule_item = self.0;
        write!(
            f,
            "{:<8} {:<28} {}  {}",
            schedule_item.id().as_str().bold(),
            schedule_item.title(),
            schedule_item.date().format("%Y-%m-%d").to_string().dimmed(),
            schedule_item.image_url(),
        )
    }
}

impl fmt::Display for OrderStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Total Orders: {}  Open: {}  High Priority: {}  Completed: {}",
            self.total.to_string().bold(),
            self.open.to_string().blue().bold(),
            self.high_priority_open.to_string().red().bold(),
            self.done.to_string().green().bold(),
        )
    }
}

impl fmt::Display for AdminDashboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", "Dashboard".bold().underline())?;
        writeln!(f, "{}", self.statistics)?;
        writeln!(f)?;

        if self.orders.is_empty() {
            writeln!(f, "{}", NO_ORDERS.dimmed())?;
        }
        for service_order in &self.orders {
            writeln!(f, "{}", OrderRow(service_order))?;
        }

        // The gallery is left out entirely while nothing has been posted.
        if !self.schedule_preview.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", "Latest Schedules".bold())?;
            for schedule_item in &self.schedule_preview {
                writeln!(f, "{}", ScheduleRow(schedule_item))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TaskBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.all_caught_up {
            writeln!(f, "{}", ALL_CAUGHT_UP.green().bold())?;
            writeln!(f, "{}", NO_OPEN_ORDERS.dimmed())?;
        }
        for task_card in &self.cards {
            if task_card.emphasized {
                writeln!(f, "{}", OrderRow(&task_card.order))?;
            } else {
                let muted = format!("{}", OrderRow(&task_card.order));
                writeln!(f, "{}  {}", muted.dimmed(), "COMPLETED".green())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleFeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "{}", NO_SCHEDULES.dimmed());
        }
        for schedule_item in &self.items {
            writeln!(f, "{}", ScheduleRow(schedule_item))?;
        }
        Ok(())
    }
}

impl fmt::Display for ContractorView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContractorView::Tasks(task_board) => {
                writeln!(f, "{}", "My Tasks".bold().underline())?;
                write!(f, "{}", task_board)
            }
            ContractorView::Schedule(schedule_feed) => {
                writeln!(f, "{}", "Schedule".bold().underline())?;
                write!(f, "{}", schedule_feed)
            }
        }
    }
}

impl fmt::Display for OrderDetail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let service_order = &self.order;
        writeln!(f, "{}", service_order.id().as_str().bold().underline())?;
        writeln!(f, "{}", service_order.title().bold())?;
        writeln!(f, "Location:    {}", service_order.location())?;
        writeln!(f, "Deadline:    {}", service_order.deadline().format("%Y-%m-%d"))?;
        writeln!(f, "Priority:    {}", priority_badge(service_order.priority()))?;
        writeln!(f, "Status:      {}", status_badge(service_order.status()))?;
        writeln!(f, "Description: {}", service_order.description())?;

        match &self.action {
            DetailAction::AwaitEvidence => writeln!(f, "{}", EVIDENCE_REQUEST.yellow()),
            DetailAction::Completed { evidence_image } => {
                writeln!(f, "{}", "Work Completed".green().bold())?;
                match evidence_image {
                    Some(evidence_image) => writeln!(f, "Evidence:    {}", evidence_image),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Screen::Admin(admin_dashboard) => write!(f, "{}", admin_dashboard),
            Screen::Contractor { view, detail } => {
                write!(f, "{}", view)?;
                if let Some(order_detail) = detail {
                    writeln!(f)?;
                    write!(f, "{}", order_detail)?;
                }
                Ok(())
            }
        }
    }
}
