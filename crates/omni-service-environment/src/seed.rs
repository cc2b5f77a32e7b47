//! Out-of-the-box records used when nothing has been persisted yet.

use chrono::NaiveDate;

use crate::image_reference::ImageReference;
use crate::schedule::ScheduleItem;
use crate::schedule::ScheduleItemId;
use crate::service_order::OrderFields;
use crate::service_order::OrderId;
use crate::service_order::Priority;
use crate::service_order::ServiceOrder;

pub fn service_orders() -> Vec<ServiceOrder> {
    vec![
        ServiceOrder::new(
            OrderId::from("OS-1001"),
            OrderFields::new(
                "HVAC Maintenance",
                "Routine checkup for Unit 4B",
                "Building A, Roof",
                Priority::High,
                date(2023, 11, 15),
            ),
        ),
        ServiceOrder::new(
            OrderId::from("OS-1002"),
            OrderFields::new(
                "Electrical Repair",
                "Fix flickering lights in hallway",
                "Building C, Floor 2",
                Priority::Med,
                date(2023, 11, 16),
            ),
        ),
        ServiceOrder::new(
            OrderId::from("OS-1003"),
            OrderFields::new(
                "Plumbing Leak",
                "Emergency leak in restroom",
                "Lobby",
                Priority::High,
                date(2023, 11, 10),
            ),
        )
        .completed(Some(ImageReference::from("https://picsum.photos/200/200"))),
    ]
}

pub fn schedule_items() -> Vec<ScheduleItem> {
    vec![ScheduleItem::new(
        ScheduleItemId::new("SCH-01"),
        "Week 45 Overview",
        date(2023, 11, 1),
        ImageReference::from("https://picsum.photos/800/600"),
    )]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
