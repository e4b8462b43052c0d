use super::entities::{DayOfWeek, Schedule};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleItem {
    pub schedule: Schedule,
    pub lesson_title: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleDay {
    pub day_of_week: DayOfWeek,
    pub day_name: String,
    /// dd.mm
    pub date: String,
    pub full_date: chrono::NaiveDate,
    pub is_today: bool,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct WeekScheduleResponse {
    pub group_id: i64,
    pub group_title: String,
    pub week_start: chrono::NaiveDate,
    pub prev_week: chrono::NaiveDate,
    pub next_week: chrono::NaiveDate,
    pub week_range: String,
    pub today: chrono::NaiveDate,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListResponse {
    pub items: Vec<ScheduleItem>,
}
