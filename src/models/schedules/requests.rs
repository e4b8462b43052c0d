use super::entities::DayOfWeek;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub group_id: i64,
    pub lesson_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListParams {
    pub group_id: Option<i64>,
}

/// 周视图查询，`week` 为 YYYY-MM-DD 格式的周一
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct WeekQuery {
    pub week: Option<String>,
}
