//! 课表存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{CourseHubError, Result};
use crate::models::schedules::{
    entities::Schedule, requests::CreateScheduleRequest, responses::ScheduleItem,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_schedule_impl(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        let model = ActiveModel {
            group_id: Set(req.group_id),
            lesson_id: Set(req.lesson_id),
            day_of_week: Set(req.day_of_week.to_string()),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created.into_schedule()),
            Err(e) if is_unique_violation(&e) => Err(CourseHubError::conflict(
                "The same lesson is already scheduled at this time",
            )),
            Err(e) => Err(CourseHubError::database_operation(format!(
                "创建课表失败: {e}"
            ))),
        }
    }

    pub async fn list_schedules_by_group_impl(&self, group_id: i64) -> Result<Vec<ScheduleItem>> {
        let schedules = Schedules::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课表失败: {e}")))?;

        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let lesson_ids: Vec<i64> = schedules.iter().map(|s| s.lesson_id).collect();
        let titles: HashMap<i64, String> = Lessons::find()
            .filter(LessonColumn::Id.is_in(lesson_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课时失败: {e}")))?
            .into_iter()
            .map(|l| (l.id, l.title))
            .collect();

        Ok(schedules
            .into_iter()
            .map(|m| {
                let lesson_title = titles.get(&m.lesson_id).cloned().unwrap_or_default();
                ScheduleItem {
                    schedule: m.into_schedule(),
                    lesson_title,
                }
            })
            .collect())
    }

    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除课表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
