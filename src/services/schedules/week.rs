//! 周课表计算

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::schedules::entities::DayOfWeek;
use crate::models::schedules::responses::{ScheduleDay, ScheduleItem};

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date)
}

// 上一周的周一到下一周的周日都必须在 chrono 的日期范围内
fn is_navigable(week_start: NaiveDate) -> bool {
    week_start.checked_sub_days(Days::new(7)).is_some()
        && week_start.checked_add_days(Days::new(13)).is_some()
}

/// 解析 `week` 参数；缺失、格式错误、不是周一或超出可翻页范围时回退到本周一
pub fn resolve_week_start(week: Option<&str>, today: NaiveDate) -> NaiveDate {
    week.and_then(|w| NaiveDate::parse_from_str(w.trim(), "%Y-%m-%d").ok())
        .filter(|d| d.weekday() == Weekday::Mon && is_navigable(*d))
        .unwrap_or_else(|| monday_of(today))
}

/// 相邻周的周一，`(上一周, 下一周)`
pub fn adjacent_weeks(week_start: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        week_start.checked_sub_days(Days::new(7))?,
        week_start.checked_add_days(Days::new(7))?,
    ))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

pub fn week_range(week_start: NaiveDate) -> String {
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    format!(
        "{} — {}",
        format_day(week_start),
        week_end.format("%d.%m.%Y")
    )
}

/// 按星期分组，每天内按开始时间排序
pub fn build_days(
    week_start: NaiveDate,
    today: NaiveDate,
    items: &[ScheduleItem],
) -> Vec<ScheduleDay> {
    DayOfWeek::ALL
        .iter()
        .enumerate()
        .map(|(offset, day)| {
            let date = week_start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(NaiveDate::MAX);
            let mut day_items: Vec<ScheduleItem> = items
                .iter()
                .filter(|item| item.schedule.day_of_week == *day)
                .cloned()
                .collect();
            day_items.sort_by_key(|item| (item.schedule.start_time, item.schedule.id));

            ScheduleDay {
                day_of_week: *day,
                day_name: day.display_name().to_string(),
                date: format_day(date),
                full_date: date,
                is_today: date == today,
                items: day_items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedules::entities::Schedule;
    use chrono::{Duration, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: i64, day: DayOfWeek, hour: u32) -> ScheduleItem {
        ScheduleItem {
            schedule: Schedule {
                id,
                group_id: 1,
                lesson_id: id,
                day_of_week: day,
                start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(hour + 1, 30, 0).unwrap(),
                room: None,
            },
            lesson_title: format!("Lesson {id}"),
        }
    }

    #[test]
    fn test_resolve_week_start() {
        let today = date(2025, 3, 13); // 周四
        assert_eq!(resolve_week_start(None, today), date(2025, 3, 10));
        assert_eq!(resolve_week_start(Some("2025-03-17"), today), date(2025, 3, 17));
        // 不是周一
        assert_eq!(resolve_week_start(Some("2025-03-18"), today), date(2025, 3, 10));
        assert_eq!(resolve_week_start(Some("garbage"), today), date(2025, 3, 10));
    }

    #[test]
    fn test_resolve_week_start_rejects_edge_of_calendar() {
        let today = date(2025, 3, 13);
        // chrono 能解析但无法再向后/向前翻一周的周一
        assert_eq!(resolve_week_start(Some("+262142-12-31"), today), date(2025, 3, 10));
        assert_eq!(resolve_week_start(Some("-262143-01-05"), today), date(2025, 3, 10));

        let last_monday = monday_of(NaiveDate::MAX);
        let first_monday = monday_of(NaiveDate::MIN + Duration::days(7));
        for edge in [last_monday, first_monday] {
            let query = edge.format("%Y-%m-%d").to_string();
            let resolved = resolve_week_start(Some(&query), today);
            assert!(adjacent_weeks(resolved).is_some());
            assert!(!week_range(resolved).is_empty());
        }
    }

    #[test]
    fn test_adjacent_weeks() {
        assert_eq!(
            adjacent_weeks(date(2025, 3, 10)),
            Some((date(2025, 3, 3), date(2025, 3, 17)))
        );
        assert_eq!(adjacent_weeks(monday_of(NaiveDate::MAX)), None);
    }

    #[test]
    fn test_week_range_label() {
        assert_eq!(week_range(date(2024, 12, 30)), "30.12 — 05.01.2025");
        assert_eq!(format_day(date(2025, 3, 3)), "03.03");
    }

    #[test]
    fn test_build_days_groups_and_sorts() {
        let items = vec![
            item(1, DayOfWeek::Monday, 14),
            item(2, DayOfWeek::Monday, 9),
            item(3, DayOfWeek::Friday, 10),
        ];
        let days = build_days(date(2025, 3, 10), date(2025, 3, 14), &items);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, "10.03");
        let monday_ids: Vec<i64> = days[0].items.iter().map(|i| i.schedule.id).collect();
        assert_eq!(monday_ids, vec![2, 1]);
        assert!(days[4].is_today);
        assert_eq!(days[4].items.len(), 1);
        assert!(days[6].items.is_empty());
        assert_eq!(days[6].day_name, "Sunday");
    }
}
