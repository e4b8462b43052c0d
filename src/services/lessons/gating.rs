//! 视频解锁与测验资格
//!
//! 视频按 (sort_order, id) 排列；第一个视频总是解锁，之后的视频在前一个被看完后解锁。
//! 全部视频看完才能参加测验，没有视频的课时直接具备资格。

use std::collections::HashSet;

/// 已解锁的视频 ID，顺序与输入一致
pub fn unlocked_video_ids(ordered_video_ids: &[i64], watched: &HashSet<i64>) -> Vec<i64> {
    ordered_video_ids
        .iter()
        .enumerate()
        .filter(|(index, _)| *index == 0 || watched.contains(&ordered_video_ids[index - 1]))
        .map(|(_, id)| *id)
        .collect()
}

/// 视频是否已解锁；视频不属于该课时返回 None
pub fn is_video_unlocked(
    ordered_video_ids: &[i64],
    watched: &HashSet<i64>,
    video_id: i64,
) -> Option<bool> {
    let position = ordered_video_ids.iter().position(|id| *id == video_id)?;
    Some(position == 0 || watched.contains(&ordered_video_ids[position - 1]))
}

pub fn can_take_test(ordered_video_ids: &[i64], watched: &HashSet<i64>) -> bool {
    ordered_video_ids.iter().all(|id| watched.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watched(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_first_video_always_unlocked() {
        let videos = [10, 11, 12];
        assert_eq!(unlocked_video_ids(&videos, &watched(&[])), vec![10]);
        assert_eq!(is_video_unlocked(&videos, &watched(&[]), 10), Some(true));
        assert_eq!(is_video_unlocked(&videos, &watched(&[]), 11), Some(false));
    }

    #[test]
    fn test_prefix_unlock() {
        let videos = [10, 11, 12];
        // 看完前两个，第三个随之解锁，但测验仍不可参加
        let seen = watched(&[10, 11]);
        assert_eq!(unlocked_video_ids(&videos, &seen), vec![10, 11, 12]);
        assert!(!can_take_test(&videos, &seen));

        let seen = watched(&[10, 11, 12]);
        assert!(can_take_test(&videos, &seen));
    }

    #[test]
    fn test_unlock_depends_on_predecessor_only() {
        let videos = [10, 11, 12];
        // 跳过中间视频不会解锁其后继
        let seen = watched(&[10, 12]);
        assert_eq!(unlocked_video_ids(&videos, &seen), vec![10, 11]);
        assert_eq!(is_video_unlocked(&videos, &seen, 12), Some(false));
    }

    #[test]
    fn test_foreign_video_and_empty_lesson() {
        assert_eq!(is_video_unlocked(&[1, 2], &watched(&[]), 99), None);
        assert!(can_take_test(&[], &watched(&[])));
        assert!(unlocked_video_ids(&[], &watched(&[])).is_empty());
    }

    #[test]
    fn test_watched_ids_from_other_lessons_are_ignored() {
        let videos = [1, 2];
        let seen = watched(&[1, 2, 77]);
        assert!(can_take_test(&videos, &seen));
    }
}
