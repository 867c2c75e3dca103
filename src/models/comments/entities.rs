use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 投票方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn is_positive(self) -> bool {
        matches!(self, VoteDirection::Up)
    }
}

// 评论时间范围过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub enum RecencyFilter {
    LastWeek,
    LastMonth,
    LastSemester,
    LastYear,
}

impl RecencyFilter {
    /// 以给定时刻为基准计算截止时间，早于截止时间的评论被过滤掉
    pub fn cutoff(self, now: chrono::DateTime<chrono::Utc>) -> chrono::DateTime<chrono::Utc> {
        match self {
            RecencyFilter::LastWeek => now - chrono::Duration::weeks(1),
            RecencyFilter::LastMonth => now - chrono::Duration::days(30),
            RecencyFilter::LastSemester => now - chrono::Duration::days(182),
            RecencyFilter::LastYear => now - chrono::Duration::days(365),
        }
    }
}

// 排序方向（按净得分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_direction_deserialize() {
        assert_eq!(
            serde_json::from_str::<VoteDirection>(r#""up""#).unwrap(),
            VoteDirection::Up
        );
        assert_eq!(
            serde_json::from_str::<VoteDirection>(r#""down""#).unwrap(),
            VoteDirection::Down
        );
        assert!(serde_json::from_str::<VoteDirection>(r#""sideways""#).is_err());
    }

    #[test]
    fn test_recency_filter_deserialize() {
        assert_eq!(
            serde_json::from_str::<RecencyFilter>(r#""last-week""#).unwrap(),
            RecencyFilter::LastWeek
        );
        assert_eq!(
            serde_json::from_str::<RecencyFilter>(r#""last-semester""#).unwrap(),
            RecencyFilter::LastSemester
        );
    }

    #[test]
    fn test_recency_cutoff_ordering() {
        let now = chrono::Utc::now();
        assert!(RecencyFilter::LastWeek.cutoff(now) > RecencyFilter::LastMonth.cutoff(now));
        assert!(RecencyFilter::LastMonth.cutoff(now) > RecencyFilter::LastSemester.cutoff(now));
        assert!(RecencyFilter::LastSemester.cutoff(now) > RecencyFilter::LastYear.cutoff(now));
    }
}
