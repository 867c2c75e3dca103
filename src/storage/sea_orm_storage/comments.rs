//! 评论与投票存储操作
//!
//! 投票幂等性依赖 (user_id, comment_id) 唯一索引；计数更新必须是
//! 服务端原子自增，不允许读改写回。排序统一使用
//! positive_votes - negative_votes 表达式，同分按创建时间倒序，
//! 保证分页在无写入时稳定。

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::comment_votes::{
    ActiveModel as CommentVoteActiveModel, Column as VoteColumn, Entity as CommentVotes,
};
use crate::entity::comments::{Column, Entity as Comments, Model as CommentModel};
use crate::entity::evaluations::Column as EvaluationColumn;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, UniHubError};
use crate::models::{
    PaginationInfo,
    comments::{
        entities::{SortDirection, VoteDirection},
        requests::CommentListQuery,
        responses::{CommentAuthor, CommentListItem, CommentListResponse, VoteCountsResponse},
    },
};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

/// 净得分表达式 positive_votes - negative_votes
fn score_expr() -> SimpleExpr {
    Expr::col((Comments, Column::PositiveVotes)).sub(Expr::col((Comments, Column::NegativeVotes)))
}

impl SeaOrmStorage {
    /// 列出评论（分页）
    pub(crate) async fn list_comments_with_pagination_impl(
        &self,
        query: CommentListQuery,
    ) -> Result<CommentListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        // 评论通过所属评价关联到教授与标准
        let mut select = Comments::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::comments::Relation::Evaluation.def(),
            )
            .filter(EvaluationColumn::ProfessorId.eq(query.professor_id))
            .filter(EvaluationColumn::CriterionId.eq(query.criterion_id));

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(EvaluationColumn::CourseId.eq(course_id));
        }

        // 时间范围筛选
        if let Some(created_after) = query.created_after {
            select = select.filter(Column::CreatedAt.gte(created_after));
        }

        // 排序：净得分 + 创建时间倒序决出同分先后
        let order = match query.sort {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        select = select
            .order_by(score_expr(), order)
            .order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论页数失败: {e}")))?;

        let comments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论列表失败: {e}")))?;

        let items = self.assemble_comment_items(comments).await?;

        Ok(CommentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 教授+标准下净得分最高的评论；并列时取最新，无评论时返回 None
    pub(crate) async fn get_top_comment_impl(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<CommentListItem>> {
        let top = Comments::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::comments::Relation::Evaluation.def(),
            )
            .filter(EvaluationColumn::ProfessorId.eq(professor_id))
            .filter(EvaluationColumn::CriterionId.eq(criterion_id))
            .order_by(score_expr(), Order::Desc)
            .order_by_desc(Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询最佳评论失败: {e}")))?;

        match top {
            Some(comment) => {
                let mut items = self.assemble_comment_items(vec![comment]).await?;
                Ok(items.pop())
            }
            None => Ok(None),
        }
    }

    /// 投票
    ///
    /// 流程：评论存在性检查 → 查重 → 写入投票 → 原子自增计数 → 负数兜底归零。
    /// 同一用户并发双写时，先提交者成功，后提交者撞唯一索引，统一映射为 Conflict。
    pub(crate) async fn cast_vote_impl(
        &self,
        comment_id: i64,
        voter_id: i64,
        direction: VoteDirection,
    ) -> Result<VoteCountsResponse> {
        let now = chrono::Utc::now().timestamp();

        // 目标评论必须存在
        Comments::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论失败: {e}")))?
            .ok_or_else(|| UniHubError::not_found(format!("评论不存在: {comment_id}")))?;

        // 查重给出友好错误；并发竞争由唯一索引兜底
        let existing = CommentVotes::find()
            .filter(VoteColumn::UserId.eq(voter_id))
            .filter(VoteColumn::CommentId.eq(comment_id))
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询投票记录失败: {e}")))?;
        if existing.is_some() {
            return Err(UniHubError::conflict("您已对该评论投过票"));
        }

        let vote = CommentVoteActiveModel {
            is_positive: Set(direction.is_positive()),
            user_id: Set(voter_id),
            comment_id: Set(comment_id),
            created_at: Set(now),
            ..Default::default()
        };

        if let Err(e) = vote.insert(&self.db).await {
            if is_unique_violation(&e) {
                return Err(UniHubError::conflict("您已对该评论投过票"));
            }
            return Err(UniHubError::database_operation(format!(
                "写入投票失败: {e}"
            )));
        }

        // 计数自增在数据库端完成，避免并发下丢失更新
        let counter = if direction.is_positive() {
            Column::PositiveVotes
        } else {
            Column::NegativeVotes
        };
        Comments::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(comment_id))
            .exec(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("更新投票计数失败: {e}")))?;

        // 计数不变量：永不为负
        self.clamp_negative_counters(comment_id).await?;

        // 返回最新计数
        let updated = Comments::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论失败: {e}")))?
            .ok_or_else(|| UniHubError::not_found(format!("评论不存在: {comment_id}")))?;

        Ok(VoteCountsResponse {
            comment_id,
            positive_votes: updated.positive_votes,
            negative_votes: updated.negative_votes,
            score: updated.score(),
        })
    }

    /// 将负数计数归零
    ///
    /// 正常路径下计数从零起步且只增不减，此处只是对外部破坏的兜底。
    async fn clamp_negative_counters(&self, comment_id: i64) -> Result<()> {
        Comments::update_many()
            .col_expr(Column::PositiveVotes, Expr::value(0))
            .filter(Column::Id.eq(comment_id))
            .filter(Column::PositiveVotes.lt(0))
            .exec(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("修正正票计数失败: {e}")))?;

        Comments::update_many()
            .col_expr(Column::NegativeVotes, Expr::value(0))
            .filter(Column::Id.eq(comment_id))
            .filter(Column::NegativeVotes.lt(0))
            .exec(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("修正负票计数失败: {e}")))?;

        Ok(())
    }

    /// 批量补齐作者信息并转换为响应条目
    async fn assemble_comment_items(
        &self,
        comments: Vec<CommentModel>,
    ) -> Result<Vec<CommentListItem>> {
        let author_ids: Vec<i64> = comments
            .iter()
            .map(|c| c.user_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评论作者失败: {e}")))?;

        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        Ok(comments
            .into_iter()
            .map(|c| {
                let author = user_map.get(&c.user_id);
                CommentListItem {
                    id: c.id,
                    text: c.text.clone(),
                    evaluation_id: c.evaluation_id,
                    author: CommentAuthor {
                        id: c.user_id,
                        username: author
                            .map(|u| u.username.clone())
                            .unwrap_or_else(|| "未知用户".to_string()),
                        profile_name: author.and_then(|u| u.profile_name.clone()),
                    },
                    positive_votes: c.positive_votes,
                    negative_votes: c.negative_votes,
                    score: c.score(),
                    created_at: chrono::DateTime::from_timestamp(c.created_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                    updated_at: chrono::DateTime::from_timestamp(c.updated_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::errors::UniHubError;
    use crate::models::comments::entities::{SortDirection, VoteDirection};
    use crate::models::comments::requests::CommentListQuery;

    struct Fixture {
        storage: crate::storage::sea_orm_storage::SeaOrmStorage,
        professor_id: i64,
        criterion_id: i64,
    }

    async fn fixture() -> Fixture {
        let storage = test_support::storage().await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Voted").await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;
        Fixture {
            storage,
            professor_id,
            criterion_id,
        }
    }

    /// 为每条评论造一个独立作者的评价（同一用户在同一标准下只能评价一次）
    async fn seed_comment(fx: &Fixture, author: &str, text: &str, created_at: i64) -> i64 {
        let user_id = test_support::seed_user(&fx.storage, author).await;
        let evaluation_id = test_support::seed_evaluation(
            &fx.storage,
            user_id,
            fx.professor_id,
            fx.criterion_id,
            4,
        )
        .await;
        test_support::seed_comment_at(&fx.storage, evaluation_id, user_id, text, created_at).await
    }

    fn list_query(fx: &Fixture, page: i64, size: i64) -> CommentListQuery {
        CommentListQuery {
            page: Some(page),
            size: Some(size),
            professor_id: fx.professor_id,
            criterion_id: fx.criterion_id,
            course_id: None,
            created_after: None,
            sort: SortDirection::Desc,
        }
    }

    #[tokio::test]
    async fn test_vote_updates_counters_and_score() {
        let fx = fixture().await;
        let comment_id = seed_comment(&fx, "author1", "solid", 1_000).await;
        let voter = test_support::seed_user(&fx.storage, "voter1").await;

        let counts = fx
            .storage
            .cast_vote_impl(comment_id, voter, VoteDirection::Up)
            .await
            .unwrap();
        assert_eq!(counts.positive_votes, 1);
        assert_eq!(counts.negative_votes, 0);
        assert_eq!(counts.score, 1);
    }

    #[tokio::test]
    async fn test_second_vote_from_same_user_conflicts() {
        let fx = fixture().await;
        let comment_id = seed_comment(&fx, "author2", "nice", 1_000).await;
        let voter = test_support::seed_user(&fx.storage, "voter2").await;

        fx.storage
            .cast_vote_impl(comment_id, voter, VoteDirection::Up)
            .await
            .unwrap();

        // 方向不同也不允许：投票不可更改
        let second = fx
            .storage
            .cast_vote_impl(comment_id, voter, VoteDirection::Down)
            .await;
        assert!(matches!(second, Err(UniHubError::Conflict(_))));

        // 冲突的投票不得改变计数
        let query = list_query(&fx, 1, 10);
        let listed = fx
            .storage
            .list_comments_with_pagination_impl(query)
            .await
            .unwrap();
        assert_eq!(listed.items[0].positive_votes, 1);
        assert_eq!(listed.items[0].negative_votes, 0);
    }

    #[tokio::test]
    async fn test_distinct_voters_all_counted() {
        let fx = fixture().await;
        let comment_id = seed_comment(&fx, "author3", "hot take", 1_000).await;

        for i in 0..3 {
            let voter = test_support::seed_user(&fx.storage, &format!("up{i}")).await;
            fx.storage
                .cast_vote_impl(comment_id, voter, VoteDirection::Up)
                .await
                .unwrap();
        }
        for i in 0..2 {
            let voter = test_support::seed_user(&fx.storage, &format!("down{i}")).await;
            fx.storage
                .cast_vote_impl(comment_id, voter, VoteDirection::Down)
                .await
                .unwrap();
        }

        let listed = fx
            .storage
            .list_comments_with_pagination_impl(list_query(&fx, 1, 10))
            .await
            .unwrap();
        assert_eq!(listed.items[0].positive_votes, 3);
        assert_eq!(listed.items[0].negative_votes, 2);
        assert_eq!(listed.items[0].score, 1);
    }

    #[tokio::test]
    async fn test_vote_on_missing_comment_is_not_found() {
        let fx = fixture().await;
        let voter = test_support::seed_user(&fx.storage, "ghostvoter").await;

        let result = fx
            .storage
            .cast_vote_impl(424242, voter, VoteDirection::Up)
            .await;
        assert!(matches!(result, Err(UniHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_comments_ordered_by_score_then_recency() {
        let fx = fixture().await;
        // old/new 同为 0 分，较新的 new 应排在前
        let old = seed_comment(&fx, "tie_old", "older", 1_000).await;
        let new = seed_comment(&fx, "tie_new", "newer", 2_000).await;
        let best = seed_comment(&fx, "tie_best", "best", 500).await;

        let voter = test_support::seed_user(&fx.storage, "ordervoter").await;
        fx.storage
            .cast_vote_impl(best, voter, VoteDirection::Up)
            .await
            .unwrap();

        let listed = fx
            .storage
            .list_comments_with_pagination_impl(list_query(&fx, 1, 10))
            .await
            .unwrap();
        let ids: Vec<i64> = listed.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![best, new, old]);
    }

    #[tokio::test]
    async fn test_top_comment_prefers_recent_on_tie() {
        let fx = fixture().await;
        let older = seed_comment(&fx, "top_old", "first", 1_000).await;
        let newer = seed_comment(&fx, "top_new", "second", 2_000).await;

        // 两条各一票，同分
        let v1 = test_support::seed_user(&fx.storage, "topv1").await;
        let v2 = test_support::seed_user(&fx.storage, "topv2").await;
        fx.storage
            .cast_vote_impl(older, v1, VoteDirection::Up)
            .await
            .unwrap();
        fx.storage
            .cast_vote_impl(newer, v2, VoteDirection::Up)
            .await
            .unwrap();

        let top = fx
            .storage
            .get_top_comment_impl(fx.professor_id, fx.criterion_id)
            .await
            .unwrap()
            .expect("top comment should exist");
        assert_eq!(top.id, newer);
    }

    #[tokio::test]
    async fn test_top_comment_none_when_no_comments() {
        let fx = fixture().await;
        let top = fx
            .storage
            .get_top_comment_impl(fx.professor_id, fx.criterion_id)
            .await
            .unwrap();
        assert!(top.is_none());
    }

    #[tokio::test]
    async fn test_pagination_is_stable_and_disjoint() {
        let fx = fixture().await;
        // 六条评论，净得分互不相同（分数由创建顺序决定投票数）
        let mut expected: Vec<i64> = Vec::new();
        for i in 0..6 {
            let comment_id =
                seed_comment(&fx, &format!("pager{i}"), &format!("comment {i}"), 1_000 + i).await;
            for j in 0..i {
                let voter =
                    test_support::seed_user(&fx.storage, &format!("pagevoter{i}_{j}")).await;
                fx.storage
                    .cast_vote_impl(comment_id, voter, VoteDirection::Up)
                    .await
                    .unwrap();
            }
            expected.push(comment_id);
        }
        // 净得分 5,4,3,2,1,0 → 倒序排列
        expected.reverse();

        let first = fx
            .storage
            .list_comments_with_pagination_impl(list_query(&fx, 1, 3))
            .await
            .unwrap();
        let second = fx
            .storage
            .list_comments_with_pagination_impl(list_query(&fx, 2, 3))
            .await
            .unwrap();

        assert_eq!(first.pagination.total, 6);
        assert_eq!(first.pagination.total_pages, 2);

        let mut seen: Vec<i64> = first.items.iter().map(|c| c.id).collect();
        seen.extend(second.items.iter().map(|c| c.id));
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_recency_filter_cuts_old_comments() {
        let fx = fixture().await;
        let _old = seed_comment(&fx, "recency_old", "ancient", 1_000).await;
        let fresh = seed_comment(&fx, "recency_new", "fresh", 5_000).await;

        let mut query = list_query(&fx, 1, 10);
        query.created_after = Some(2_000);
        let listed = fx
            .storage
            .list_comments_with_pagination_impl(query)
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, fresh);
    }

    #[tokio::test]
    async fn test_course_filter_scopes_results() {
        let fx = fixture().await;

        // 一条评论挂在带课程的评价上，一条不挂课程
        let course = fx
            .storage
            .create_course_impl(crate::models::courses::requests::CreateCourseRequest {
                name: "Algorithms".to_string(),
            })
            .await
            .unwrap();

        let user_a = test_support::seed_user(&fx.storage, "course_a").await;
        let eval_a = {
            use crate::entity::prelude::EvaluationActiveModel;
            use sea_orm::{ActiveModelTrait, Set};
            let model = EvaluationActiveModel {
                score: Set(4),
                user_id: Set(user_a),
                professor_id: Set(fx.professor_id),
                criterion_id: Set(fx.criterion_id),
                course_id: Set(Some(course.id)),
                created_at: Set(1_000),
                updated_at: Set(1_000),
                ..Default::default()
            };
            model.insert(&fx.storage.db).await.unwrap().id
        };
        let in_course =
            test_support::seed_comment_at(&fx.storage, eval_a, user_a, "in course", 1_000).await;
        let _no_course = seed_comment(&fx, "course_b", "no course", 2_000).await;

        let mut query = list_query(&fx, 1, 10);
        query.course_id = Some(course.id);
        let listed = fx
            .storage
            .list_comments_with_pagination_impl(query)
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, in_course);
    }
}
