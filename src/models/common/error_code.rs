//! 业务错误码
//!
//! 前两位对应 HTTP 状态码语义，后三位为业务细分。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 请求错误
    BadRequest = 40000,
    InvalidVoteDirection = 40001,
    ProfessorNotTeachingCourse = 40002,
    ScoreOutOfRange = 40003,

    // 401xx / 403xx 认证授权
    Unauthorized = 40100,
    AuthFailed = 40101,
    Forbidden = 40300,

    // 404xx 资源不存在
    NotFound = 40400,
    UserNotFound = 40401,
    ProfessorNotFound = 40402,
    CriterionNotFound = 40403,
    CourseNotFound = 40404,
    CommentNotFound = 40405,

    // 409xx 资源冲突
    Conflict = 40900,
    UserAlreadyExists = 40901,
    ProfessorAlreadyExists = 40902,
    CriterionAlreadyExists = 40903,
    CourseAlreadyExists = 40904,
    AlreadyEvaluated = 40905,
    AlreadyVoted = 40906,
    ProfessorCourseAlreadyLinked = 40907,

    // 500xx 服务器错误
    InternalServerError = 50000,
}
