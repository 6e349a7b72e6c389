//! 课程访问控制
//!
//! 所有受限的课程/练习操作都经过这里：给定课程成员查询结果与要求的
//! 访问级别，决定放行或拒绝。成员资格与教师角色通过存储层的显式查询
//! 获得（用户名在课程内唯一），策略本身是纯函数。

use std::sync::Arc;

use actix_web::HttpResponse;
use tracing::error;

use crate::models::course_users::entities::CourseMember;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 访问级别
///
/// Member：任意课程成员即可；Teacher：必须是持有教师角色的成员。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAccess {
    Member,
    Teacher,
}

/// 拒绝访问，携带面向调用方的拒绝原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub message: &'static str,
}

// 两种访问级别各自的拒绝消息
const MEMBER_DENIED: &str = "User is not in course.";
const TEACHER_DENIED: &str = "User is not in course or teacher is not in this course.";

/// 核心判定：成员查询结果 + 访问级别 → 放行/拒绝
///
/// - 查无成员：拒绝
/// - Member 级别：是成员即放行
/// - Teacher 级别：成员且角色集合包含教师角色才放行
pub fn authorize(member: Option<&CourseMember>, access: CourseAccess) -> Result<(), AccessDenied> {
    match (member, access) {
        (Some(_), CourseAccess::Member) => Ok(()),
        (Some(m), CourseAccess::Teacher) if m.is_teacher() => Ok(()),
        (Some(_), CourseAccess::Teacher) => Err(AccessDenied {
            message: TEACHER_DENIED,
        }),
        (None, CourseAccess::Member) => Err(AccessDenied {
            message: MEMBER_DENIED,
        }),
        (None, CourseAccess::Teacher) => Err(AccessDenied {
            message: TEACHER_DENIED,
        }),
    }
}

/// 基于完整成员列表的判定，语义与 [`authorize`] 一致
///
/// 成员列表形态保留给测试与调用方一次性拿到全量名单的场景。
pub fn authorize_roster(
    members: &[CourseMember],
    username: &str,
    access: CourseAccess,
) -> Result<(), AccessDenied> {
    authorize(members.iter().find(|m| m.username == username), access)
}

/// 服务层辅助：查询成员并判定，拒绝时直接给出 HTTP 响应
///
/// 放行时返回成员记录，供后续操作使用。
pub async fn ensure_in_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    username: &str,
    access: CourseAccess,
) -> Result<CourseMember, HttpResponse> {
    let member = match storage.get_course_member(course_id, username).await {
        Ok(member) => member,
        Err(e) => {
            error!("Failed to look up course member: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking course membership",
                )),
            );
        }
    };

    match authorize(member.as_ref(), access) {
        Ok(()) => Ok(member.expect("authorized access always has a member")),
        Err(denied) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotInCourse,
            denied.message,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn member(username: &str, roles: Vec<UserRole>) -> CourseMember {
        CourseMember {
            id: 1,
            course_id: 10,
            user_id: 100,
            username: username.to_string(),
            roles,
            joined_at: chrono::Utc::now(),
        }
    }

    fn roster() -> Vec<CourseMember> {
        vec![
            member("alice_teaches", vec![UserRole::Student, UserRole::Teacher]),
            member("bob_learns", vec![UserRole::Student]),
        ]
    }

    #[test]
    fn test_member_access_for_any_member() {
        let roster = roster();
        assert!(authorize_roster(&roster, "alice_teaches", CourseAccess::Member).is_ok());
        assert!(authorize_roster(&roster, "bob_learns", CourseAccess::Member).is_ok());
    }

    #[test]
    fn test_member_access_denied_for_non_member() {
        let roster = roster();
        let denied = authorize_roster(&roster, "mallory", CourseAccess::Member).unwrap_err();
        assert_eq!(denied.message, "User is not in course.");
    }

    #[test]
    fn test_teacher_access_requires_teacher_role() {
        let roster = roster();
        // 教师成员放行
        assert!(authorize_roster(&roster, "alice_teaches", CourseAccess::Teacher).is_ok());
        // 学生成员拒绝，且给出教师级别的消息
        let denied = authorize_roster(&roster, "bob_learns", CourseAccess::Teacher).unwrap_err();
        assert_eq!(
            denied.message,
            "User is not in course or teacher is not in this course."
        );
    }

    #[test]
    fn test_teacher_access_denied_for_non_member() {
        let roster = roster();
        let denied = authorize_roster(&roster, "mallory", CourseAccess::Teacher).unwrap_err();
        assert_eq!(
            denied.message,
            "User is not in course or teacher is not in this course."
        );
    }

    #[test]
    fn test_empty_roster_always_denies() {
        let empty: Vec<CourseMember> = vec![];
        assert!(authorize_roster(&empty, "anyone", CourseAccess::Member).is_err());
        assert!(authorize_roster(&empty, "anyone", CourseAccess::Teacher).is_err());
    }

    #[test]
    fn test_denial_messages_differ_by_access_level() {
        let member_denied = authorize(None, CourseAccess::Member).unwrap_err();
        let teacher_denied = authorize(None, CourseAccess::Teacher).unwrap_err();
        assert_ne!(member_denied.message, teacher_denied.message);
    }

    #[test]
    fn test_direct_lookup_matches_roster_semantics() {
        let teacher = member("alice_teaches", vec![UserRole::Student, UserRole::Teacher]);
        let student = member("bob_learns", vec![UserRole::Student]);

        assert!(authorize(Some(&teacher), CourseAccess::Teacher).is_ok());
        assert!(authorize(Some(&student), CourseAccess::Member).is_ok());
        assert!(authorize(Some(&student), CourseAccess::Teacher).is_err());
        assert!(authorize(None, CourseAccess::Member).is_err());
    }
}
