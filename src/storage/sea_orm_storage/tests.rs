//! 存储层集成测试（内存 SQLite）

use super::SeaOrmStorage;
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::exercises::requests::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UserListQuery};
use crate::services::access::{CourseAccess, authorize};
use crate::storage::Storage;

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("in-memory storage")
}

async fn create_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "argon2-hash-placeholder".to_string(),
            role,
        })
        .await
        .expect("create user")
}

#[tokio::test]
async fn test_teacher_registration_expands_roles() {
    let storage = storage().await;

    let teacher = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    assert!(teacher.roles.contains(&UserRole::Student));
    assert!(teacher.roles.contains(&UserRole::Teacher));

    let student = create_user(&storage, "bob_learns", UserRole::Student).await;
    assert_eq!(student.roles, vec![UserRole::Student]);
}

#[tokio::test]
async fn test_register_course_enrolls_creator() {
    let storage = storage().await;
    let teacher = create_user(&storage, "alice_teaches", UserRole::Teacher).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            teacher.id,
        )
        .await
        .expect("create course");

    assert_eq!(course.creator_id, teacher.id);

    // 创建者必须已是课程成员
    let member = storage
        .get_course_member(course.id, "alice_teaches")
        .await
        .expect("member lookup")
        .expect("creator should be enrolled");
    assert!(member.is_teacher());
    assert!(authorize(Some(&member), CourseAccess::Teacher).is_ok());
}

#[tokio::test]
async fn test_membership_gates_by_access_level() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    let bob = create_user(&storage, "bob_learns", UserRole::Student).await;
    let _carol = create_user(&storage, "carol_outside", UserRole::Student).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");

    storage
        .enroll_user(course.id, bob.id)
        .await
        .expect("enroll bob");

    // alice：教师成员，两个级别都放行
    let alice_member = storage
        .get_course_member(course.id, "alice_teaches")
        .await
        .expect("lookup")
        .expect("alice enrolled");
    assert!(authorize(Some(&alice_member), CourseAccess::Member).is_ok());
    assert!(authorize(Some(&alice_member), CourseAccess::Teacher).is_ok());

    // bob：学生成员，可以读但不能写
    let bob_member = storage
        .get_course_member(course.id, "bob_learns")
        .await
        .expect("lookup")
        .expect("bob enrolled");
    assert!(authorize(Some(&bob_member), CourseAccess::Member).is_ok());
    let denied = authorize(Some(&bob_member), CourseAccess::Teacher).unwrap_err();
    assert_eq!(
        denied.message,
        "User is not in course or teacher is not in this course."
    );

    // carol：非成员，两个级别都拒绝
    let carol_member = storage
        .get_course_member(course.id, "carol_outside")
        .await
        .expect("lookup");
    assert!(carol_member.is_none());
    assert!(authorize(carol_member.as_ref(), CourseAccess::Member).is_err());
    assert!(authorize(carol_member.as_ref(), CourseAccess::Teacher).is_err());
}

#[tokio::test]
async fn test_unknown_course_and_user_lookups() {
    let storage = storage().await;

    // 未知课程 ID
    assert!(
        storage
            .get_course_by_id(999)
            .await
            .expect("lookup")
            .is_none()
    );

    // 未知用户 ID
    assert!(storage.get_user_by_id(999).await.expect("lookup").is_none());

    // 未知练习 ID
    assert!(
        storage
            .get_exercise_by_id(999)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn test_exercise_crud_under_course() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");

    let exercise = storage
        .create_exercise(
            course.id,
            CreateExerciseRequest {
                name: "Exercise 1: ownership".to_string(),
            },
        )
        .await
        .expect("create exercise");
    assert_eq!(exercise.course_id, course.id);

    let listed = storage.list_exercises(course.id).await.expect("list");
    assert_eq!(listed.len(), 1);

    // 仅覆盖名称
    let updated = storage
        .update_exercise(
            exercise.id,
            UpdateExerciseRequest {
                name: "Exercise 1: borrowing".to_string(),
            },
        )
        .await
        .expect("update")
        .expect("exercise exists");
    assert_eq!(updated.name, "Exercise 1: borrowing");
    assert_eq!(updated.course_id, course.id);

    assert!(storage.delete_exercise(exercise.id).await.expect("delete"));
    assert!(
        storage
            .get_exercise_by_id(exercise.id)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn test_update_course_overwrites_name_only() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");

    let updated = storage
        .update_course(
            course.id,
            UpdateCourseRequest {
                name: "Advanced Rust Programming".to_string(),
            },
        )
        .await
        .expect("update")
        .expect("course exists");

    assert_eq!(updated.name, "Advanced Rust Programming");
    assert_eq!(updated.share_code, course.share_code);
    assert_eq!(updated.creator_id, course.creator_id);

    // 不存在的课程返回 None
    assert!(
        storage
            .update_course(
                999,
                UpdateCourseRequest {
                    name: "Course that does not exist".to_string(),
                },
            )
            .await
            .expect("update")
            .is_none()
    );
}

#[tokio::test]
async fn test_list_user_courses() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    let bob = create_user(&storage, "bob_learns", UserRole::Student).await;

    let rust_course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");
    storage
        .create_course(
            CreateCourseRequest {
                name: "Algorithms and Data Structures".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");

    storage
        .enroll_user(rust_course.id, bob.id)
        .await
        .expect("enroll bob");

    let alice_courses = storage.list_user_courses(alice.id).await.expect("list");
    assert_eq!(alice_courses.len(), 2);

    let bob_courses = storage.list_user_courses(bob.id).await.expect("list");
    assert_eq!(bob_courses.len(), 1);
    assert_eq!(bob_courses[0].id, rust_course.id);

    // 课程目录包含全部课程，不做成员过滤
    let all_courses = storage.list_courses().await.expect("list");
    assert_eq!(all_courses.len(), 2);
}

#[tokio::test]
async fn test_share_code_resolution_and_enrollment() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    let bob = create_user(&storage, "bob_learns", UserRole::Student).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");

    let resolved = storage
        .get_course_by_code(&course.share_code)
        .await
        .expect("lookup")
        .expect("share code resolves");
    assert_eq!(resolved.id, course.id);

    assert!(
        storage
            .get_course_by_code("NOSUCHCD")
            .await
            .expect("lookup")
            .is_none()
    );

    // 凭分享码入课后成为成员
    storage
        .enroll_user(course.id, bob.id)
        .await
        .expect("enroll");
    let member = storage
        .get_course_member_by_user_id(course.id, bob.id)
        .await
        .expect("lookup")
        .expect("bob enrolled");
    assert_eq!(member.username, "bob_learns");
}

#[tokio::test]
async fn test_remove_member_and_course_cascade() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    let bob = create_user(&storage, "bob_learns", UserRole::Student).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");
    storage
        .enroll_user(course.id, bob.id)
        .await
        .expect("enroll");
    storage
        .create_exercise(
            course.id,
            CreateExerciseRequest {
                name: "Exercise 1: ownership".to_string(),
            },
        )
        .await
        .expect("create exercise");

    // 移出成员后查询为空
    assert!(
        storage
            .remove_course_user(course.id, bob.id)
            .await
            .expect("remove")
    );
    assert!(
        storage
            .get_course_member_by_user_id(course.id, bob.id)
            .await
            .expect("lookup")
            .is_none()
    );

    // 删除课程级联清理成员与练习
    assert!(storage.delete_course(course.id).await.expect("delete"));
    assert!(
        storage
            .get_course_member(course.id, "alice_teaches")
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        storage
            .list_exercises(course.id)
            .await
            .expect("list")
            .is_empty()
    );
}

#[tokio::test]
async fn test_course_members_roster_order() {
    let storage = storage().await;
    let alice = create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    let bob = create_user(&storage, "bob_learns", UserRole::Student).await;

    let course = storage
        .create_course(
            CreateCourseRequest {
                name: "Introduction to Rust".to_string(),
            },
            alice.id,
        )
        .await
        .expect("create course");
    storage
        .enroll_user(course.id, bob.id)
        .await
        .expect("enroll");

    let members = storage.list_course_members(course.id).await.expect("list");
    assert_eq!(members.len(), 2);
    // 创建者是第一位成员
    assert_eq!(members[0].username, "alice_teaches");
    assert_eq!(members[1].username, "bob_learns");
}

#[tokio::test]
async fn test_list_users_with_pagination() {
    let storage = storage().await;
    create_user(&storage, "alice_teaches", UserRole::Teacher).await;
    create_user(&storage, "bob_learns", UserRole::Student).await;
    create_user(&storage, "carol_learns", UserRole::Student).await;

    let all = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(1),
            size: Some(10),
            search: None,
        })
        .await
        .expect("list users");
    assert_eq!(all.pagination.total, 3);
    assert_eq!(all.items.len(), 3);

    let filtered = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(1),
            size: Some(10),
            search: Some("carol".to_string()),
        })
        .await
        .expect("list users");
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].username, "carol_learns");

    assert_eq!(storage.count_users().await.expect("count"), 3);
}
