//! 路径参数安全提取器
//!
//! 在进入处理程序之前解析并校验路径中的 ID / 分享码，
//! 非法输入直接返回 400，处理程序无需再做解析。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 定义从路径参数解析正整数 ID 的提取器
macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|s| s.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_request(concat!("Missing or invalid ", $param))),
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeCourseIdI64, "course_id");
define_safe_id_extractor!(SafeExerciseIdI64, "exercise_id");
define_safe_id_extractor!(SafeUserIdI64, "user_id");

static SHARE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,16}$").expect("Invalid share code regex"));

/// 课程分享码路径参数
pub struct SafeShareCode(pub String);

impl FromRequest for SafeShareCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let code = req.match_info().get("code").unwrap_or_default();

        ready(if SHARE_CODE_RE.is_match(code) {
            Ok(SafeShareCode(code.to_string()))
        } else {
            Err(bad_request("Missing or invalid share code"))
        })
    }
}
