use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认教师账号
/// 如果数据库中没有任何用户，则创建一个默认的教师账号
async fn seed_teacher(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping teacher seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default teacher account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping teacher seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("TEACHER_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  TEACHER PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated teacher password: {}", pwd);
        warn!("  Please save this password or set TEACHER_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash teacher password: {}, skipping teacher seed", e);
            return;
        }
    };

    // 创建教师账号
    let teacher_request = CreateUserRequest {
        username: "course_admin".to_string(),
        email: "teacher@localhost".to_string(),
        password: password_hash,
        role: UserRole::Teacher,
    };

    match storage.create_user(teacher_request).await {
        Ok(user) => {
            info!(
                "Default teacher account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create teacher account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化和种子数据
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认教师账号（如果需要）
    seed_teacher(&storage).await;

    StartupContext { storage }
}
