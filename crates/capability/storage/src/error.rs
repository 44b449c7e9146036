//! 存储层错误类型
//!
//! 封装底层错误（SQL 执行、连接、锁中毒、唯一约束冲突），
//! 统一以字符串消息向上传递，由服务层归类为内部错误。

#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 锁中毒（仅内存实现）。
    pub(crate) fn lock_failed() -> Self {
        Self::new("lock failed")
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err.to_string())
    }
}
