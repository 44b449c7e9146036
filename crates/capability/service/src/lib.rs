//! 读数与位置服务层。
//!
//! 校验与默认值、告警判定、按房间/按日查询、数据保留清理都在这里完成；
//! handler 只负责解码请求并按 [`ErrorKind`] 映射状态码。

pub mod deadline;
pub mod error;
pub mod location;
pub mod reading;
pub mod time;
pub mod validation;

pub use deadline::Deadline;
pub use error::{ErrorKind, ServiceError};
pub use location::LocationService;
pub use reading::ReadingService;
