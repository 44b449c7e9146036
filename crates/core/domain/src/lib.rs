pub mod location;
pub mod reading;

pub use location::Location;
pub use reading::Reading;

/// 设备未上报 device_id 时使用的默认设备。
pub const DEFAULT_DEVICE_ID: &str = "arduino_001";

/// 未上报房间且没有选中位置时使用的房间名。
pub const UNKNOWN_ROOM: &str = "Unknown";

/// 读数与位置的默认告警阈值（dB）。
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// 声级与阈值允许的最小值（dB）。
pub const MIN_DECIBEL: f64 = 0.0;

/// 声级与阈值允许的最大值（dB）。
pub const MAX_DECIBEL: f64 = 150.0;

/// device_id 最大字符数。
pub const MAX_DEVICE_ID_CHARS: usize = 50;
