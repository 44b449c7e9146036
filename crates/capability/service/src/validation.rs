//! 读数校验与默认值。
//!
//! 校验一次收集全部违规项，拼接成一条消息返回，而不是遇到第一条就退出。

use domain::{
    DEFAULT_DEVICE_ID, DEFAULT_THRESHOLD, MAX_DECIBEL, MAX_DEVICE_ID_CHARS, MIN_DECIBEL, Reading,
};

const DEVICE_ID_RULE: &str = "DeviceID is required and must be less than 50 characters. ";
const ROOM_NAME_RULE: &str = "RoomName is required. ";
const SOUND_LEVEL_RULE: &str = "SoundLevel must be between 0 and 150 dB. ";
const THRESHOLD_RULE: &str = "Threshold must be between 0 and 150 dB. ";

/// 阈值为 0 视为未填写。
pub fn apply_threshold_default(reading: &mut Reading) {
    if reading.threshold == 0.0 {
        reading.threshold = DEFAULT_THRESHOLD;
    }
}

/// 补齐测量时间与设备号。
pub fn apply_time_and_device_defaults(reading: &mut Reading, now: &str) {
    if reading.measure_time.is_empty() {
        reading.measure_time = now.to_string();
    }
    if reading.device_id.is_empty() {
        reading.device_id = DEFAULT_DEVICE_ID.to_string();
    }
}

/// device_id 非空且不超过 50 个字符。
pub fn is_valid_device_id(device_id: &str) -> bool {
    !device_id.is_empty() && device_id.chars().count() <= MAX_DEVICE_ID_CHARS
}

fn in_decibel_range(value: f64) -> bool {
    (MIN_DECIBEL..=MAX_DECIBEL).contains(&value)
}

/// 校验读数，失败时返回拼接后的违规描述。
pub fn validate(reading: &Reading) -> Result<(), String> {
    let mut message = String::new();
    if !is_valid_device_id(&reading.device_id) {
        message.push_str(DEVICE_ID_RULE);
    }
    if reading.room_name.is_empty() {
        message.push_str(ROOM_NAME_RULE);
    }
    if !in_decibel_range(reading.sound_level) {
        message.push_str(SOUND_LEVEL_RULE);
    }
    if !in_decibel_range(reading.threshold) {
        message.push_str(THRESHOLD_RULE);
    }
    if message.is_empty() {
        Ok(())
    } else {
        Err(message)
    }
}
