//! 对外错误/提示文案（客户端依赖这些字符串，不要改动）。

pub const INVALID_REQUEST_DATA: &str = "Invalid request data. Please check your input.";
pub const MISCONFIGURED_ID: &str = "Missconfigured ID.";
pub const RESOURCE_NOT_FOUND: &str = "Resource not found.";
pub const INTERNAL_ERROR: &str = "Internal server error.";
pub const INVALID_PAGINATION: &str = "Invalid pagination parameters.";

pub const NO_DATA_FOR_ROOM: &str = "No data found for the specified room";
pub const NO_DATA_FOR_ROOM_AND_DATE: &str = "No data found for the specified room and date";
pub const DATE_REQUIRED: &str = "Date parameter is required";
pub const INVALID_DATE_FORMAT: &str =
    "Invalid date format. Use RFC3339 format (e.g., 2025-11-07T00:00:00Z)";

pub const FAILED_GET_LOCATIONS: &str = "Failed to get locations";
pub const FAILED_GET_CHOSEN_LOCATION: &str = "Failed to get chosen location";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const FAILED_CREATE_LOCATION: &str = "Failed to create location";
pub const INVALID_LOCATION_ID: &str = "Invalid location ID";
pub const INVALID_THRESHOLD_FORMAT: &str = "Invalid threshold format";
pub const FAILED_UPDATE_THRESHOLD: &str = "Failed to update threshold";
pub const FAILED_SET_CHOSEN_LOCATION: &str = "Failed to set chosen location";
pub const LOCATION_RETRIEVED: &str = "Location retrieved";
pub const LOCATION_UPDATED: &str = "Location updated";

pub const UNSUPPORTED_CONTENT_TYPE: &str =
    "Content-Type header should be set to: application/json.";
pub const UNAUTHORIZED: &str = "Unauthorized";
