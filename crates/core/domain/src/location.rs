/// 监测位置（房间）。
///
/// 全局至多一个位置处于 `chosen` 状态，由存储层事务保证。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub chosen: bool,
    pub threshold: f64,
}

impl Location {
    /// 构造待写入的位置（id 由存储分配）。
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            chosen: false,
            threshold,
        }
    }
}
