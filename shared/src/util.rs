use crate::models::EmployeeId;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Timestamp-based id generator for records created on the client.
///
/// Ids are the current UTC millisecond, bumped by one whenever two ids
/// would land in the same millisecond, so every id handed out by one
/// generator is strictly greater than the previous one.
#[derive(Debug, Clone, Default)]
pub struct LocalIdGenerator {
    last: i64,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id, never repeating within this generator
    pub fn next_id(&mut self) -> EmployeeId {
        let now = now_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        EmployeeId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_are_strictly_increasing() {
        let mut ids = LocalIdGenerator::new();
        let generated: Vec<_> = (0..100).map(|_| ids.next_id()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_local_id_is_timestamp_based() {
        let before = now_millis();
        let id = LocalIdGenerator::new().next_id();
        assert!(id.0 >= before);
    }
}
