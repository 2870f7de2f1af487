use uuid::Uuid;

/// Source of fresh identifiers for every id type in the workspace.
pub fn new_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Current wall-clock time as unix seconds, used for block timestamps.
///
/// A clock set before the epoch reports `0` rather than failing.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uuid_is_v4() {
        assert_eq!(new_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_unix_now_is_after_2020() {
        assert!(unix_now() > 1_577_836_800);
    }
}
