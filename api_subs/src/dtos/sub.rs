use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: i64,
}

/// One usage counter in the `/usage` report. `remaining` is absent for
/// unlimited counters.
#[derive(Debug, Serialize, PartialEq)]
pub struct UsageCounter {
    pub used: i32,
    pub limit: i32,
    pub unlimited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i32>,
}

impl UsageCounter {
    pub fn new(used: i32, limit: i32) -> Self {
        let unlimited = limit >= quota::UNLIMITED;
        UsageCounter {
            used,
            limit,
            unlimited,
            remaining: (!unlimited).then(|| (limit - used).max(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_with_finite_limit() {
        let counter = UsageCounter::new(3, 5);
        assert!(!counter.unlimited);
        assert_eq!(counter.remaining, Some(2));
    }

    #[test]
    fn counter_never_reports_negative_remaining() {
        assert_eq!(UsageCounter::new(7, 5).remaining, Some(0));
    }

    #[test]
    fn sentinel_limit_is_unlimited() {
        let counter = UsageCounter::new(120, quota::UNLIMITED);
        assert!(counter.unlimited);
        assert_eq!(counter.remaining, None);
    }
}
