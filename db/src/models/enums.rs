use common::error::{AppError, Res};

/// Lifecycle status of a subscription row. Stored as TEXT; one row per owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Cancelled => "CANCELLED",
        }
    }

    /// Free plans skip payment and activate immediately; paid plans wait for
    /// a verified payment.
    pub fn initial_for_price(price: f64) -> Self {
        if price == 0.0 {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
        }
    }
}

/// The two billable posting kinds, each counted against its own plan limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::Internship => "INTERNSHIP",
        }
    }

    pub fn from_str(value: &str) -> Res<Self> {
        match value {
            "FULL_TIME" => Ok(JobType::FullTime),
            "INTERNSHIP" => Ok(JobType::Internship),
            other => Err(AppError::BadRequest(format!("Invalid job type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Shortlisted,
    Interviewing,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Interviewing => "INTERVIEWING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    pub fn from_str(value: &str) -> Res<Self> {
        match value {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "REVIEWING" => Ok(ApplicationStatus::Reviewing),
            "SHORTLISTED" => Ok(ApplicationStatus::Shortlisted),
            "INTERVIEWING" => Ok(ApplicationStatus::Interviewing),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "WITHDRAWN" => Ok(ApplicationStatus::Withdrawn),
            other => Err(AppError::BadRequest(format!("Invalid status: {}", other))),
        }
    }

    /// Accepted and rejected applications are settled and can no longer be
    /// withdrawn by the applicant.
    pub fn is_settled(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_activates_immediately() {
        assert_eq!(
            SubscriptionStatus::initial_for_price(0.0),
            SubscriptionStatus::Active
        );
        assert_eq!(
            SubscriptionStatus::initial_for_price(29.99),
            SubscriptionStatus::Pending
        );
    }

    #[test]
    fn application_status_roundtrip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewing,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(ApplicationStatus::from_str("OPEN").is_err());
    }

    #[test]
    fn settled_applications_cannot_be_withdrawn() {
        assert!(ApplicationStatus::Accepted.is_settled());
        assert!(ApplicationStatus::Rejected.is_settled());
        assert!(!ApplicationStatus::Pending.is_settled());
        assert!(!ApplicationStatus::Withdrawn.is_settled());
    }

    #[test]
    fn job_type_parsing() {
        assert_eq!(JobType::from_str("FULL_TIME").unwrap(), JobType::FullTime);
        assert_eq!(JobType::from_str("INTERNSHIP").unwrap(), JobType::Internship);
        assert!(JobType::from_str("PART_TIME").is_err());
    }
}
