use std::str::FromStr;

/// Unix timestamp used as the `from_date` lower bound of the next query.
pub type Cursor = i64;

/// Review states the API reports for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review by the reviewer.",
            Self::Rejected => "The work has been reviewed: the reviewer has remarks.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for status in HomeworkStatus::ALL {
            assert_eq!(status.code().parse::<HomeworkStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!("pending".parse::<HomeworkStatus>().is_err());
        assert!("Approved".parse::<HomeworkStatus>().is_err());
        assert!("".parse::<HomeworkStatus>().is_err());
    }

    #[test]
    fn every_status_has_a_distinct_verdict() {
        let verdicts: Vec<_> = HomeworkStatus::ALL.iter().map(|s| s.verdict()).collect();
        assert_ne!(verdicts[0], verdicts[1]);
        assert_ne!(verdicts[1], verdicts[2]);
        assert_ne!(verdicts[0], verdicts[2]);
    }
}
