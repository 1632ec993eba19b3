use std::fmt;

#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub enum QosReliability {
    #[default]
    Reliable,
    BestEffort,
}

impl fmt::Display for QosReliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reliable => write!(f, "Reliable"),
            Self::BestEffort => write!(f, "Best Effort"),
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum QosHistory {
    KeepLast(usize),
    KeepAll,
}

impl QosHistory {
    /// Queue capacity implied by this history policy.
    pub fn depth(&self) -> usize {
        match self {
            Self::KeepLast(depth) => (*depth).max(1),
            Self::KeepAll => usize::MAX,
        }
    }
}

impl Default for QosHistory {
    fn default() -> Self {
        Self::KeepLast(10)
    }
}

impl fmt::Display for QosHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepLast(depth) => write!(f, "Keep Last ({})", depth),
            Self::KeepAll => write!(f, "Keep All"),
        }
    }
}

#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub enum QosDurability {
    TransientLocal,
    #[default]
    Volatile,
}

impl fmt::Display for QosDurability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransientLocal => write!(f, "Transient Local"),
            Self::Volatile => write!(f, "Volatile"),
        }
    }
}

/// Subset of the ROS 2 QoS profile that maps onto Zenoh publisher settings.
///
/// Deadline, lifespan and liveliness always take their ROS defaults and are
/// encoded as such.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub struct QosProfile {
    pub reliability: QosReliability,
    pub durability: QosDurability,
    pub history: QosHistory,
}

impl fmt::Display for QosProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QoS({}, {}, {})",
            self.reliability, self.durability, self.history
        )
    }
}

impl QosProfile {
    // This format comes from rmw_zenoh
    // <ReliabilityKind>:<DurabilityKind>:<HistoryKind>,<HistoryDepth>:<DeadlineSec, DeadlineNSec>:<LifespanSec, LifespanNSec>:<Liveliness, LivelinessSec, LivelinessNSec>"
    pub fn encode(&self) -> String {
        let default_qos = Self::default();

        let reliability = if self.reliability != default_qos.reliability {
            match self.reliability {
                QosReliability::Reliable => "1",
                QosReliability::BestEffort => "2",
            }
        } else {
            ""
        };

        let durability = if self.durability != default_qos.durability {
            match self.durability {
                QosDurability::TransientLocal => "1",
                QosDurability::Volatile => "2",
            }
        } else {
            ""
        };

        // Depth is always present, the kind only when it differs from the default
        let history = match self.history {
            QosHistory::KeepLast(depth) if self.history == default_qos.history => {
                format!(",{}", depth)
            }
            QosHistory::KeepLast(depth) => format!("1,{}", depth),
            QosHistory::KeepAll => "2,".to_string(),
        };

        format!("{reliability}:{durability}:{history}:,:,:,,")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_encodes_depth_only() {
        assert_eq!(QosProfile::default().encode(), "::,10:,:,:,,");
    }

    #[test]
    fn best_effort_transient_local() {
        let qos = QosProfile {
            reliability: QosReliability::BestEffort,
            durability: QosDurability::TransientLocal,
            history: QosHistory::KeepLast(1),
        };
        assert_eq!(qos.encode(), "2:1:1,1:,:,:,,");
    }

    #[test]
    fn keep_all_has_no_depth() {
        let qos = QosProfile {
            history: QosHistory::KeepAll,
            ..Default::default()
        };
        assert_eq!(qos.encode(), "::2,:,:,:,,");
        assert_eq!(qos.history.depth(), usize::MAX);
    }

    #[test]
    fn zero_depth_still_queues_one() {
        assert_eq!(QosHistory::KeepLast(0).depth(), 1);
    }
}
