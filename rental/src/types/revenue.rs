use serde::{Deserialize, Serialize};

/// How the partner insures their rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePath {
    /// Platform-provided insurance; fixed payout.
    Insurance,
    /// Partner-supplied insurance; payout depends on [`RevenueTier`].
    Tiers,
}

impl std::fmt::Display for RevenuePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevenuePath::Insurance => write!(f, "insurance"),
            RevenuePath::Tiers => write!(f, "tiers"),
        }
    }
}

impl std::str::FromStr for RevenuePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insurance" => Ok(RevenuePath::Insurance),
            "tiers" => Ok(RevenuePath::Tiers),
            other => Err(format!("unknown revenue path: {other}")),
        }
    }
}

/// Insurance type supplied by the partner on the tiers path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueTier {
    P2p,
    Commercial,
    SelfManage,
}

impl std::fmt::Display for RevenueTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevenueTier::P2p => write!(f, "p2p"),
            RevenueTier::Commercial => write!(f, "commercial"),
            RevenueTier::SelfManage => write!(f, "self_manage"),
        }
    }
}

impl std::str::FromStr for RevenueTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p2p" => Ok(RevenueTier::P2p),
            "commercial" => Ok(RevenueTier::Commercial),
            "self_manage" | "self-manage" => Ok(RevenueTier::SelfManage),
            other => Err(format!("unknown revenue tier: {other}")),
        }
    }
}

/// A partner's persisted (or drafted) revenue path choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSelection {
    pub revenue_path: Option<RevenuePath>,
    pub revenue_tier: Option<RevenueTier>,
}
