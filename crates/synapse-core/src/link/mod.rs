//! Domain types for the attention graph: concepts and weighted links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named entity or topic extracted from learning events.
///
/// Concepts are owned by the surrounding store; this subsystem only reads
/// them. Identity is `(name, tenant)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    /// Free-text description. Concepts without one encode to the zero vector.
    pub description: Option<String>,
}

impl Concept {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Description text, or empty when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// How a link's strength was last computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Fixed-increment co-occurrence rule.
    Hebbian,
    /// Learned predictor output.
    Neural,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Hebbian => "hebbian",
            LinkType::Neural => "neural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hebbian" => Some(LinkType::Hebbian),
            "neural" => Some(LinkType::Neural),
            _ => None,
        }
    }
}

/// A weighted edge between two concepts.
///
/// Keys are order-normalized: `(A, B)` and `(B, A)` address the same row.
/// `new` sorts the endpoint names, so exactly one row can exist per pair —
/// the store's primary key enforces the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionLink {
    pub concept_a: String,
    pub concept_b: String,
    pub tenant_id: String,
    /// Association strength, always within `[0.0, 1.0]`.
    pub strength: f32,
    pub link_type: LinkType,
    pub last_activated: DateTime<Utc>,
}

impl AttentionLink {
    /// Build a link with canonically ordered endpoints and a clamped strength.
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        tenant_id: impl Into<String>,
        strength: f32,
        link_type: LinkType,
    ) -> Self {
        let (concept_a, concept_b) = canonical_pair(a.into(), b.into());
        Self {
            concept_a,
            concept_b,
            tenant_id: tenant_id.into(),
            strength: strength.clamp(0.0, 1.0),
            link_type,
            last_activated: Utc::now(),
        }
    }

    /// The canonical `(a, b)` key for this link.
    pub fn key(&self) -> (&str, &str) {
        (&self.concept_a, &self.concept_b)
    }
}

/// Sort a concept pair into canonical (lexicographic) order.
pub fn canonical_pair(a: String, b: String) -> (String, String) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
