//! Fixed table of technology categories.
//!
//! Each category identifier maps to a curated search query (an OR of topic
//! synonyms, phrases quoted), a display label and the route slug the
//! front-end links to. The table is built once on first use and never
//! changes afterwards.
//!
//! | Id | Label | Route slug |
//! |----|-------|------------|
//! | `ai` | AI | `AI` |
//! | `machine learning` | ML | `ML` |
//! | `iot` | IoT | `IoT` |
//! | `blockchain` | Blockchain | `Blockchain` |
//! | `quantum computing` | Quantum Computing | `quantum-computing` |
//! | `virtual reality` | VR | `vr` |
//! | `cybersecurity` | Networking | `Networking` |
//! | `robotics` | Robotics | `Robotics` |
//!
//! Lookups are total: an identifier missing from the table searches for
//! itself and is labelled [`DEFAULT_LABEL`].

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Label used for identifiers that are not in the table.
pub const DEFAULT_LABEL: &str = "Tech";

/// One row of the category table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    /// Category identifier, also the bare keyword for fallback searches.
    pub id: &'static str,
    /// Display label attached to every article fetched for this category.
    pub label: &'static str,
    /// Path segment under `/api/articles/`.
    pub slug: &'static str,
    pub description: &'static str,
    /// Enhanced search query.
    #[serde(skip)]
    pub query: String,
}

/// Query parameters resolved for one category identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub id: String,
    pub query: String,
    pub label: String,
}

struct Row {
    id: &'static str,
    label: &'static str,
    slug: &'static str,
    description: &'static str,
    synonyms: &'static [&'static str],
}

const ROWS: &[Row] = &[
    Row {
        id: "ai",
        label: "AI",
        slug: "AI",
        description: "Artificial Intelligence developments and applications",
        synonyms: &[
            "artificial intelligence",
            "AI",
            "generative AI",
            "large language models",
            "LLM",
            "ChatGPT",
            "OpenAI",
            "AI agents",
        ],
    },
    Row {
        id: "machine learning",
        label: "ML",
        slug: "ML",
        description: "Machine Learning techniques and research",
        synonyms: &[
            "machine learning",
            "deep learning",
            "neural networks",
            "reinforcement learning",
            "computer vision",
            "natural language processing",
            "model training",
        ],
    },
    Row {
        id: "iot",
        label: "IoT",
        slug: "IoT",
        description: "Internet of Things devices and ecosystems",
        synonyms: &[
            "IoT",
            "internet of things",
            "smart home",
            "connected devices",
            "edge computing",
            "wearables",
            "industrial IoT",
        ],
    },
    Row {
        id: "blockchain",
        label: "Blockchain",
        slug: "Blockchain",
        description: "Distributed ledger technologies and applications",
        synonyms: &[
            "blockchain",
            "cryptocurrency",
            "bitcoin",
            "ethereum",
            "web3",
            "smart contracts",
            "DeFi",
            "NFT",
        ],
    },
    Row {
        id: "quantum computing",
        label: "Quantum Computing",
        slug: "quantum-computing",
        description: "Quantum computing research and applications",
        synonyms: &[
            "quantum computing",
            "quantum computer",
            "qubits",
            "quantum supremacy",
            "quantum advantage",
            "quantum cryptography",
            "quantum processor",
        ],
    },
    Row {
        id: "virtual reality",
        label: "VR",
        slug: "vr",
        description: "Virtual and augmented reality technologies",
        synonyms: &[
            "virtual reality",
            "VR",
            "augmented reality",
            "AR headset",
            "mixed reality",
            "metaverse",
            "Vision Pro",
            "Meta Quest",
        ],
    },
    Row {
        id: "cybersecurity",
        label: "Networking",
        slug: "Networking",
        description: "Advances in network technologies and protocols",
        synonyms: &[
            "cybersecurity",
            "ransomware",
            "data breaches",
            "cloud security",
            "zero-day",
            "malware",
            "phishing",
            "network security",
        ],
    },
    Row {
        id: "robotics",
        label: "Robotics",
        slug: "Robotics",
        description: "Advances in robotics and automation",
        synonyms: &[
            "robotics",
            "robots",
            "humanoid robot",
            "autonomous robots",
            "industrial automation",
            "robotic arm",
            "drones",
        ],
    },
];

static CATALOG: Lazy<Vec<CategoryEntry>> = Lazy::new(|| {
    ROWS.iter()
        .map(|row| CategoryEntry {
            id: row.id,
            label: row.label,
            slug: row.slug,
            description: row.description,
            query: or_query(row.synonyms),
        })
        .collect()
});

/// Join search terms into a provider OR-disjunction, quoting multi-word phrases.
pub fn or_query(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|term| {
            if term.contains(' ') {
                format!("\"{term}\"")
            } else {
                term.to_string()
            }
        })
        .join(" OR ")
}

/// Every known category, in display order.
pub fn entries() -> &'static [CategoryEntry] {
    &CATALOG
}

/// Find the table row for an identifier.
pub fn get(id: &str) -> Option<&'static CategoryEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

/// Resolve an identifier to its query and label.
///
/// # Arguments
///
/// * `id` - Category identifier, matched exactly and case-sensitively.
///
/// # Returns
///
/// The table row's enhanced query and label. Unknown identifiers search
/// for the identifier itself under the [`DEFAULT_LABEL`].
pub fn resolve(id: &str) -> ResolvedCategory {
    match get(id) {
        Some(entry) => ResolvedCategory {
            id: entry.id.to_string(),
            query: entry.query.clone(),
            label: entry.label.to_string(),
        },
        None => ResolvedCategory {
            id: id.to_string(),
            query: id.to_string(),
            label: DEFAULT_LABEL.to_string(),
        },
    }
}
