//! Static domain knowledge: industry keywords, action verbs, section patterns and stop words.
//!
//! Everything here is read-only data. Matching logic lives in the analyzers that consume it.

/// An industry keyword list, keyed by its catalog name.
pub struct IndustryKeywords {
    pub industry: &'static str,
    pub keywords: &'static [&'static str],
}

/// A named resume section and the lower-case markers that reveal it.
pub struct SectionPattern {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

pub const GENERAL_INDUSTRY: &str = "general";

pub const INDUSTRY_KEYWORDS: &[IndustryKeywords] = &[
    IndustryKeywords {
        industry: "technology",
        keywords: &[
            "javascript", "typescript", "python", "java", "react", "vue", "angular", "node.js", "nodejs",
            "aws", "azure", "gcp", "cloud", "docker", "kubernetes", "ci/cd", "devops", "agile", "scrum",
            "api", "rest", "graphql", "microservices", "database", "sql", "nosql", "mongodb", "postgresql",
            "git", "github", "gitlab", "testing", "unit test", "integration", "deployment", "scalability",
            "machine learning", "ai", "data science", "analytics", "big data", "etl", "data pipeline",
            "security", "authentication", "authorization", "encryption", "cybersecurity", "linux", "unix",
            "mobile", "ios", "android", "react native", "flutter", "swift", "kotlin", "full stack",
            "frontend", "backend", "fullstack", "software engineer", "developer", "architect",
        ],
    },
    IndustryKeywords {
        industry: "marketing",
        keywords: &[
            "seo", "sem", "ppc", "google ads", "facebook ads", "social media", "content marketing",
            "email marketing", "marketing automation", "hubspot", "salesforce", "crm", "analytics",
            "google analytics", "conversion", "roi", "kpi", "brand", "campaign", "strategy",
            "digital marketing", "lead generation", "content creation", "copywriting", "a/b testing",
            "customer acquisition", "retention", "engagement", "influencer", "viral", "growth hacking",
        ],
    },
    IndustryKeywords {
        industry: "finance",
        keywords: &[
            "financial analysis", "budgeting", "forecasting", "accounting", "audit", "compliance",
            "risk management", "investment", "portfolio", "equity", "derivatives", "excel",
            "financial modeling", "valuation", "due diligence", "m&a", "private equity",
            "venture capital", "banking", "gaap", "ifrs", "sec", "regulatory", "tax", "revenue",
            "profit", "loss", "balance sheet",
        ],
    },
    IndustryKeywords {
        industry: "healthcare",
        keywords: &[
            "patient care", "clinical", "medical", "healthcare", "hipaa", "ehr", "emr", "diagnosis",
            "treatment", "nursing", "physician", "pharmacy", "laboratory", "radiology", "surgery",
            "emergency", "intensive care", "rehabilitation", "mental health", "telemedicine",
        ],
    },
    IndustryKeywords {
        industry: GENERAL_INDUSTRY,
        keywords: &[
            "leadership", "management", "team", "project", "communication", "problem-solving",
            "analytical", "strategic", "collaborative", "innovative", "results-driven",
            "detail-oriented", "organized", "deadline", "stakeholder", "presentation", "negotiation",
            "customer service", "training", "mentoring", "budget", "reporting",
            "process improvement", "efficiency",
        ],
    },
];

/// Verbs recruiters and ATS filters look for at the start of achievement bullets.
pub const ACTION_VERBS: &[&str] = &[
    // Leadership
    "led", "managed", "directed", "supervised", "coordinated", "oversaw", "headed", "guided",
    // Achievement
    "achieved", "accomplished", "exceeded", "surpassed", "delivered", "completed", "attained",
    // Creation
    "created", "developed", "designed", "built", "established", "founded", "launched", "initiated",
    // Improvement
    "improved", "enhanced", "optimized", "streamlined", "transformed", "modernized", "upgraded",
    // Analysis
    "analyzed", "evaluated", "assessed", "researched", "investigated", "examined", "reviewed",
    // Communication
    "presented", "negotiated", "persuaded", "collaborated", "facilitated", "communicated",
    // Technical
    "implemented", "deployed", "engineered", "programmed", "configured", "automated", "integrated",
    // Growth
    "increased", "grew", "expanded", "scaled", "boosted", "accelerated", "maximized",
    // Cost/Efficiency
    "reduced", "decreased", "minimized", "saved", "cut", "eliminated", "consolidated",
    // Support
    "supported", "assisted", "maintained", "resolved", "troubleshot", "trained", "mentored",
];

/// The subset of [`ACTION_VERBS`] checked when scoring a structured record.
pub const RECORD_ACTION_VERBS: &[&str] = &[
    "developed", "implemented", "created", "managed", "led", "achieved",
    "improved", "designed", "built", "launched", "optimized", "increased",
];

/// Generic resume vocabulary checked when scoring a structured record.
pub const RECORD_KEYWORDS: &[&str] = &[
    "leadership", "management", "experience", "skills", "achievement",
    "project", "team", "development", "implementation", "analysis",
    "strategy", "communication", "problem-solving", "collaboration",
];

pub const CONTACT_SECTION: &str = "Contact Information";
pub const SUMMARY_SECTION: &str = "Summary/Objective";
pub const EXPERIENCE_SECTION: &str = "Work Experience";
pub const EDUCATION_SECTION: &str = "Education";
pub const SKILLS_SECTION: &str = "Skills";

pub const REQUIRED_SECTIONS: &[SectionPattern] = &[
    SectionPattern {
        name: CONTACT_SECTION,
        patterns: &["email", "phone", "address", "linkedin", "location"],
    },
    SectionPattern {
        name: SUMMARY_SECTION,
        patterns: &["summary", "objective", "profile", "about me", "overview"],
    },
    SectionPattern {
        name: EXPERIENCE_SECTION,
        patterns: &["experience", "employment", "work history", "professional experience"],
    },
    SectionPattern {
        name: EDUCATION_SECTION,
        patterns: &["education", "academic", "degree", "university", "college", "school"],
    },
    SectionPattern {
        name: SKILLS_SECTION,
        patterns: &["skills", "competencies", "expertise", "proficiencies", "technical skills"],
    },
];

pub const OPTIONAL_SECTIONS: &[SectionPattern] = &[
    SectionPattern {
        name: "Certifications",
        patterns: &["certification", "certificate", "licensed", "accredited"],
    },
    SectionPattern { name: "Projects", patterns: &["project", "portfolio"] },
    SectionPattern { name: "Languages", patterns: &["language", "fluent", "proficient"] },
    SectionPattern {
        name: "Awards",
        patterns: &["award", "honor", "recognition", "achievement"],
    },
    SectionPattern {
        name: "Publications",
        patterns: &["publication", "published", "authored", "paper"],
    },
    SectionPattern { name: "Volunteer", patterns: &["volunteer", "community", "nonprofit"] },
];

/// Words dropped before ranking job-description tokens by frequency.
pub const JOB_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
    "shall", "can", "need", "we", "you", "your", "our", "their", "this", "that", "these",
    "those", "it", "its", "which", "who", "whom", "what", "where", "when", "why", "how",
    "all", "each", "every", "both", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just", "about",
];

/// Characters counted as bullet markers.
pub const BULLET_GLYPHS: &[char] = &[
    '-', '*', '\u{2022}', '\u{2023}', '\u{25E6}', '\u{2043}', '\u{2219}',
];

/// Every industry keyword in catalog order, duplicates removed.
pub fn all_industry_keywords() -> Vec<&'static str> {
    let mut seen = std::collections::HashSet::new();
    INDUSTRY_KEYWORDS
        .iter()
        .flat_map(|list| list.keywords.iter().copied())
        .filter(|kw| seen.insert(*kw))
        .collect()
}

pub fn industry_keywords(industry: &str) -> &'static [&'static str] {
    INDUSTRY_KEYWORDS
        .iter()
        .find(|list| list.industry == industry)
        .map(|list| list.keywords)
        .unwrap_or(&[])
}

pub fn all_sections() -> impl Iterator<Item = &'static SectionPattern> {
    REQUIRED_SECTIONS.iter().chain(OPTIONAL_SECTIONS.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(REQUIRED_SECTIONS.len(), 5);
        assert_eq!(OPTIONAL_SECTIONS.len(), 6);
        assert_eq!(all_sections().count(), 11);
        assert!(!industry_keywords(GENERAL_INDUSTRY).is_empty());
        assert!(industry_keywords("astrology").is_empty());
    }

    #[test]
    fn test_all_keywords_deduplicated() {
        let all = all_industry_keywords();
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
        // "analytics" lives in both technology and marketing
        assert_eq!(all.iter().filter(|k| **k == "analytics").count(), 1);
    }

    #[test]
    fn test_record_verbs_come_from_catalog() {
        for verb in RECORD_ACTION_VERBS {
            assert!(ACTION_VERBS.contains(verb), "{} missing from catalog", verb);
        }
    }

    #[test]
    fn test_action_verbs_unique() {
        let unique: std::collections::HashSet<_> = ACTION_VERBS.iter().collect();
        assert_eq!(unique.len(), ACTION_VERBS.len());
    }
}
