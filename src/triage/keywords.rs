//! Bilingual complaint categorization.
//!
//! Free-text complaints arrive in English, Egyptian Arabic, or a mix of
//! both. Categorization is a case-insensitive substring scan against fixed
//! keyword tables; no stemming, no tokenization. That keeps the matcher
//! trivially auditable at the cost of occasional near-miss spellings.

/// Clinical complaint category recognized in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintCategory {
    ChestPain,
    Breathing,
    Trauma,
    Abdominal,
    Neuro,
    Fever,
    Psych,
    Allergy,
}

impl ComplaintCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintCategory::ChestPain => "chest pain",
            ComplaintCategory::Breathing => "breathing difficulty",
            ComplaintCategory::Trauma => "trauma",
            ComplaintCategory::Abdominal => "abdominal",
            ComplaintCategory::Neuro => "neurological",
            ComplaintCategory::Fever => "fever",
            ComplaintCategory::Psych => "psychiatric",
            ComplaintCategory::Allergy => "allergy",
        }
    }

    /// Estimated count of distinct ED resources this category typically
    /// consumes (labs, ECG, imaging, IV medication, specialist consult).
    pub fn resource_weight(self) -> u32 {
        match self {
            ComplaintCategory::ChestPain => 2,
            ComplaintCategory::Breathing => 2,
            ComplaintCategory::Trauma => 2,
            ComplaintCategory::Abdominal => 2,
            ComplaintCategory::Neuro => 2,
            ComplaintCategory::Fever => 1,
            ComplaintCategory::Psych => 1,
            ComplaintCategory::Allergy => 1,
        }
    }
}

struct CategoryRule {
    category: ComplaintCategory,
    keywords: &'static [&'static str],
}

/// Mixed English / Egyptian Arabic keyword sets per category. English
/// keywords must be lowercase; the scan lowercases the complaint once.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: ComplaintCategory::ChestPain,
        keywords: &[
            "chest pain",
            "pain in chest",
            "tightness",
            "pressure",
            "angina",
            "ألم صدر",
            "وجع في صدري",
            "نغزة",
            "طبقة على صدري",
            "ذبحة",
            "حرقان في الصدر",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Breathing,
        keywords: &[
            "short of breath",
            "cant breathe",
            "can't breathe",
            "difficulty breathing",
            "dyspnea",
            "gasping",
            "ضيق تنفس",
            "مش عارف آخد نفسي",
            "كرشة نفس",
            "مخنوق",
            "نهجان",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Trauma,
        keywords: &[
            "fall",
            "fell",
            "hit",
            "accident",
            "crash",
            "fracture",
            "broken",
            "cut",
            "wound",
            "سقوط",
            "وقعت",
            "خبطت",
            "حادث",
            "كسر",
            "جرح",
            "نزيف",
            "تعويرة",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Abdominal,
        keywords: &[
            "stomach pain",
            "abdominal pain",
            "belly ache",
            "vomiting",
            "diarrhea",
            "وجع بطن",
            "مغص",
            "قيء",
            "ترجيع",
            "إسهال",
            "ألم في معدتي",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Neuro,
        keywords: &[
            "dizzy",
            "faint",
            "passed out",
            "seizure",
            "stroke",
            "numbness",
            "weakness",
            "slurred",
            "دوخة",
            "إغماء",
            "تشنجات",
            "جلطة",
            "تنميل",
            "ضعف",
            "صداع شديد",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Fever,
        keywords: &[
            "fever",
            "chills",
            "shivering",
            "حرارة",
            "سخونية",
            "رعشة",
            "حمى",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Psych,
        keywords: &[
            "suicidal",
            "kill myself",
            "hopeless",
            "voices",
            "hallucination",
            "aggressive",
            "انتحار",
            "هاقتل نفسي",
            "أصوات",
            "هلاوس",
            "عدواني",
        ],
    },
    CategoryRule {
        category: ComplaintCategory::Allergy,
        keywords: &[
            "allergy",
            "allergic",
            "rash",
            "hives",
            "swelling",
            "peanut",
            "bee sting",
            "حساسية",
            "طفح",
            "تورم",
            "قرصة نحلة",
        ],
    },
];

/// Scan a complaint for category keywords. At most one hit per category,
/// in fixed table order, so output order is deterministic.
pub fn categorize(complaint: &str) -> Vec<ComplaintCategory> {
    let text = complaint.to_lowercase();
    CATEGORY_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|kw| text.contains(*kw)))
        .map(|rule| rule.category)
        .collect()
}
