//! Builtin Category Definitions
//!
//! The eleven categories every installation starts with. Keywords are
//! lowercase substrings matched against normalized text; patterns are regex
//! sources matched against the original text.

use serde::{Deserialize, Serialize};

/// Category chosen when nothing scores above zero.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "notatka";

/// Builtin categories in tie-break order.
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "zadanie",
        icon: "✅",
        description: "Tasks and things to get done",
        keywords: &[
            "muszę",
            "musisz",
            "trzeba",
            "zrobić",
            "zadzwonić",
            "napisać",
            "wysłać",
            "załatwić",
            "pamiętać",
            "nie zapomnij",
            "todo",
            "do zrobienia",
            "odebrać",
            "przygotować",
            "oddać",
            "naprawić",
        ],
        patterns: &[
            r"(?i)^\s*(kup|zrób|zadzwoń|napisz|wyślij|sprawdź|odbierz|zapłać|przygotuj|umów)\b",
            r"(?m)^\s*[-*]\s*\[ \]",
        ],
    },
    BuiltinCategory {
        name: "pomysł",
        icon: "💡",
        description: "Ideas, concepts and what-ifs",
        keywords: &[
            "pomysł",
            "pomysl",
            "idea",
            "koncepcj",
            "może by",
            "można by",
            "fajnie by",
            "wymyśl",
            "innowac",
            "startup",
            "aplikacj",
        ],
        patterns: &[
            r"(?i)\b(a może|co jeśli|co gdyby)\b",
            r"(?i)^\s*(pomysł|idea)\s*:",
        ],
    },
    BuiltinCategory {
        name: "pytanie",
        icon: "❓",
        description: "Open questions and things to find out",
        keywords: &[
            "dlaczego",
            "jak ",
            "czy ",
            "gdzie",
            "kto ",
            "co to",
            "po co",
            "zastanawiam się",
            "ciekawe",
            "jakim cudem",
            "nie wiem",
        ],
        patterns: &[
            r"\?\s*$",
            r"(?i)^\s*(czy|jak|dlaczego|po co|kiedy|gdzie|kto|co|ile|który|która|które)\b",
        ],
    },
    BuiltinCategory {
        name: "praca",
        icon: "💼",
        description: "Work, clients and projects",
        keywords: &[
            "prac",
            "projekt",
            "klient",
            "szef",
            "raport",
            "deadline",
            "biuro",
            "prezentacj",
            "zesp",
            "meeting",
            "firm",
        ],
        patterns: &[
            r"(?i)\b(jira|sprint|standup|stand-up|retro|code review)\b",
            r"\b[A-Z]{2,10}-\d+\b",
        ],
    },
    BuiltinCategory {
        name: "zakupy",
        icon: "🛒",
        description: "Shopping lists and things to buy",
        keywords: &[
            "kupić",
            "kup ",
            "zakupy",
            "zakupów",
            "sklep",
            "mleko",
            "chleb",
            "masło",
            "jajka",
            "warzywa",
            "owoce",
            "biedronka",
            "lidl",
            "zamówić",
            "allegro",
        ],
        patterns: &[
            r"(?i)\b\d+([.,]\d+)?\s*(szt|kg|dag|g|l|ml|opak)\b",
            r"(?i)\b(promocj[aięi]|rabat|kod rabatowy)\b",
        ],
    },
    BuiltinCategory {
        name: "wydarzenie",
        icon: "📅",
        description: "Events, meetings and dates",
        keywords: &[
            "spotkanie",
            "urodziny",
            "imieniny",
            "impreza",
            "koncert",
            "wesele",
            "rocznica",
            "jutro",
            "pojutrze",
            "wieczorem",
            "rano",
            "kino",
            "teatr",
            "wyjazd",
            "wizyta",
            "termin",
        ],
        patterns: &[
            r"\b\d{1,2}[./-]\d{1,2}[./-]\d{2,4}\b",
            r"\b\d{4}-\d{2}-\d{2}\b",
            r"\b([01]?\d|2[0-3]):[0-5]\d\b",
            r"(?i)\b(poniedziałek|wtorek|środ[aęy]|czwartek|piąt(ek|ku)|sobot[aęy]|niedziel[aęi])\b",
            r"(?i)\b\d{1,2}\s+(stycznia|lutego|marca|kwietnia|maja|czerwca|lipca|sierpnia|września|października|listopada|grudnia)\b",
        ],
    },
    BuiltinCategory {
        name: "notatka",
        icon: "📝",
        description: "General notes (fallback)",
        keywords: &["notatka", "zanotuj", "zapamiętaj", "info:", "na marginesie"],
        patterns: &[],
    },
    BuiltinCategory {
        name: "inspiracja",
        icon: "✨",
        description: "Quotes, dreams and motivation",
        keywords: &[
            "inspiracj",
            "inspirując",
            "motywacj",
            "cytat",
            "marzenie",
            "marzę",
            "chciałbym kiedyś",
            "chciałabym kiedyś",
            "warto",
        ],
        patterns: &[r#"["„“].{3,}["”]"#, r"(?m)^\s*>"],
    },
    BuiltinCategory {
        name: "kontakt",
        icon: "👤",
        description: "People, phone numbers and addresses",
        keywords: &[
            "telefon",
            "numer",
            "kontakt",
            "e-mail",
            "email",
            "adres",
            "nr tel",
            "mail do",
            "wizytówk",
            "linkedin",
        ],
        patterns: &[
            r"[\w.+-]+@[\w-]+(\.[\w-]+)+",
            r"(\+\d{2}\s?)?\b\d{3}[\s-]?\d{3}[\s-]?\d{3}\b",
        ],
    },
    BuiltinCategory {
        name: "finanse",
        icon: "💰",
        description: "Money, bills and budgets",
        keywords: &[
            "pieniądze",
            "przelew",
            "rachunek",
            "rachunki",
            "faktur",
            "oszczędności",
            "oszczędzać",
            "budżet",
            "wydatek",
            "wydatki",
            "pensja",
            "wypłata",
            "kredyt",
            "rata",
            "podatek",
            "bank",
            "konto",
            "opłata",
            "zapłacić",
        ],
        patterns: &[
            r"(?i)\d+([.,]\d{1,2})?\s*(zł|pln|eur|usd|€|\$)",
            r"(€|\$)\s*\d+",
        ],
    },
    BuiltinCategory {
        name: "zdrowie",
        icon: "🏥",
        description: "Health, doctors and training",
        keywords: &[
            "lekarz",
            "dentyst",
            "tabletk",
            "leki",
            "aptek",
            "zdrowie",
            "trening",
            "siłowni",
            "bieganie",
            "dieta",
            "ból",
            "recept",
            "badani",
            "szczepieni",
            "wizyta u",
        ],
        patterns: &[
            r"(?i)\b\d+\s*(mg|mcg|iu)\b",
            r"(?i)\b\d+([.,]\d+)?\s*(km|kcal)\b",
            r"(?i)\b\d{2,3}/\d{2,3}\s*mmhg\b",
        ],
    },
];

/// Static builtin category definition
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// Category name (unique identifier and default display label)
    pub name: &'static str,
    /// Display glyph
    pub icon: &'static str,
    /// Human readable description
    pub description: &'static str,
    /// Lowercase keywords, matched as substrings
    pub keywords: &'static [&'static str],
    /// Regex sources, matched against the original text
    pub patterns: &'static [&'static str],
}

/// Runtime category definition
///
/// Built from the builtin table or from `[categories.<name>]` in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            name: builtin.name.to_string(),
            icon: builtin.icon.to_string(),
            description: builtin.description.to_string(),
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
            patterns: builtin.patterns.iter().map(|s| s.to_string()).collect(),
        }
    }
}
