use fastpay_core::CATEGORY_SEPARATOR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl std::str::FromStr for CaseSensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sensitive" | "ordinal" => Ok(CaseSensitivity::Sensitive),
            "insensitive" | "ignore_case" => Ok(CaseSensitivity::Insensitive),
            other => Err(format!("Unknown case sensitivity: '{other}'")),
        }
    }
}

/// A `Category[: Subcategory]` string split once at construction.
#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    category: String,
    subcategory: Option<String>,
}

impl Candidate {
    fn new(text: String) -> Self {
        let (category, subcategory) = split_path(&text);
        let category = category.to_string();
        let subcategory = subcategory.map(str::to_string);
        Candidate {
            text,
            category,
            subcategory,
        }
    }
}

/// Prefix search over a fixed category taxonomy.
///
/// The engine owns its copy of the taxonomy, so later changes to whatever the
/// caller built it from do not affect results. Matches come back in taxonomy
/// order; there is no ranking.
#[derive(Debug, Clone, Default)]
pub struct CategorySearchEngine {
    candidates: Vec<Candidate>,
}

impl CategorySearchEngine {
    pub fn new<I, S>(search_space: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = search_space
            .into_iter()
            .map(|s| Candidate::new(s.into()))
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The owned taxonomy, in construction order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.text.as_str())
    }

    /// Case-sensitive [`search`](Self::search).
    pub fn search_default(&self, query: &str) -> Vec<&str> {
        self.search(query, CaseSensitivity::Sensitive)
    }

    /// All candidates whose category (and subcategory, when the query has one)
    /// start with the corresponding part of `query`.
    ///
    /// `":Sub"` searches subcategories only. A query with a subcategory never
    /// matches a candidate without one, and an empty category alone matches
    /// nothing.
    pub fn search(&self, query: &str, case: CaseSensitivity) -> Vec<&str> {
        let (query_category, query_subcategory) = split_path(query);

        let results: Vec<&str> = self
            .candidates
            .iter()
            .filter(|c| is_match(c, query_category, query_subcategory, case))
            .map(|c| c.text.as_str())
            .collect();

        tracing::trace!(query, ?case, matches = results.len(), "Category search");
        results
    }
}

fn is_match(
    candidate: &Candidate,
    query_category: &str,
    query_subcategory: Option<&str>,
    case: CaseSensitivity,
) -> bool {
    match (query_subcategory, candidate.subcategory.as_deref()) {
        (None, _) => {
            !query_category.is_empty() && starts_with(&candidate.category, query_category, case)
        }
        (Some(query_sub), Some(sub)) if query_category.is_empty() => {
            !sub.is_empty() && starts_with(sub, query_sub, case)
        }
        (Some(query_sub), Some(sub)) => {
            starts_with(&candidate.category, query_category, case)
                && starts_with(sub, query_sub, case)
        }
        (Some(_), None) => false,
    }
}

/// Trimmed category, plus a trimmed subcategory only when there are exactly
/// two parts.
fn split_path(s: &str) -> (&str, Option<&str>) {
    let parts: Vec<&str> = s.split(CATEGORY_SEPARATOR).collect();
    let category = parts[0].trim();
    let subcategory = if parts.len() == 2 {
        Some(parts[1].trim())
    } else {
        None
    };
    (category, subcategory)
}

fn starts_with(text: &str, prefix: &str, case: CaseSensitivity) -> bool {
    match case {
        CaseSensitivity::Sensitive => text.starts_with(prefix),
        CaseSensitivity::Insensitive => text.to_lowercase().starts_with(&prefix.to_lowercase()),
    }
}
