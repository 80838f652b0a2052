//! Corpus-wide slug uniqueness.

use std::collections::HashSet;

use beast_model::{Film, IssueKind, Person, QualityIssue, QualityReport};

/// Hands out slugs that are unique across every document of a run.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    taken: HashSet<String>,
    quality: QualityReport,
}

impl SlugRegistry {
    /// Claim `wanted`, or `fallback` when `wanted` is empty. A taken slug gets
    /// the first free `-2`, `-3`, ... suffix.
    pub fn claim(&mut self, wanted: &str, fallback: &str, subject: &str) -> String {
        let base = if wanted.is_empty() { fallback } else { wanted };
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 2usize;
        let slug = loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                break candidate;
            }
            n += 1;
        };
        tracing::warn!(subject, wanted = base, assigned = %slug, "slug collision");
        self.quality.push(QualityIssue::new(
            IssueKind::SlugCollision,
            subject,
            format!("slug '{base}' already taken, assigned '{slug}'"),
        ));
        slug
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    pub fn into_quality(self) -> QualityReport {
        self.quality
    }
}

/// Make every slug unique: films first, then persons, each in the order given.
pub fn assign_slugs(films: &mut [Film], persons: &mut [Person]) -> QualityReport {
    let mut registry = SlugRegistry::default();
    for film in films.iter_mut() {
        film.slug = registry.claim(&film.slug, "film", film.id.as_str());
    }
    for person in persons.iter_mut() {
        person.slug = registry.claim(&person.slug, "person", person.id.as_str());
    }
    registry.into_quality()
}
