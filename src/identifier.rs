//! Identifier canonicalization for generated Go code.
//!
//! Raw descriptor names (`foo_bar`, `service-a`, `DATABASE_URL`) become exported
//! (`FooBar`) and unexported (`fooBar`) identifiers. Acronym corrections come
//! from an injected table so the transform stays a pure function.

/// One acronym fix applied to a camel-cased identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcronymCorrection {
    pub from: &'static str,
    pub to: &'static str,
}

/// Corrections golint expects, in application order.
pub const GO_LINT_ACRONYMS: &[AcronymCorrection] = &[
    AcronymCorrection {
        from: "Url",
        to: "URL",
    },
    AcronymCorrection {
        from: "Id",
        to: "ID",
    },
    AcronymCorrection {
        from: "Api",
        to: "API",
    },
];

/// Exported and unexported forms of one raw name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalIdentifier {
    pub exported: String,
    pub unexported: String,
}

#[derive(Clone, Copy, Debug)]
pub struct Canonicalizer<'a> {
    acronyms: &'a [AcronymCorrection],
}

impl Default for Canonicalizer<'static> {
    fn default() -> Self {
        Self::new(GO_LINT_ACRONYMS)
    }
}

impl<'a> Canonicalizer<'a> {
    pub const fn new(acronyms: &'a [AcronymCorrection]) -> Self {
        Self { acronyms }
    }

    /// `DATABASE_URL` -> `DatabaseURL`, `service-a` -> `ServiceA`.
    ///
    /// Only `_` and `-` split segments, and `_` wins when both are present.
    /// Each correction replaces its first occurrence only.
    pub fn public(&self, raw: &str) -> String {
        let segments: Vec<&str> = if raw.contains('_') {
            raw.split('_').collect()
        } else if raw.contains('-') {
            raw.split('-').collect()
        } else {
            vec![raw]
        };

        let mut out: String = segments
            .into_iter()
            .map(|segment| capitalize_first(&segment.to_lowercase()))
            .collect();
        for correction in self.acronyms {
            out = out.replacen(correction.from, correction.to, 1);
        }
        out
    }

    /// `service-a` -> `serviceA`; the empty string maps to itself.
    pub fn private(&self, raw: &str) -> String {
        lowercase_first(&self.public(raw))
    }

    pub fn canonical(&self, raw: &str) -> CanonicalIdentifier {
        let exported = self.public(raw);
        let unexported = lowercase_first(&exported);
        CanonicalIdentifier {
            exported,
            unexported,
        }
    }
}

/// Exported identifier using [`GO_LINT_ACRONYMS`].
pub fn to_public_identifier(raw: &str) -> String {
    Canonicalizer::default().public(raw)
}

/// Unexported identifier using [`GO_LINT_ACRONYMS`].
pub fn to_private_identifier(raw: &str) -> String {
    Canonicalizer::default().private(raw)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
