// src/extractors/catalog.rs

/// How the block under a section title is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// One label row followed by one value row.
    SingleRow,
    /// A header row followed by labeled data rows.
    Grid,
}

// Titles exactly as they appear in column A of an exported payslip.
const PAYSLIP_SECTIONS: &[(&str, SectionKind)] = &[
    ("Company Information", SectionKind::SingleRow),
    ("Payslip Information", SectionKind::SingleRow),
    ("Current and YTD Totals", SectionKind::Grid),
    ("Earnings", SectionKind::Grid),
    ("Employee Taxes", SectionKind::Grid),
    ("Pre Tax Deductions", SectionKind::Grid),
    ("Post Tax Deductions", SectionKind::Grid),
    ("Employer Paid Benefits", SectionKind::Grid),
    ("Taxable Wages", SectionKind::Grid),
    ("Withholding", SectionKind::Grid),
    ("Payment Information", SectionKind::SingleRow),
];

/// Immutable mapping from section title to table kind.
/// Entries stay in a `Vec` in declaration order; a linear scan over a dozen
/// titles is all a lookup needs.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    entries: Vec<(String, SectionKind)>,
}

impl SectionCatalog {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SectionKind)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(title, kind)| (title.into(), kind)).collect(),
        }
    }

    /// The sections of a standard payslip export.
    pub fn payslip() -> Self {
        Self::new(PAYSLIP_SECTIONS.iter().copied())
    }

    /// Exact, case-sensitive lookup.
    pub fn kind_of(&self, title: &str) -> Option<SectionKind> {
        self.entries
            .iter()
            .find(|(known, _)| known == title)
            .map(|(_, kind)| *kind)
    }

    pub fn is_title(&self, text: &str) -> bool {
        self.kind_of(text).is_some()
    }

    pub fn section_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payslip_catalog_kinds() {
        let catalog = SectionCatalog::payslip();
        assert_eq!(catalog.section_count(), 11);
        assert_eq!(catalog.kind_of("Company Information"), Some(SectionKind::SingleRow));
        assert_eq!(catalog.kind_of("Payment Information"), Some(SectionKind::SingleRow));
        assert_eq!(catalog.kind_of("Earnings"), Some(SectionKind::Grid));
        assert_eq!(catalog.kind_of("Withholding"), Some(SectionKind::Grid));
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = SectionCatalog::payslip();
        assert!(catalog.kind_of("earnings").is_none());
        assert!(catalog.kind_of("Earnings ").is_none());
        assert!(!catalog.is_title("Regular"));
    }
}
