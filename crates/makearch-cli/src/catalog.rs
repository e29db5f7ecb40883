//! Canned example needs offered as one-click fillers.

use crate::messages::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub title: &'static str,
    pub description: &'static str,
}

const FR_EXAMPLES: [Example; 6] = [
    Example {
        title: "Assistant Email Intelligent",
        description: "Triez et répondez automatiquement aux emails avec IA",
    },
    Example {
        title: "Veille Concurrentielle",
        description: "Surveillez vos concurrents et générez des rapports d'analyse",
    },
    Example {
        title: "Gestionnaire de Support Client",
        description: "Analysez les tickets et proposez des solutions automatiques",
    },
    Example {
        title: "Générateur de Contenu Social",
        description: "Créez et planifiez du contenu sur les réseaux sociaux",
    },
    Example {
        title: "Extracteur de Factures",
        description: "Lisez les factures PDF et extrayez les données avec OCR + IA",
    },
    Example {
        title: "Qualificateur de Leads",
        description: "Analysez et notez automatiquement vos prospects",
    },
];

const EN_EXAMPLES: [Example; 6] = [
    Example {
        title: "Smart Email Assistant",
        description: "Sort and answer emails automatically with AI",
    },
    Example {
        title: "Competitive Intelligence",
        description: "Monitor your competitors and generate analysis reports",
    },
    Example {
        title: "Customer Support Manager",
        description: "Analyze tickets and suggest solutions automatically",
    },
    Example {
        title: "Social Content Generator",
        description: "Create and schedule social media content",
    },
    Example {
        title: "Invoice Extractor",
        description: "Read PDF invoices and extract their data with OCR + AI",
    },
    Example {
        title: "Lead Qualifier",
        description: "Analyze and score your prospects automatically",
    },
];

pub fn examples(locale: Locale) -> &'static [Example] {
    match locale {
        Locale::Fr => &FR_EXAMPLES,
        Locale::En => &EN_EXAMPLES,
    }
}

/// Look up an example by its 1-based position.
pub fn example(locale: Locale, position: usize) -> Option<&'static Example> {
    position
        .checked_sub(1)
        .and_then(|i| examples(locale).get(i))
}
