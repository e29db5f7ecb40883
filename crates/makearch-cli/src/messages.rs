//! User-facing strings, per locale.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    Fr,
    En,
}

/// Every string the shell shows to the user.
#[derive(Debug)]
pub struct Messages {
    pub banner: &'static str,
    pub tagline: &'static str,
    pub prompt_label: &'static str,
    pub validation: &'static str,
    pub busy: &'static str,
    pub generic_error: &'static str,
    pub modules_heading: &'static str,
    pub ai_heading: &'static str,
    pub tips_heading: &'static str,
    pub examples_heading: &'static str,
    pub ai_badge: &'static str,
    pub input_filled: &'static str,
    pub example_not_found: &'static str,
    pub unknown_command: &'static str,
    pub help: &'static str,
}

const FR: Messages = Messages {
    banner: "🤖 Architecte Make AI",
    tagline: "Transformez vos idées en scénarios Make intelligents avec IA intégrée",
    prompt_label: "Décrivez votre idée ou problème d'automatisation",
    validation: "Veuillez décrire votre idée ou problème",
    busy: "Génération en cours...",
    generic_error: "Une erreur est survenue. Veuillez réessayer.",
    modules_heading: "Modules du Scénario",
    ai_heading: "Intégration de l'IA",
    tips_heading: "Conseils de Mise en Œuvre",
    examples_heading: "Exemples d'Automatisations",
    ai_badge: "[IA]",
    input_filled: "Description prête (tapez :submit pour générer) :",
    example_not_found: "Exemple introuvable :",
    unknown_command: "Commande inconnue :",
    help: "Commandes :\n  <texte>        décrire un besoin et générer\n  :example N     remplir la description avec l'exemple N\n  :examples      lister les exemples\n  :submit        générer avec la description actuelle\n  :help          afficher cette aide\n  :quit          quitter",
};

const EN: Messages = Messages {
    banner: "🤖 Make AI Architect",
    tagline: "Turn your ideas into smart Make scenarios with built-in AI",
    prompt_label: "Describe your automation idea or problem",
    validation: "Please describe your idea or problem",
    busy: "Generating...",
    generic_error: "Something went wrong. Please try again.",
    modules_heading: "Scenario Modules",
    ai_heading: "AI Integration",
    tips_heading: "Implementation Tips",
    examples_heading: "Automation Examples",
    ai_badge: "[AI]",
    input_filled: "Description ready (type :submit to generate):",
    example_not_found: "No such example:",
    unknown_command: "Unknown command:",
    help: "Commands:\n  <text>         describe a need and generate\n  :example N     fill the description with example N\n  :examples      list the examples\n  :submit        generate from the current description\n  :help          show this help\n  :quit          quit",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Fr => &FR,
            Locale::En => &EN,
        }
    }
}
