//! Shared builders and sample data for tests across the workspace.
//!
//! Panicking constructors are fine here: this crate is test-only.

use mention_core::{
    CanonicalMap, Confidence, ConsolidatedMention, LabelType, Mention, Role, Taxonomy, ThemeSpec,
    Utterance,
};

/// Fluent builder over [`Mention`] with sensible defaults for tests.
#[derive(Clone)]
pub struct MentionBuilder {
    mention: Mention,
}

impl MentionBuilder {
    pub fn new(dialog_id: &str) -> Self {
        Self {
            mention: Mention {
                dialog_id: dialog_id.to_string(),
                turn_id: 0,
                theme: "доставка".to_string(),
                subtheme: "не работает выборочно".to_string(),
                label_type: LabelType::Barrier,
                text_quote: "доставка то работает, то нет".to_string(),
                confidence: Confidence::new(Confidence::RULE_HIT),
                is_client_only: true,
                has_evidence: true,
            },
        }
    }

    pub fn turn(mut self, turn_id: u32) -> Self {
        self.mention.turn_id = turn_id;
        self
    }

    pub fn theme(mut self, theme: &str) -> Self {
        self.mention.theme = theme.to_string();
        self
    }

    pub fn subtheme(mut self, subtheme: &str) -> Self {
        self.mention.subtheme = subtheme.to_string();
        self
    }

    pub fn label_type(mut self, label_type: LabelType) -> Self {
        self.mention.label_type = label_type;
        self
    }

    pub fn quote(mut self, quote: &str) -> Self {
        self.mention.text_quote = quote.to_string();
        self
    }

    pub fn confidence(mut self, value: f64) -> Self {
        self.mention.confidence = Confidence::new(value);
        self
    }

    pub fn build(self) -> Mention {
        self.mention
    }

    /// Finish as a consolidated mention under the given canonical entity.
    pub fn consolidated(self, canonical_id: &str, canonical_title: &str) -> ConsolidatedMention {
        ConsolidatedMention {
            mention: self.mention,
            canonical_id: canonical_id.to_string(),
            canonical_title: canonical_title.to_string(),
        }
    }
}

pub fn mention(dialog_id: &str) -> MentionBuilder {
    MentionBuilder::new(dialog_id)
}

pub fn utterance(dialog_id: &str, turn_id: u32, role: Role, text: &str) -> Utterance {
    Utterance {
        dialog_id: dialog_id.to_string(),
        turn_id,
        role,
        text: text.to_string(),
    }
}

/// The demo taxonomy used throughout the tests: the five Russian themes the
/// built-in rules classify into.
pub fn sample_taxonomy() -> Taxonomy {
    let theme = |name: &str, subthemes: &[&str]| ThemeSpec {
        name: name.to_string(),
        subthemes: subthemes.iter().map(|s| s.to_string()).collect(),
    };
    Taxonomy {
        themes: vec![
            theme(
                "доставка",
                &["не работает выборочно", "вес/габариты/КГТ", "регион/покрытие"],
            ),
            theme("UI/настройки", &["непонятный интерфейс"]),
            theme("продвижение", &["не окупается", "высокая стоимость"]),
            theme("поддержка", &["обращался — не помогло"]),
            theme("цены", &["дорого для категории", "фиксированная цена"]),
        ],
        max_subthemes: 12,
    }
}

/// A small Russian dialog batch: three dialogs, client and operator turns,
/// covering delivery, support, and an uneventful conversation.
pub fn sample_dialogs() -> Vec<Utterance> {
    vec![
        utterance("d1", 0, Role::Client, "здравствуйте, доставка то работает, то нет"),
        utterance("d1", 1, Role::Operator, "проверим ваш пункт выдачи"),
        utterance("d1", 2, Role::Client, "писал в поддержку, всё без результата"),
        utterance("d2", 0, Role::Client, "доставка то работает, то нет"),
        utterance("d2", 1, Role::Operator, "передал коллегам"),
        utterance("d3", 0, Role::Client, "спасибо, всё хорошо"),
    ]
}

/// Canonical map for the problems kind, parsed from the same TOML shape the
/// production maps use.
pub fn problems_map() -> CanonicalMap {
    toml::from_str(
        r#"
        [[entries]]
        id = "delivery_selective"
        title = "Доставка работает выборочно"

        [[entries.match]]
        theme = "доставка"
        subtheme = "не работает выборочно"

        [[entries.match]]
        theme = "доставка"
        subtheme = "регион/покрытие"

        [[entries]]
        id = "promo_cost"
        title = "Продвижение дорого"

        [[entries.match]]
        theme = "продвижение"
        subtheme = "высокая стоимость"
        "#,
    )
    .expect("problems map fixture parses")
}

/// Canonical map for the signals kind.
pub fn signals_map() -> CanonicalMap {
    toml::from_str(
        r#"
        [[entries]]
        id = "support_unresolved"
        title = "Поддержка не решает"

        [[entries.match]]
        theme = "поддержка"
        subtheme = "обращался — не помогло"
        "#,
    )
    .expect("signals map fixture parses")
}

/// Taxonomy document as TOML text, for tests exercising file loading.
pub fn taxonomy_toml() -> &'static str {
    r#"
    max_subthemes = 12

    [[themes]]
    name = "доставка"
    subthemes = ["не работает выборочно", "вес/габариты/КГТ", "регион/покрытие"]

    [[themes]]
    name = "UI/настройки"
    subthemes = ["непонятный интерфейс"]

    [[themes]]
    name = "продвижение"
    subthemes = ["не окупается", "высокая стоимость"]

    [[themes]]
    name = "поддержка"
    subthemes = ["обращался — не помогло"]

    [[themes]]
    name = "цены"
    subthemes = ["дорого для категории", "фиксированная цена"]
    "#
}

/// Problems map as TOML text.
pub fn problems_map_toml() -> &'static str {
    r#"
    [[entries]]
    id = "delivery_selective"
    title = "Доставка работает выборочно"

    [[entries.match]]
    theme = "доставка"
    subtheme = "не работает выборочно"

    [[entries.match]]
    theme = "доставка"
    subtheme = "регион/покрытие"

    [[entries]]
    id = "promo_cost"
    title = "Продвижение дорого"

    [[entries.match]]
    theme = "продвижение"
    subtheme = "высокая стоимость"
    "#
}

/// Signals map as TOML text.
pub fn signals_map_toml() -> &'static str {
    r#"
    [[entries]]
    id = "support_unresolved"
    title = "Поддержка не решает"

    [[entries.match]]
    theme = "поддержка"
    subtheme = "обращался — не помогло"
    "#
}

/// Ideas map as TOML text. The sample dialogs carry no ideas; the map still
/// has to exist for the consolidation stage to run.
pub fn ideas_map_toml() -> &'static str {
    r#"
    [[entries]]
    id = "delivery_expand"
    title = "Расширить покрытие доставки"

    [[entries.match]]
    theme = "доставка"
    subtheme = "регион/покрытие"
    "#
}
